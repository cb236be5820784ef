//! Command surface and dispatch shell for ColdTrace Ledger.
//!
//! The surrounding platform hands over a verb and an ordered list of string
//! arguments; this crate turns them into a typed [`Command`], routes it
//! through the state layer, and answers with a [`Response`].

#![deny(unsafe_code)]

mod command;
mod dispatch;

pub use command::Command;
pub use dispatch::{Dispatcher, Response};
