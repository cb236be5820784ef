//! State layer for ColdTrace Ledger.
//!
//! This crate sits between the raw ledger transport (a distributed
//! key-value substrate consumed as byte get/put) and the command shell,
//! providing:
//!
//! - Typed record storage over raw bytes ([`RecordStore`])
//! - The package index, the only secondary structure ([`IndexManager`])
//! - Lifecycle transitions guarded by the status machine ([`LifecycleEngine`])
//! - Full-scan queries by role, status, or both ([`QueryEngine`])
//!
//! Each command runs as one ledger invocation with a single effective
//! writer; the layer holds no state of its own between calls.

#![deny(unsafe_code)]

mod index;
mod lifecycle;
mod query;
mod store;
mod transport;

pub use index::IndexManager;
pub use lifecycle::LifecycleEngine;
pub use query::QueryEngine;
pub use store::RecordStore;
pub use transport::{DirTransport, LedgerTransport, MemoryTransport, TransportError};
