//! Core types, errors, and serialization for ColdTrace Ledger.
//!
//! This crate provides the foundational pieces used throughout the ledger:
//! - The [`PackageRecord`] entity, its lifecycle [`PackageStatus`], and the
//!   query [`Role`] dimension
//! - The [`PackageIndex`] secondary structure enumerating all record ids
//! - A postcard-backed codec ([`encode`]/[`decode`])
//! - Error types using snafu, with a machine-readable [`ErrorCode`] catalog

#![deny(unsafe_code)]

pub mod codec;
pub mod error;
pub mod record;

// Re-export commonly used items at crate root
pub use codec::{CodecError, decode, encode};
pub use error::{ErrorCode, LedgerError, Result};
pub use record::{INDEX_KEY, NewPackage, PackageIndex, PackageRecord, PackageStatus, Role};
