//! Error types for ColdTrace Ledger using snafu.
//!
//! One unified [`LedgerError`] covers the whole taxonomy: argument
//! validation, missing or duplicate records, data-integrity failures
//! (decode, identity mismatch), business-rule violations (illegal
//! transition, authorization), and transport-level read/write failures.
//! Each variant maps to an [`ErrorCode`] with a unique numeric identifier
//! and a retryability classification.

use core::fmt;

use snafu::{Location, Snafu};

use crate::codec::CodecError;
use crate::record::PackageStatus;

/// Unified result type for ledger operations.
pub type Result<T, E = LedgerError> = std::result::Result<T, E>;

/// Machine-readable error codes for programmatic error handling.
///
/// Codes are organized into ranges:
///
/// | Range     | Domain                                           |
/// |-----------|--------------------------------------------------|
/// | 1000–1099 | Transport (read/write against the ledger)        |
/// | 1100–1199 | Data integrity (identity, decode, encode)        |
/// | 1200–1299 | Request validation (arguments, lookup, conflict) |
/// | 1300–1399 | Business rules (lifecycle, authorization)        |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    /// Read against the ledger transport failed.
    StoreRead = 1000,
    /// Write against the ledger transport was rejected.
    StoreWrite = 1001,

    /// Record fetched under key K does not identify itself as K.
    IdentityMismatch = 1100,
    /// Stored bytes are not a well-formed serialized record.
    Decode = 1101,
    /// A record could not be serialized.
    Encode = 1102,

    /// Malformed request argument (arity, enum name, numeric form).
    InvalidArgument = 1200,
    /// No record stored under the requested id.
    NotFound = 1201,
    /// A record with the requested id already exists.
    Duplicate = 1202,

    /// The requested transition is illegal from the record's current status.
    InvalidTransition = 1300,
    /// The submitted provider does not match the record's provider.
    AuthorizationMismatch = 1301,
}

impl ErrorCode {
    /// Returns the numeric code value.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Converts a numeric code to an `ErrorCode`, returning `None` for unknown values.
    #[must_use]
    pub fn from_u16(code: u16) -> Option<Self> {
        match code {
            1000 => Some(Self::StoreRead),
            1001 => Some(Self::StoreWrite),
            1100 => Some(Self::IdentityMismatch),
            1101 => Some(Self::Decode),
            1102 => Some(Self::Encode),
            1200 => Some(Self::InvalidArgument),
            1201 => Some(Self::NotFound),
            1202 => Some(Self::Duplicate),
            1300 => Some(Self::InvalidTransition),
            1301 => Some(Self::AuthorizationMismatch),
            _ => None,
        }
    }

    /// Whether this error is retryable.
    ///
    /// Only transport-level failures may succeed on a subsequent attempt;
    /// nothing is retried internally; the classification is for callers.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::StoreRead | Self::StoreWrite)
    }

    /// Suggested recovery action for this error code.
    #[must_use]
    pub const fn suggested_action(self) -> &'static str {
        match self {
            Self::StoreRead => "Retry once the ledger transport is reachable again.",
            Self::StoreWrite => "Retry the command; the write was rejected before committing.",
            Self::IdentityMismatch => {
                "The storage slot holds an unrelated record. Treat as data corruption and audit \
                 the key."
            },
            Self::Decode => {
                "Stored bytes are corrupt or were written by an incompatible producer. Do not \
                 retry; audit the key."
            },
            Self::Encode => "Codec bug. Report as an issue with the record that failed.",
            Self::InvalidArgument => "Fix the command arguments and resubmit.",
            Self::NotFound => "Verify the package id; it was never created on this ledger.",
            Self::Duplicate => "Package ids are immutable and unique; pick a fresh id.",
            Self::InvalidTransition => {
                "The package is past this step in its lifecycle. Query its current status."
            },
            Self::AuthorizationMismatch => {
                "Only the provider named on the record may move it. Resubmit as that provider."
            },
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u16())
    }
}

/// Top-level error type for ledger operations.
///
/// No operation partially commits: every variant below is raised either
/// before any write was issued, or verbatim from the transport's rejection
/// of the single write that would have committed the operation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum LedgerError {
    /// Read against the ledger transport failed.
    #[snafu(display("Store read failed at {location}: {message}"))]
    StoreRead {
        /// Error description.
        message: String,
        /// Source location.
        #[snafu(implicit)]
        location: Location,
    },

    /// Write against the ledger transport was rejected.
    #[snafu(display("Store write failed at {location}: {message}"))]
    StoreWrite {
        /// Error description.
        message: String,
        /// Source location.
        #[snafu(implicit)]
        location: Location,
    },

    /// Record fetched under one key identifies itself as another.
    ///
    /// Defends against a storage slot poisoned by an unrelated earlier
    /// write; the bytes decode cleanly but belong to a different record.
    #[snafu(display("Record under key {key:?} identifies itself as {found:?}"))]
    IdentityMismatch {
        /// Key the record was fetched under.
        key: String,
        /// Id embedded in the fetched record.
        found: String,
    },

    /// Stored bytes are not a well-formed serialized record.
    #[snafu(display("Failed to decode record {key:?}: {source}"))]
    Decode {
        /// Key the bytes were fetched under.
        key: String,
        /// The underlying codec error.
        source: CodecError,
        /// Source location.
        #[snafu(implicit)]
        location: Location,
    },

    /// A record could not be serialized. Never expected in practice.
    #[snafu(display("Failed to encode record {key:?}: {source}"))]
    Encode {
        /// Key the record would have been stored under.
        key: String,
        /// The underlying codec error.
        source: CodecError,
        /// Source location.
        #[snafu(implicit)]
        location: Location,
    },

    /// Malformed request argument.
    #[snafu(display("Invalid argument: {message}"))]
    InvalidArgument {
        /// Error description.
        message: String,
    },

    /// No record stored under the requested id.
    #[snafu(display("Package {id:?} not found"))]
    NotFound {
        /// The missing package id.
        id: String,
    },

    /// A record with the requested id already exists.
    #[snafu(display("Package {id:?} already exists"))]
    Duplicate {
        /// The conflicting package id.
        id: String,
    },

    /// The requested transition is illegal from the record's current status.
    #[snafu(display("Package {id:?} is {status} and cannot {action}"))]
    InvalidTransition {
        /// The package id.
        id: String,
        /// The record's current status.
        status: PackageStatus,
        /// What the rejected event asked for, e.g. "be accepted".
        action: &'static str,
    },

    /// The submitted provider does not match the record's provider.
    #[snafu(display("Provider {provider:?} is not authorized to handle package {id:?}"))]
    AuthorizationMismatch {
        /// The package id.
        id: String,
        /// The provider identity the caller submitted.
        provider: String,
    },
}

impl LedgerError {
    /// Returns the machine-readable error code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::StoreRead { .. } => ErrorCode::StoreRead,
            Self::StoreWrite { .. } => ErrorCode::StoreWrite,
            Self::IdentityMismatch { .. } => ErrorCode::IdentityMismatch,
            Self::Decode { .. } => ErrorCode::Decode,
            Self::Encode { .. } => ErrorCode::Encode,
            Self::InvalidArgument { .. } => ErrorCode::InvalidArgument,
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::Duplicate { .. } => ErrorCode::Duplicate,
            Self::InvalidTransition { .. } => ErrorCode::InvalidTransition,
            Self::AuthorizationMismatch { .. } => ErrorCode::AuthorizationMismatch,
        }
    }

    /// Whether this error is retryable. Delegates to [`ErrorCode::is_retryable`].
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        self.code().is_retryable()
    }

    /// Suggested recovery action. Delegates to [`ErrorCode::suggested_action`].
    #[must_use]
    pub const fn suggested_action(&self) -> &'static str {
        self.code().suggested_action()
    }

    /// Wraps a transport read failure, capturing the caller's location.
    #[track_caller]
    pub fn store_read(err: impl fmt::Display) -> Self {
        let loc = std::panic::Location::caller();
        Self::StoreRead {
            message: err.to_string(),
            location: Location::new(loc.file(), loc.line(), loc.column()),
        }
    }

    /// Wraps a transport write failure, capturing the caller's location.
    #[track_caller]
    pub fn store_write(err: impl fmt::Display) -> Self {
        let loc = std::panic::Location::caller();
        Self::StoreWrite {
            message: err.to_string(),
            location: Location::new(loc.file(), loc.line(), loc.column()),
        }
    }
}
