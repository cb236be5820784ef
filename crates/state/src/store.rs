//! Typed record access over the raw transport.

use coldtrace_ledger_types::error::{DecodeSnafu, EncodeSnafu};
use coldtrace_ledger_types::{LedgerError, PackageRecord, Result, decode, encode};
use snafu::ResultExt;

use crate::transport::LedgerTransport;

/// Typed get/put wrapper around the transport's raw byte interface.
///
/// The store deliberately does not verify that a fetched record's embedded
/// id matches the key it was fetched under; callers perform that check at
/// each read site so a poisoned slot is caught even when it decodes cleanly.
pub struct RecordStore<'a, T: LedgerTransport> {
    transport: &'a T,
}

impl<'a, T: LedgerTransport> RecordStore<'a, T> {
    /// Creates a store over the given transport.
    #[must_use]
    pub const fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Fetches and decodes the record stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if nothing is stored under `id`, `Decode` if the
    /// stored bytes are not a well-formed record, and `StoreRead` if the
    /// transport fails.
    pub fn get(&self, id: &str) -> Result<PackageRecord> {
        let bytes = self
            .transport
            .raw_get(id)
            .map_err(LedgerError::store_read)?
            .ok_or_else(|| LedgerError::NotFound { id: id.to_string() })?;
        decode(&bytes).context(DecodeSnafu { key: id })
    }

    /// Serializes `record` and writes it under `record.id`.
    ///
    /// # Errors
    ///
    /// Returns `Encode` if serialization fails (never expected in practice)
    /// and `StoreWrite` if the transport rejects the write.
    pub fn put(&self, record: &PackageRecord) -> Result<()> {
        let bytes = encode(record).context(EncodeSnafu { key: record.id.as_str() })?;
        self.transport.raw_put(&record.id, &bytes).map_err(LedgerError::store_write)
    }

    /// Whether any bytes are stored under `id`.
    ///
    /// A raw presence probe: it answers without decoding, so it also sees
    /// slots holding something other than a package record.
    ///
    /// # Errors
    ///
    /// Returns `StoreRead` if the transport fails.
    pub fn exists(&self, id: &str) -> Result<bool> {
        Ok(self.transport.raw_get(id).map_err(LedgerError::store_read)?.is_some())
    }
}
