//! The package index: one well-known record listing every package id.
//!
//! The underlying transport offers no range scans, so enumeration is
//! denormalized into a single [`PackageIndex`] record under [`INDEX_KEY`].
//! Creation appends to it in the same logical unit of work as the new
//! record's put; nothing is ever removed.

use coldtrace_ledger_types::error::EncodeSnafu;
use coldtrace_ledger_types::{INDEX_KEY, LedgerError, PackageIndex, Result, decode, encode};
use snafu::ResultExt;

use crate::transport::LedgerTransport;

/// Owns the "all identifiers" index record.
pub struct IndexManager<'a, T: LedgerTransport> {
    transport: &'a T,
}

impl<'a, T: LedgerTransport> IndexManager<'a, T> {
    /// Creates an index manager over the given transport.
    #[must_use]
    pub const fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Writes an empty index. Called once, at system bootstrap.
    ///
    /// # Errors
    ///
    /// Returns `Encode` or `StoreWrite` if the empty index cannot be written.
    pub fn initialize(&self) -> Result<()> {
        self.save(&PackageIndex::default())
    }

    /// Returns all package ids in creation order.
    ///
    /// # Errors
    ///
    /// Returns `StoreRead` if the index record is missing (the system was
    /// never initialized) or undecodable, or if the transport fails.
    pub fn list_ids(&self) -> Result<Vec<String>> {
        Ok(self.load()?.ids)
    }

    /// Appends `id` to the index.
    ///
    /// Read-modify-write of the shared index record; legal only because the
    /// transport executes invocations with a single effective writer. Must
    /// run in the same logical creation operation as the new record's put.
    ///
    /// # Errors
    ///
    /// Returns `Duplicate` if `id` is already indexed, leaving the index
    /// unchanged; otherwise the failures of [`Self::list_ids`] plus
    /// `StoreWrite` on the write-back.
    pub fn append(&self, id: &str) -> Result<()> {
        let mut index = self.load()?;
        if index.contains(id) {
            return Err(LedgerError::Duplicate { id: id.to_string() });
        }
        index.ids.push(id.to_string());
        self.save(&index)
    }

    fn load(&self) -> Result<PackageIndex> {
        let bytes = self
            .transport
            .raw_get(INDEX_KEY)
            .map_err(LedgerError::store_read)?
            .ok_or_else(|| {
                LedgerError::store_read("package index missing; ledger was never initialized")
            })?;
        decode(&bytes)
            .map_err(|err| LedgerError::store_read(format!("package index is corrupt: {err}")))
    }

    fn save(&self, index: &PackageIndex) -> Result<()> {
        let bytes = encode(index).context(EncodeSnafu { key: INDEX_KEY })?;
        self.transport.raw_put(INDEX_KEY, &bytes).map_err(LedgerError::store_write)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::transport::MemoryTransport;

    #[test]
    fn initialized_index_lists_empty() {
        let transport = MemoryTransport::new();
        let index = IndexManager::new(&transport);

        index.initialize().expect("initialize");
        assert_eq!(index.list_ids().expect("list"), Vec::<String>::new());
    }

    #[test]
    fn uninitialized_index_is_store_read_error() {
        let transport = MemoryTransport::new();
        let index = IndexManager::new(&transport);

        let err = index.list_ids().unwrap_err();
        assert!(matches!(err, LedgerError::StoreRead { .. }));
        assert!(err.is_retryable());
    }

    #[test]
    fn corrupt_index_is_store_read_error() {
        let transport = MemoryTransport::new();
        transport.raw_put(INDEX_KEY, &[0xFF, 0xFF]).expect("poison index");

        let index = IndexManager::new(&transport);
        let err = index.list_ids().unwrap_err();
        assert!(matches!(err, LedgerError::StoreRead { .. }));
        assert!(err.to_string().contains("corrupt"));
    }

    #[test]
    fn append_preserves_creation_order() {
        let transport = MemoryTransport::new();
        let index = IndexManager::new(&transport);

        index.initialize().expect("initialize");
        for id in ["PKG3", "PKG1", "PKG2"] {
            index.append(id).expect("append");
        }
        assert_eq!(index.list_ids().expect("list"), vec!["PKG3", "PKG1", "PKG2"]);
    }

    #[test]
    fn duplicate_append_fails_and_leaves_index_unchanged() {
        let transport = MemoryTransport::new();
        let index = IndexManager::new(&transport);

        index.initialize().expect("initialize");
        index.append("PKG1").expect("append");

        let err = index.append("PKG1").unwrap_err();
        assert!(matches!(err, LedgerError::Duplicate { .. }));
        assert_eq!(index.list_ids().expect("list"), vec!["PKG1"]);
    }

    #[test]
    fn append_without_initialize_fails() {
        let transport = MemoryTransport::new();
        let index = IndexManager::new(&transport);

        let err = index.append("PKG1").unwrap_err();
        assert!(matches!(err, LedgerError::StoreRead { .. }));
        assert!(transport.is_empty());
    }
}
