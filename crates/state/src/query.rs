//! Full-scan queries over the package set.
//!
//! The transport has no native indexing beyond the primary key, so every
//! query replays the package index and loads each record in turn. Results
//! come back in index (creation) order, and scans are all-or-nothing: a
//! record that fails to load or decode aborts the whole query instead of
//! being silently skipped.

use coldtrace_ledger_types::{LedgerError, PackageRecord, PackageStatus, Result, Role};

use crate::index::IndexManager;
use crate::store::RecordStore;
use crate::transport::LedgerTransport;

/// Answers ad-hoc queries over the full record set.
pub struct QueryEngine<'a, T: LedgerTransport> {
    records: RecordStore<'a, T>,
    index: IndexManager<'a, T>,
}

impl<'a, T: LedgerTransport> QueryEngine<'a, T> {
    /// Creates an engine over the given transport.
    #[must_use]
    pub const fn new(transport: &'a T) -> Self {
        Self { records: RecordStore::new(transport), index: IndexManager::new(transport) }
    }

    /// Returns the single record stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `Decode`, or `IdentityMismatch` as for any read.
    pub fn by_id(&self, id: &str) -> Result<PackageRecord> {
        self.fetch(id)
    }

    /// Returns the raw index contents: every package id in creation order.
    ///
    /// An empty sequence is a valid outcome on an initialized, untouched
    /// ledger; a missing index is a `StoreRead` error.
    ///
    /// # Errors
    ///
    /// Returns `StoreRead` if the index is missing or undecodable.
    pub fn all_ids(&self) -> Result<Vec<String>> {
        self.index.list_ids()
    }

    /// Returns every record, in creation order.
    ///
    /// # Errors
    ///
    /// Returns the failures of [`Self::all_ids`] plus any per-record read
    /// failure, which aborts the scan.
    pub fn all(&self) -> Result<Vec<PackageRecord>> {
        self.scan(|_| true)
    }

    /// Returns the records whose status equals `status`.
    ///
    /// # Errors
    ///
    /// As for [`Self::all`].
    pub fn by_status(&self, status: PackageStatus) -> Result<Vec<PackageRecord>> {
        self.scan(|record| record.status == status)
    }

    /// Returns the records whose `role` field equals `value`.
    ///
    /// # Errors
    ///
    /// As for [`Self::all`].
    pub fn by_role(&self, role: Role, value: &str) -> Result<Vec<PackageRecord>> {
        self.scan(|record| role.field_of(record) == value)
    }

    /// Returns the records whose `role` field equals `value` and whose
    /// status equals `status`.
    ///
    /// # Errors
    ///
    /// As for [`Self::all`].
    pub fn by_role_and_status(
        &self,
        role: Role,
        value: &str,
        status: PackageStatus,
    ) -> Result<Vec<PackageRecord>> {
        self.scan(|record| role.field_of(record) == value && record.status == status)
    }

    fn scan(&self, predicate: impl Fn(&PackageRecord) -> bool) -> Result<Vec<PackageRecord>> {
        let ids = self.index.list_ids()?;
        let mut matches = Vec::new();
        for id in &ids {
            let record = self.fetch(id)?;
            if predicate(&record) {
                matches.push(record);
            }
        }
        Ok(matches)
    }

    /// Loads `id` and verifies the embedded id matches the key, catching a
    /// slot poisoned by an unrelated earlier write.
    fn fetch(&self, id: &str) -> Result<PackageRecord> {
        let record = self.records.get(id)?;
        if record.id != id {
            return Err(LedgerError::IdentityMismatch { key: id.to_string(), found: record.id });
        }
        Ok(record)
    }
}
