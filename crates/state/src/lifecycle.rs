//! Lifecycle transitions for package records.
//!
//! Each operation is one ledger invocation: load the record, verify its
//! identity, check every guard, and only then write. A guard violation
//! fails closed: the record is left unmodified and unwritten.

use coldtrace_ledger_types::{LedgerError, NewPackage, PackageRecord, PackageStatus, Result};

use crate::index::IndexManager;
use crate::store::RecordStore;
use crate::transport::LedgerTransport;

/// Applies lifecycle events to package records.
pub struct LifecycleEngine<'a, T: LedgerTransport> {
    records: RecordStore<'a, T>,
    index: IndexManager<'a, T>,
}

impl<'a, T: LedgerTransport> LifecycleEngine<'a, T> {
    /// Creates an engine over the given transport.
    #[must_use]
    pub const fn new(transport: &'a T) -> Self {
        Self { records: RecordStore::new(transport), index: IndexManager::new(transport) }
    }

    /// Creates a new package record with status `Created` and appends its id
    /// to the package index.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for an empty id or an inverted temperature
    /// range, `Duplicate` if the id is already taken, plus store failures.
    pub fn create(&self, package: NewPackage) -> Result<PackageRecord> {
        if package.id.is_empty() {
            return Err(LedgerError::InvalidArgument {
                message: "package id must not be empty".to_string(),
            });
        }
        if package.temperature_min > package.temperature_max {
            return Err(LedgerError::InvalidArgument {
                message: format!(
                    "temperature range is inverted: min {} exceeds max {}",
                    package.temperature_min, package.temperature_max
                ),
            });
        }
        if self.records.exists(&package.id)? {
            return Err(LedgerError::Duplicate { id: package.id });
        }

        let record = PackageRecord::new(package);
        // Two independent writes; the transport serializes invocations, so
        // the read-modify-write on the index cannot interleave with another
        // creation. Index first, record second.
        self.index.append(&record.id)?;
        self.records.put(&record)?;
        Ok(record)
    }

    /// Marks the package as accepted by its provider: `Created → InTransit`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless the record is still `Created`, and
    /// `AuthorizationMismatch` if `provider` is not the provider named on
    /// the record.
    pub fn accept(&self, id: &str, provider: &str) -> Result<PackageRecord> {
        let mut record = self.fetch(id)?;
        if record.status != PackageStatus::Created {
            return Err(LedgerError::InvalidTransition {
                id: record.id,
                status: record.status,
                action: "be accepted",
            });
        }
        if record.provider != provider {
            return Err(LedgerError::AuthorizationMismatch {
                id: record.id,
                provider: provider.to_string(),
            });
        }

        record.status = PackageStatus::InTransit;
        self.records.put(&record)?;
        Ok(record)
    }

    /// Applies a temperature reading.
    ///
    /// A reading outside the record's acceptable range moves it to
    /// `Damaged`; an in-range reading leaves the status unchanged. Either
    /// way the record is re-put, keeping one write per accepted event.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` if the record is already terminal.
    pub fn record_temperature(&self, id: &str, reading: i32) -> Result<PackageRecord> {
        let mut record = self.fetch(id)?;
        if record.status.is_terminal() {
            return Err(LedgerError::InvalidTransition {
                id: record.id,
                status: record.status,
                action: "take a temperature reading",
            });
        }

        if record.is_excursion(reading) {
            record.status = PackageStatus::Damaged;
        }
        self.records.put(&record)?;
        Ok(record)
    }

    /// Marks the package as handed over to the consignee: `→ Delivered`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` if the record is already terminal, and
    /// `AuthorizationMismatch` if `provider` is not the provider named on
    /// the record.
    pub fn deliver(&self, id: &str, provider: &str) -> Result<PackageRecord> {
        let mut record = self.fetch(id)?;
        if record.status.is_terminal() {
            return Err(LedgerError::InvalidTransition {
                id: record.id,
                status: record.status,
                action: "be delivered",
            });
        }
        if record.provider != provider {
            return Err(LedgerError::AuthorizationMismatch {
                id: record.id,
                provider: provider.to_string(),
            });
        }

        record.status = PackageStatus::Delivered;
        self.records.put(&record)?;
        Ok(record)
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
