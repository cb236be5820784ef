//! Package records, lifecycle status, and query roles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Well-known key under which the [`PackageIndex`] record is stored.
pub const INDEX_KEY: &str = "package-index";

/// Lifecycle status of a package.
///
/// The legal transition graph is `Created → InTransit → Delivered`, with
/// `Damaged` reachable from any non-terminal status once a temperature
/// excursion is observed. `Damaged` and `Delivered` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PackageStatus {
    /// Label generated; waiting for the provider to pick the package up.
    Created,
    /// Accepted by the provider and moving.
    InTransit,
    /// A temperature excursion was observed. Terminal.
    Damaged,
    /// Handed over to the consignee. Terminal.
    Delivered,
}

impl PackageStatus {
    /// Whether no further transition is permitted from this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Damaged | Self::Delivered)
    }

    /// Status name, identical to the form accepted by `FromStr`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::InTransit => "InTransit",
            Self::Damaged => "Damaged",
            Self::Delivered => "Delivered",
        }
    }
}

impl fmt::Display for PackageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageStatus {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Created" => Ok(Self::Created),
            "InTransit" => Ok(Self::InTransit),
            "Damaged" => Ok(Self::Damaged),
            "Delivered" => Ok(Self::Delivered),
            other => Err(LedgerError::InvalidArgument {
                message: format!(
                    "unknown status {other:?}, expected Created, InTransit, Damaged or Delivered"
                ),
            }),
        }
    }
}

/// Identity field of a [`PackageRecord`] usable as a query dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Party that handed the package over for shipping.
    Shipper,
    /// Party insuring the package in transit.
    Insurer,
    /// Party the package is addressed to.
    Consignee,
    /// Custodian carrying the package.
    Provider,
}

impl Role {
    /// Returns the record field this role selects.
    #[must_use]
    pub fn field_of<'a>(self, record: &'a PackageRecord) -> &'a str {
        match self {
            Self::Shipper => &record.shipper,
            Self::Insurer => &record.insurer,
            Self::Consignee => &record.consignee,
            Self::Provider => &record.provider,
        }
    }

    /// Role name, identical to the form accepted by `FromStr`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shipper => "Shipper",
            Self::Insurer => "Insurer",
            Self::Consignee => "Consignee",
            Self::Provider => "Provider",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Shipper" => Ok(Self::Shipper),
            "Insurer" => Ok(Self::Insurer),
            "Consignee" => Ok(Self::Consignee),
            "Provider" => Ok(Self::Provider),
            other => Err(LedgerError::InvalidArgument {
                message: format!(
                    "unknown role {other:?}, expected Shipper, Insurer, Consignee or Provider"
                ),
            }),
        }
    }
}

/// Creation parameters for a package record.
///
/// Everything except the lifecycle status, which is always `Created` for a
/// new record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPackage {
    /// Globally unique identifier; doubles as the storage key.
    pub id: String,
    /// Shipping party.
    pub shipper: String,
    /// Insuring party.
    pub insurer: String,
    /// Receiving party.
    pub consignee: String,
    /// Carrying party.
    pub provider: String,
    /// Lower bound of the acceptable temperature range.
    pub temperature_min: i32,
    /// Upper bound of the acceptable temperature range.
    pub temperature_max: i32,
    /// Free-form description of the contents.
    pub description: String,
}

/// The canonical package entity, stored under its `id`.
///
/// All identity fields and the temperature range are immutable once created;
/// only `status` changes over the record's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    /// Globally unique identifier; the exact key the record is stored under.
    pub id: String,
    /// Shipping party.
    pub shipper: String,
    /// Insuring party.
    pub insurer: String,
    /// Receiving party.
    pub consignee: String,
    /// Carrying party.
    pub provider: String,
    /// Lower bound of the acceptable temperature range.
    pub temperature_min: i32,
    /// Upper bound of the acceptable temperature range.
    pub temperature_max: i32,
    /// Free-form description of the contents.
    pub description: String,
    /// Current lifecycle status.
    pub status: PackageStatus,
}

impl PackageRecord {
    /// Builds the initial record for a newly created package.
    #[must_use]
    pub fn new(package: NewPackage) -> Self {
        Self {
            id: package.id,
            shipper: package.shipper,
            insurer: package.insurer,
            consignee: package.consignee,
            provider: package.provider,
            temperature_min: package.temperature_min,
            temperature_max: package.temperature_max,
            description: package.description,
            status: PackageStatus::Created,
        }
    }

    /// Whether `reading` falls outside the acceptable temperature range.
    #[must_use]
    pub const fn is_excursion(&self, reading: i32) -> bool {
        reading < self.temperature_min || reading > self.temperature_max
    }
}

/// The single well-known record enumerating every package id ever created.
///
/// Insertion order is preserved and nothing is ever removed; queries replay
/// this list to scan the full record set in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageIndex {
    /// All package ids, in creation order.
    pub ids: Vec<String>,
}

impl PackageIndex {
    /// Whether `id` is already present.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }
}
