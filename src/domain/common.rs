//! Shared traits, identifiers, and time constants for farm records.

use std::fmt;

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Integer identity assigned to every record by the persistence layer.
pub type RecordId = i64;

/// Smallest representable step on the season timeline: one second.
pub fn tick() -> Duration {
    Duration::seconds(1)
}

/// Exposes a stable identifier for records stored in a table.
pub trait Identifiable {
    fn id(&self) -> RecordId;
}

/// Provides read-only access to a record's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Enumerates the record tables the core validates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RecordKind {
    CropField,
    CostType,
    Season,
    LedgerEntry,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecordKind::CropField => "crop field",
            RecordKind::CostType => "cost type",
            RecordKind::Season => "season",
            RecordKind::LedgerEntry => "ledger entry",
        };
        f.write_str(label)
    }
}

// Re-export common dependencies so consumers can rely on this module as a façade.
pub use chrono;
pub use serde;
