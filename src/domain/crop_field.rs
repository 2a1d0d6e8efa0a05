use serde::{Deserialize, Serialize};

use crate::domain::common::{Identifiable, NamedEntity, RecordId};

/// A cultivated plot that ledger entries are booked against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropField {
    pub id: RecordId,
    pub name: String,
    /// Cultivated area in hectares; must stay strictly positive.
    pub hectares: f64,
}

impl CropField {
    pub fn new(id: RecordId, name: impl Into<String>, hectares: f64) -> Self {
        Self {
            id,
            name: name.into(),
            hectares,
        }
    }
}

impl Identifiable for CropField {
    fn id(&self) -> RecordId {
        self.id
    }
}

impl NamedEntity for CropField {
    fn name(&self) -> &str {
        &self.name
    }
}
