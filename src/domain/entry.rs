use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::common::{Identifiable, RecordId, RecordKind};

/// A dated balance line booked against a crop field, cost type, and season.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerEntry {
    pub id: RecordId,
    pub crop_field_id: RecordId,
    pub cost_type_id: RecordId,
    pub season_id: RecordId,
    pub date_added: NaiveDateTime,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl LedgerEntry {
    pub fn new(
        id: RecordId,
        crop_field_id: RecordId,
        cost_type_id: RecordId,
        season_id: RecordId,
        date_added: NaiveDateTime,
        amount: f64,
    ) -> Self {
        Self {
            id,
            crop_field_id,
            cost_type_id,
            season_id,
            date_added,
            amount,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Returns the foreign key this entry holds for the given dimension table.
    pub fn reference(&self, kind: RecordKind) -> Option<RecordId> {
        match kind {
            RecordKind::CropField => Some(self.crop_field_id),
            RecordKind::CostType => Some(self.cost_type_id),
            RecordKind::Season => Some(self.season_id),
            RecordKind::LedgerEntry => None,
        }
    }
}

impl Identifiable for LedgerEntry {
    fn id(&self) -> RecordId {
        self.id
    }
}
