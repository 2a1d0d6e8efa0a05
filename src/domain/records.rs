//! In-memory snapshot of the four record tables handed in by the persistence layer.

use serde::{Deserialize, Serialize};

use crate::domain::{
    common::{Identifiable, RecordId, RecordKind},
    cost_type::CostType,
    crop_field::CropField,
    entry::LedgerEntry,
    season::Season,
};

/// Owned snapshot of every table the core reasons about.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FarmRecords {
    #[serde(default)]
    pub crop_fields: Vec<CropField>,
    #[serde(default)]
    pub cost_types: Vec<CostType>,
    #[serde(default)]
    pub seasons: Vec<Season>,
    #[serde(default)]
    pub entries: Vec<LedgerEntry>,
}

impl FarmRecords {
    pub fn new(
        crop_fields: Vec<CropField>,
        cost_types: Vec<CostType>,
        seasons: Vec<Season>,
        entries: Vec<LedgerEntry>,
    ) -> Self {
        Self {
            crop_fields,
            cost_types,
            seasons,
            entries,
        }
    }

    /// Borrows the dimension tables used to resolve entry foreign keys.
    pub fn dimensions(&self) -> Dimensions<'_> {
        Dimensions {
            crop_fields: &self.crop_fields,
            cost_types: &self.cost_types,
            seasons: &self.seasons,
        }
    }
}

/// Borrowed view over the crop field, cost type, and season tables.
#[derive(Debug, Clone, Copy)]
pub struct Dimensions<'a> {
    pub crop_fields: &'a [CropField],
    pub cost_types: &'a [CostType],
    pub seasons: &'a [Season],
}

impl<'a> Dimensions<'a> {
    pub fn new(
        crop_fields: &'a [CropField],
        cost_types: &'a [CostType],
        seasons: &'a [Season],
    ) -> Self {
        Self {
            crop_fields,
            cost_types,
            seasons,
        }
    }

    pub fn crop_field(&self, id: RecordId) -> Option<&'a CropField> {
        find(self.crop_fields, id)
    }

    pub fn cost_type(&self, id: RecordId) -> Option<&'a CostType> {
        find(self.cost_types, id)
    }

    pub fn season(&self, id: RecordId) -> Option<&'a Season> {
        find(self.seasons, id)
    }

    /// Returns `true` when the table for `kind` holds a record with `id`.
    pub fn resolves(&self, kind: RecordKind, id: RecordId) -> bool {
        match kind {
            RecordKind::CropField => self.crop_field(id).is_some(),
            RecordKind::CostType => self.cost_type(id).is_some(),
            RecordKind::Season => self.season(id).is_some(),
            RecordKind::LedgerEntry => false,
        }
    }
}

fn find<T: Identifiable>(records: &[T], id: RecordId) -> Option<&T> {
    records.iter().find(|record| record.id() == id)
}
