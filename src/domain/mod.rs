pub mod common;
pub mod cost_type;
pub mod crop_field;
pub mod entry;
pub mod records;
pub mod season;

pub use common::{tick, Identifiable, NamedEntity, RecordId, RecordKind};
pub use cost_type::{CostCategory, CostType};
pub use crop_field::CropField;
pub use entry::LedgerEntry;
pub use records::{Dimensions, FarmRecords};
pub use season::Season;
