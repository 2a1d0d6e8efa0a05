//! Invariant checks for [`CostType`] records.

use crate::core::services::{
    as_table_error, ensure_id_available, ensure_unique_ids, locate, normalized_name, Changeset,
    RecordRules, ServiceResult,
};
use crate::domain::{CostCategory, CostType, RecordId, RecordKind};
use crate::errors::ValidationError;

/// Guards the cost type table: both the expense and the profit category stay covered.
#[derive(Debug, Clone, Copy, Default)]
pub struct CostTypeService;

impl CostTypeService {
    fn checked(candidate: CostType) -> ServiceResult<CostType> {
        let name = normalized_name(RecordKind::CostType, &candidate)?;
        Ok(CostType { name, ..candidate })
    }

    /// Counts records of `category`, ignoring the record with id `except`.
    fn siblings(records: &[CostType], category: CostCategory, except: Option<RecordId>) -> usize {
        records
            .iter()
            .filter(|cost_type| cost_type.category() == category && Some(cost_type.id) != except)
            .count()
    }
}

impl RecordRules for CostTypeService {
    type Record = CostType;
    const KIND: RecordKind = RecordKind::CostType;

    fn validate_all(&self, records: &[CostType]) -> ServiceResult<()> {
        if records.is_empty() {
            return Err(ValidationError::table(
                Self::KIND,
                "at least one cost type is required",
                None,
            ));
        }
        for category in [CostCategory::Expense, CostCategory::Profit] {
            if Self::siblings(records, category, None) == 0 {
                return Err(ValidationError::table(
                    Self::KIND,
                    format!("at least one {category} cost type is required"),
                    None,
                ));
            }
        }
        ensure_unique_ids(Self::KIND, records)?;
        for cost_type in records {
            Self::checked(cost_type.clone()).map_err(|err| as_table_error(err, cost_type.id))?;
        }
        Ok(())
    }

    fn prepare_add(
        &self,
        candidate: CostType,
        existing: &[CostType],
    ) -> ServiceResult<Changeset<CostType>> {
        ensure_id_available(Self::KIND, candidate.id, existing)?;
        Ok(Changeset::added(Self::checked(candidate)?))
    }

    fn prepare_edit(
        &self,
        candidate: CostType,
        existing: &[CostType],
    ) -> ServiceResult<Changeset<CostType>> {
        let previous = locate(Self::KIND, candidate.id, existing)?.clone();
        let updated = Self::checked(candidate)?;
        if updated.is_expense != previous.is_expense
            && Self::siblings(existing, previous.category(), Some(previous.id)) == 0
        {
            tracing::debug!(
                id = previous.id,
                category = %previous.category(),
                "refusing to move the last cost type out of its category"
            );
            return Err(ValidationError::property(
                Self::KIND,
                "is_expense",
                updated.is_expense,
                format!(
                    "`{}` is the last {} cost type",
                    previous.name,
                    previous.category()
                ),
            ));
        }
        Ok(Changeset::edited(updated, previous))
    }

    fn prepare_delete(
        &self,
        id: RecordId,
        existing: &[CostType],
    ) -> ServiceResult<Changeset<CostType>> {
        let target = locate(Self::KIND, id, existing)?.clone();
        if Self::siblings(existing, target.category(), Some(id)) == 0 {
            tracing::debug!(id, category = %target.category(), "refusing to delete the last cost type of its category");
            return Err(ValidationError::deletion(
                Self::KIND,
                id,
                format!("at least one {} cost type must remain", target.category()),
            ));
        }
        Ok(Changeset::deleted(target))
    }
}
