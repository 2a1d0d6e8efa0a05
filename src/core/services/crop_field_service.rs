//! Invariant checks for [`CropField`] records.

use crate::core::services::{
    as_table_error, ensure_id_available, ensure_unique_ids, locate, normalized_name, Changeset,
    RecordRules, ServiceResult,
};
use crate::domain::{CropField, RecordId, RecordKind};
use crate::errors::ValidationError;

/// Guards the crop field table: at least one field, each named and with a positive area.
#[derive(Debug, Clone, Copy, Default)]
pub struct CropFieldService;

impl CropFieldService {
    fn checked(candidate: CropField) -> ServiceResult<CropField> {
        let name = normalized_name(RecordKind::CropField, &candidate)?;
        if !candidate.hectares.is_finite() || candidate.hectares <= 0.0 {
            return Err(ValidationError::property(
                RecordKind::CropField,
                "hectares",
                candidate.hectares,
                "area must be greater than zero",
            ));
        }
        Ok(CropField { name, ..candidate })
    }
}

impl RecordRules for CropFieldService {
    type Record = CropField;
    const KIND: RecordKind = RecordKind::CropField;

    fn validate_all(&self, records: &[CropField]) -> ServiceResult<()> {
        if records.is_empty() {
            return Err(ValidationError::table(
                Self::KIND,
                "at least one crop field is required",
                None,
            ));
        }
        ensure_unique_ids(Self::KIND, records)?;
        for field in records {
            Self::checked(field.clone()).map_err(|err| as_table_error(err, field.id))?;
        }
        Ok(())
    }

    fn prepare_add(
        &self,
        candidate: CropField,
        existing: &[CropField],
    ) -> ServiceResult<Changeset<CropField>> {
        ensure_id_available(Self::KIND, candidate.id, existing)?;
        Ok(Changeset::added(Self::checked(candidate)?))
    }

    fn prepare_edit(
        &self,
        candidate: CropField,
        existing: &[CropField],
    ) -> ServiceResult<Changeset<CropField>> {
        let previous = locate(Self::KIND, candidate.id, existing)?.clone();
        Ok(Changeset::edited(Self::checked(candidate)?, previous))
    }

    fn prepare_delete(
        &self,
        id: RecordId,
        existing: &[CropField],
    ) -> ServiceResult<Changeset<CropField>> {
        let target = locate(Self::KIND, id, existing)?.clone();
        if existing.len() <= 1 {
            tracing::debug!(id, "refusing to delete the last crop field");
            return Err(ValidationError::deletion(
                Self::KIND,
                id,
                "at least one crop field must remain",
            ));
        }
        Ok(Changeset::deleted(target))
    }
}
