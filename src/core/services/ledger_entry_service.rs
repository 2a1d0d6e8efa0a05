//! Commit pipeline for [`LedgerEntry`] records.

use crate::core::services::{
    ensure_id_available, ensure_unique_ids, locate, Changeset, RecordRules, ServiceResult,
};
use crate::core::utils::parse_decimal;
use crate::domain::{Dimensions, LedgerEntry, RecordId, RecordKind};
use crate::errors::ValidationError;

const REFERENCES: [(RecordKind, &str); 3] = [
    (RecordKind::CropField, "crop_field_id"),
    (RecordKind::CostType, "cost_type_id"),
    (RecordKind::Season, "season_id"),
];

/// Guards ledger entries: non-negative amounts and, when dimension tables are
/// supplied, resolvable foreign keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct LedgerEntryService<'a> {
    dimensions: Option<Dimensions<'a>>,
}

impl<'a> LedgerEntryService<'a> {
    /// Checks amounts only.
    pub fn new() -> Self {
        Self { dimensions: None }
    }

    /// Checks amounts and foreign keys against the supplied tables.
    pub fn with_dimensions(dimensions: Dimensions<'a>) -> Self {
        Self {
            dimensions: Some(dimensions),
        }
    }

    /// Parses user-typed amount text, accepting either decimal separator.
    ///
    /// Negative input is folded to its absolute value rather than rejected.
    pub fn amount_from_input(raw: &str) -> ServiceResult<f64> {
        parse_decimal(raw).map(f64::abs).ok_or_else(|| {
            ValidationError::property(
                RecordKind::LedgerEntry,
                "amount",
                raw,
                "enter a number such as 1250.50 or 1250,50",
            )
        })
    }

    /// Ids of the entries that reference the given dimension record.
    ///
    /// Deleting that record cascades to these entries; the persistence layer
    /// performs the cascade.
    pub fn dependents(entries: &[LedgerEntry], kind: RecordKind, id: RecordId) -> Vec<RecordId> {
        entries
            .iter()
            .filter(|entry| entry.reference(kind) == Some(id))
            .map(|entry| entry.id)
            .collect()
    }

    fn normalized(candidate: LedgerEntry) -> ServiceResult<LedgerEntry> {
        if !candidate.amount.is_finite() {
            return Err(ValidationError::property(
                RecordKind::LedgerEntry,
                "amount",
                candidate.amount,
                "amount must be a finite number",
            ));
        }
        let note = candidate
            .note
            .as_deref()
            .map(str::trim)
            .filter(|note| !note.is_empty())
            .map(str::to_string);
        Ok(LedgerEntry {
            amount: candidate.amount.abs(),
            note,
            ..candidate
        })
    }

    fn unresolved(&self, entry: &LedgerEntry) -> Option<(&'static str, RecordId)> {
        let dimensions = self.dimensions?;
        REFERENCES.iter().find_map(|(kind, property)| {
            let id = entry.reference(*kind)?;
            (!dimensions.resolves(*kind, id)).then_some((*property, id))
        })
    }

    fn checked(&self, candidate: LedgerEntry) -> ServiceResult<LedgerEntry> {
        let entry = Self::normalized(candidate)?;
        if let Some((property, id)) = self.unresolved(&entry) {
            return Err(ValidationError::property(
                RecordKind::LedgerEntry,
                property,
                id,
                "referenced record does not exist",
            ));
        }
        Ok(entry)
    }
}

impl<'a> RecordRules for LedgerEntryService<'a> {
    type Record = LedgerEntry;
    const KIND: RecordKind = RecordKind::LedgerEntry;

    fn validate_all(&self, records: &[LedgerEntry]) -> ServiceResult<()> {
        ensure_unique_ids(Self::KIND, records)?;
        for entry in records {
            let problem = if !entry.amount.is_finite() {
                Some("non-finite")
            } else if entry.amount < 0.0 {
                Some("negative")
            } else {
                None
            };
            if let Some(problem) = problem {
                return Err(ValidationError::table(
                    Self::KIND,
                    format!("entry {} has {problem} amount {}", entry.id, entry.amount),
                    Some(entry.id),
                ));
            }
            if let Some((property, id)) = self.unresolved(entry) {
                return Err(ValidationError::table(
                    Self::KIND,
                    format!("entry {} references missing `{property}` {id}", entry.id),
                    Some(entry.id),
                ));
            }
        }
        Ok(())
    }

    fn prepare_add(
        &self,
        candidate: LedgerEntry,
        existing: &[LedgerEntry],
    ) -> ServiceResult<Changeset<LedgerEntry>> {
        ensure_id_available(Self::KIND, candidate.id, existing)?;
        Ok(Changeset::added(self.checked(candidate)?))
    }

    fn prepare_edit(
        &self,
        candidate: LedgerEntry,
        existing: &[LedgerEntry],
    ) -> ServiceResult<Changeset<LedgerEntry>> {
        let previous = locate(Self::KIND, candidate.id, existing)?.clone();
        Ok(Changeset::edited(self.checked(candidate)?, previous))
    }

    fn prepare_delete(
        &self,
        id: RecordId,
        existing: &[LedgerEntry],
    ) -> ServiceResult<Changeset<LedgerEntry>> {
        let target = locate(Self::KIND, id, existing)?.clone();
        Ok(Changeset::deleted(target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CostType, CropField, Season};
    use chrono::NaiveDate;

    fn entry(id: RecordId, amount: f64) -> LedgerEntry {
        let when = NaiveDate::from_ymd_opt(2025, 4, 2)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        LedgerEntry::new(id, 1, 1, 1, when, amount)
    }

    #[test]
    fn negative_amount_is_normalized_on_add() {
        let change = LedgerEntryService::new()
            .prepare_add(entry(1, -42.5), &[])
            .expect("normalized");
        assert_eq!(change.target.amount, 42.5);
    }

    #[test]
    fn non_finite_amount_is_rejected() {
        let err = LedgerEntryService::new()
            .prepare_add(entry(1, f64::NAN), &[])
            .expect_err("nan");
        assert!(matches!(
            err,
            ValidationError::InvalidRecordProperty { property: "amount", .. }
        ));
    }

    #[test]
    fn validate_all_rejects_negative_amounts() {
        let err = LedgerEntryService::new()
            .validate_all(&[entry(1, 10.0), entry(2, -0.5)])
            .expect_err("negative");
        assert!(matches!(err, ValidationError::TableInvalid { offending: Some(2), .. }));
        LedgerEntryService::new()
            .validate_all(&[])
            .expect("entries may be empty");
    }

    #[test]
    fn validate_all_names_non_finite_amounts() {
        for amount in [f64::NAN, f64::INFINITY] {
            let err = LedgerEntryService::new()
                .validate_all(&[entry(1, 10.0), entry(2, amount)])
                .expect_err("non-finite");
            assert!(
                matches!(
                    err,
                    ValidationError::TableInvalid { ref reason, offending: Some(2), .. }
                        if reason.contains("non-finite") && !reason.contains("negative")
                ),
                "unexpected error: {err:?}"
            );
        }
        let err = LedgerEntryService::new()
            .validate_all(&[entry(1, -1.0)])
            .expect_err("negative");
        assert!(matches!(
            err,
            ValidationError::TableInvalid { ref reason, .. } if reason.contains("negative")
        ));
    }

    #[test]
    fn amount_input_accepts_both_separators() {
        assert_eq!(LedgerEntryService::amount_from_input("12,5").unwrap(), 12.5);
        assert_eq!(LedgerEntryService::amount_from_input("-12.5").unwrap(), 12.5);
        assert!(LedgerEntryService::amount_from_input("twelve").is_err());
    }

    #[test]
    fn dangling_references_are_reported() {
        let fields = vec![CropField::new(1, "North", 4.0)];
        let cost_types = vec![CostType::expense(1, "Seed")];
        let seasons = vec![Season::open(
            7,
            "2025",
            NaiveDate::from_ymd_opt(2025, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        )];
        let service =
            LedgerEntryService::with_dimensions(Dimensions::new(&fields, &cost_types, &seasons));
        let err = service
            .prepare_add(entry(1, 5.0), &[])
            .expect_err("season 1 is missing");
        assert!(matches!(
            err,
            ValidationError::InvalidRecordProperty { property: "season_id", .. }
        ));

        let mut fixed = entry(1, 5.0);
        fixed.season_id = 7;
        service.prepare_add(fixed, &[]).expect("references resolve");
    }

    #[test]
    fn dependents_lists_cascading_entries() {
        let mut other = entry(2, 1.0);
        other.cost_type_id = 5;
        let entries = vec![entry(1, 1.0), other, entry(3, 1.0)];
        assert_eq!(
            LedgerEntryService::dependents(&entries, RecordKind::CostType, 1),
            vec![1, 3]
        );
        assert!(LedgerEntryService::dependents(&entries, RecordKind::LedgerEntry, 1).is_empty());
    }
}
