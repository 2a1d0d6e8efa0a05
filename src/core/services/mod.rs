//! Validated operations over the farm record tables.
//!
//! Each record kind exposes the same four entry points through [`RecordRules`]:
//! a full-table scan, and three `prepare_*` checks that turn a pending
//! mutation into a [`Changeset`] the caller commits atomically.

pub mod cost_type_service;
pub mod crop_field_service;
pub mod ledger_entry_service;
pub mod query_service;
pub mod report_service;
pub mod season_service;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

pub use cost_type_service::CostTypeService;
pub use crop_field_service::CropFieldService;
pub use ledger_entry_service::LedgerEntryService;
pub use query_service::{FilterSpec, IdSelection, QueryService, SortDirection, SortKey};
pub use report_service::{FarmReport, FieldBreakdown, ReportLine, ReportService};
pub use season_service::SeasonService;

use crate::domain::{FarmRecords, Identifiable, NamedEntity, RecordId, RecordKind};
use crate::errors::ValidationError;

pub type ServiceResult<T> = Result<T, ValidationError>;

/// Invariant checks shared by every record table.
pub trait RecordRules {
    type Record: Identifiable + Clone;

    /// Table the rules guard.
    const KIND: RecordKind;

    /// Scans a whole snapshot for table-level and per-record violations.
    fn validate_all(&self, records: &[Self::Record]) -> ServiceResult<()>;

    /// Checks a new record against field-level rules without a full table scan.
    fn prepare_add(
        &self,
        candidate: Self::Record,
        existing: &[Self::Record],
    ) -> ServiceResult<Changeset<Self::Record>>;

    /// Locates the record by id and checks the replacement.
    fn prepare_edit(
        &self,
        candidate: Self::Record,
        existing: &[Self::Record],
    ) -> ServiceResult<Changeset<Self::Record>>;

    /// Verifies that removing the record keeps the table valid.
    fn prepare_delete(
        &self,
        id: RecordId,
        existing: &[Self::Record],
    ) -> ServiceResult<Changeset<Self::Record>>;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ChangeKind {
    Add,
    Edit,
    Delete,
}

/// An approved mutation: the target record plus any siblings that change with it.
///
/// A changeset is all-or-nothing. Committing `target` without `adjusted`
/// leaves the table invalid.
#[derive(Debug, Clone, PartialEq)]
pub struct Changeset<T> {
    pub kind: ChangeKind,
    pub target: T,
    /// The stored record an edit replaces.
    pub previous: Option<T>,
    pub adjusted: Vec<T>,
}

impl<T: Identifiable + Clone> Changeset<T> {
    pub fn added(target: T) -> Self {
        Self {
            kind: ChangeKind::Add,
            target,
            previous: None,
            adjusted: Vec::new(),
        }
    }

    pub fn edited(target: T, previous: T) -> Self {
        Self {
            kind: ChangeKind::Edit,
            target,
            previous: Some(previous),
            adjusted: Vec::new(),
        }
    }

    pub fn deleted(target: T) -> Self {
        Self {
            kind: ChangeKind::Delete,
            target,
            previous: None,
            adjusted: Vec::new(),
        }
    }

    pub fn with_adjusted(mut self, record: T) -> Self {
        self.adjusted.push(record);
        self
    }

    /// Returns the snapshot that results from committing this changeset.
    pub fn apply(&self, existing: &[T]) -> Vec<T> {
        let target_id = self.target.id();
        let mut next: Vec<T> = existing
            .iter()
            .filter(|record| !(self.kind == ChangeKind::Delete && record.id() == target_id))
            .map(|record| {
                if self.kind == ChangeKind::Edit && record.id() == target_id {
                    return self.target.clone();
                }
                self.adjusted
                    .iter()
                    .find(|adjusted| adjusted.id() == record.id())
                    .unwrap_or(record)
                    .clone()
            })
            .collect();
        if self.kind == ChangeKind::Add {
            next.push(self.target.clone());
        }
        next
    }
}

/// Runs every table validation against a loaded snapshot, dimension tables first.
pub fn validate_records(records: &FarmRecords) -> ServiceResult<()> {
    CropFieldService.validate_all(&records.crop_fields)?;
    CostTypeService.validate_all(&records.cost_types)?;
    SeasonService.validate_all(&records.seasons)?;
    LedgerEntryService::with_dimensions(records.dimensions()).validate_all(&records.entries)?;
    tracing::debug!(
        crop_fields = records.crop_fields.len(),
        cost_types = records.cost_types.len(),
        seasons = records.seasons.len(),
        entries = records.entries.len(),
        "farm records validated"
    );
    Ok(())
}

pub(crate) fn ensure_unique_ids<T: Identifiable>(
    kind: RecordKind,
    records: &[T],
) -> ServiceResult<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.id()) {
            return Err(ValidationError::table(
                kind,
                format!("id {} is used by more than one record", record.id()),
                Some(record.id()),
            ));
        }
    }
    Ok(())
}

pub(crate) fn ensure_id_available<T: Identifiable>(
    kind: RecordKind,
    id: RecordId,
    existing: &[T],
) -> ServiceResult<()> {
    if existing.iter().any(|record| record.id() == id) {
        Err(ValidationError::property(
            kind,
            "id",
            id,
            "id is already in use",
        ))
    } else {
        Ok(())
    }
}

pub(crate) fn locate<T: Identifiable>(
    kind: RecordKind,
    id: RecordId,
    existing: &[T],
) -> ServiceResult<&T> {
    existing
        .iter()
        .find(|record| record.id() == id)
        .ok_or_else(|| ValidationError::not_found(kind, id))
}

/// Trims the record's name, rejecting it when nothing is left.
pub(crate) fn normalized_name<T: NamedEntity>(kind: RecordKind, record: &T) -> ServiceResult<String> {
    let name = record.name();
    let trimmed = name.trim();
    if trimmed.is_empty() {
        Err(ValidationError::property(
            kind,
            "name",
            name,
            "name must not be empty",
        ))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Re-raises a record-level failure found during a table scan as a table failure.
pub(crate) fn as_table_error(err: ValidationError, offending: RecordId) -> ValidationError {
    match err {
        ValidationError::InvalidRecordProperty {
            kind,
            property,
            value,
            hint,
        } => ValidationError::table(
            kind,
            format!("record {offending} has invalid `{property}` = `{value}`: {hint}"),
            Some(offending),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests;
