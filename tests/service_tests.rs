mod common;

use common::{at, sample_farm};
use farm_ledger_core::core::services::{
    validate_records, CostTypeService, CropFieldService, LedgerEntryService, RecordRules,
    SeasonService,
};
use farm_ledger_core::domain::{CostType, CropField, LedgerEntry, RecordKind, Season};
use farm_ledger_core::errors::ValidationError;

#[test]
fn sample_farm_is_valid() {
    validate_records(&sample_farm()).expect("sample snapshot validates");
}

#[test]
fn empty_dimension_tables_are_invalid() {
    let crop = CropFieldService.validate_all(&[]).unwrap_err();
    let cost = CostTypeService.validate_all(&[]).unwrap_err();
    let season = SeasonService.validate_all(&[]).unwrap_err();
    for (err, kind) in [
        (crop, RecordKind::CropField),
        (cost, RecordKind::CostType),
        (season, RecordKind::Season),
    ] {
        assert!(
            matches!(err, ValidationError::TableInvalid { .. }),
            "unexpected error: {err:?}"
        );
        assert_eq!(err.kind(), kind);
    }
}

#[test]
fn snapshot_with_dangling_entry_is_rejected() {
    let mut farm = sample_farm();
    farm.entries.push(LedgerEntry::new(7, 9, 1, 3, at(2025, 5, 1), 10.0));
    let err = validate_records(&farm).expect_err("crop field 9 does not exist");
    assert!(
        matches!(err, ValidationError::TableInvalid { kind: RecordKind::LedgerEntry, offending: Some(7), .. }),
        "unexpected error: {err:?}"
    );
}

#[test]
fn snapshot_reports_first_broken_table() {
    let mut farm = sample_farm();
    farm.cost_types.retain(|cost_type| cost_type.is_expense);
    let err = validate_records(&farm).expect_err("no profit type");
    assert_eq!(err.kind(), RecordKind::CostType);
}

#[test]
fn sole_records_cannot_be_deleted() {
    let field = vec![CropField::new(1, "Only", 1.0)];
    let season = vec![Season::open(1, "Only", at(2025, 1, 1))];
    let cost_types = vec![CostType::expense(1, "Seed"), CostType::profit(2, "Sale")];

    assert!(matches!(
        CropFieldService.prepare_delete(1, &field),
        Err(ValidationError::RecordDeletionUnsafe { .. })
    ));
    assert!(matches!(
        SeasonService.prepare_delete(1, &season),
        Err(ValidationError::RecordDeletionUnsafe { .. })
    ));
    assert!(matches!(
        CostTypeService.prepare_delete(1, &cost_types),
        Err(ValidationError::RecordDeletionUnsafe { .. })
    ));
}

#[test]
fn adding_a_season_hands_over_the_open_end() {
    let farm = sample_farm();
    let change = SeasonService
        .prepare_add(Season::open(4, "2026", at(2026, 1, 1)), &farm.seasons)
        .expect("starts after 2025");
    let seasons = change.apply(&farm.seasons);
    SeasonService.validate_all(&seasons).expect("chain intact");
    let previous = seasons.iter().find(|season| season.id == 3).unwrap();
    assert!(!previous.is_open());
    assert_eq!(SeasonService::current(&seasons).map(|s| s.name.as_str()), Some("2026"));
}

#[test]
fn deleting_a_cost_type_lists_cascading_entries() {
    let farm = sample_farm();
    CostTypeService
        .prepare_delete(2, &farm.cost_types)
        .expect("seed still covers expenses");
    let cascade = LedgerEntryService::dependents(&farm.entries, RecordKind::CostType, 2);
    assert_eq!(cascade, vec![2, 5]);
}

#[test]
fn entry_commit_pipeline_sanitizes_amount_text() {
    let farm = sample_farm();
    let amount = LedgerEntryService::amount_from_input(" -1.250,75 ").expect("parses");
    let service = LedgerEntryService::with_dimensions(farm.dimensions());
    let candidate = LedgerEntry::new(7, 1, 1, 3, at(2025, 6, 1), amount);
    let change = service
        .prepare_add(candidate, &farm.entries)
        .expect("valid entry");
    assert_eq!(change.target.amount, 1250.75);

    let duplicate = LedgerEntry::new(1, 1, 1, 3, at(2025, 6, 1), 1.0);
    let err = service
        .prepare_add(duplicate, &farm.entries)
        .expect_err("id taken");
    assert!(matches!(
        err,
        ValidationError::InvalidRecordProperty { property: "id", .. }
    ));
}

#[test]
fn editing_an_unknown_record_is_not_found() {
    let farm = sample_farm();
    let err = SeasonService
        .prepare_edit(Season::open(42, "Ghost", at(2030, 1, 1)), &farm.seasons)
        .unwrap_err();
    assert_eq!(
        err,
        ValidationError::RecordNotFound {
            kind: RecordKind::Season,
            id: 42
        }
    );
    assert_eq!(err.to_string(), "season 42 not found");
}
