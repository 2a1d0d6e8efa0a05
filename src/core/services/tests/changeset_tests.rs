use crate::core::services::{ChangeKind, Changeset};
use crate::domain::CropField;

fn fields() -> Vec<CropField> {
    vec![
        CropField::new(1, "North", 1.0),
        CropField::new(2, "South", 2.0),
        CropField::new(3, "West", 3.0),
    ]
}

#[test]
fn add_appends_target() {
    let change = Changeset::added(CropField::new(4, "East", 4.0));
    let next = change.apply(&fields());
    assert_eq!(next.len(), 4);
    assert_eq!(next[3].name, "East");
    assert_eq!(change.kind, ChangeKind::Add);
}

#[test]
fn edit_replaces_in_place() {
    let original = fields();
    let change = Changeset::edited(CropField::new(2, "South bank", 2.5), original[1].clone());
    let next = change.apply(&original);
    assert_eq!(next.len(), 3);
    assert_eq!(next[1].name, "South bank");
    assert_eq!(original[1].name, "South", "input snapshot is untouched");
}

#[test]
fn delete_removes_target_and_applies_adjustments() {
    let change = Changeset::deleted(CropField::new(3, "West", 3.0))
        .with_adjusted(CropField::new(1, "North (merged)", 4.0));
    let next = change.apply(&fields());
    assert_eq!(next.len(), 2);
    assert_eq!(next[0].name, "North (merged)");
    assert!(next.iter().all(|field| field.id != 3));
}
