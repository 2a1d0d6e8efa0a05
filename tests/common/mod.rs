#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use farm_ledger_core::domain::{CostType, CropField, FarmRecords, LedgerEntry, Season};

pub fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .expect("valid date")
        .and_hms_opt(0, 0, 0)
        .expect("valid time")
}

pub fn year_end(y: i32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, 12, 31)
        .expect("valid date")
        .and_hms_opt(23, 59, 59)
        .expect("valid time")
}

/// A small farm: two fields, three cost types, three seasons, six entries.
pub fn sample_farm() -> FarmRecords {
    let crop_fields = vec![
        CropField::new(1, "River plot", 8.0),
        CropField::new(2, "Hill", 2.5),
    ];
    let cost_types = vec![
        CostType::expense(1, "Seed"),
        CostType::expense(2, "Fuel"),
        CostType::profit(3, "Harvest sale"),
    ];
    let seasons = vec![
        Season::closed(1, "2023", at(2023, 1, 1), year_end(2023)),
        Season::closed(2, "2024", at(2024, 1, 1), year_end(2024)),
        Season::open(3, "2025", at(2025, 1, 1)),
    ];
    let entries = vec![
        LedgerEntry::new(1, 1, 1, 2, at(2024, 3, 10), 400.0),
        LedgerEntry::new(2, 1, 2, 2, at(2024, 4, 2), 120.0),
        LedgerEntry::new(3, 1, 3, 2, at(2024, 9, 15), 1500.0).with_note("wheat"),
        LedgerEntry::new(4, 2, 1, 3, at(2025, 3, 1), 90.0),
        LedgerEntry::new(5, 2, 2, 3, at(2025, 3, 1), 60.0),
        LedgerEntry::new(6, 2, 3, 1, at(2023, 10, 1), 300.0),
    ];
    FarmRecords::new(crop_fields, cost_types, seasons, entries)
}
