//! Aggregation helpers that turn filtered ledger entries into report buckets.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{CostCategory, CostType, Dimensions, LedgerEntry, RecordId};

/// Summed amount for one cost type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportLine {
    pub cost_type_id: RecordId,
    pub name: String,
    pub total: f64,
}

/// Expense and profit buckets with their totals.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FarmReport {
    pub expenses: Vec<ReportLine>,
    pub profits: Vec<ReportLine>,
    pub total_expense: f64,
    pub total_profit: f64,
    /// `total_profit - total_expense`.
    pub net_change: f64,
}

impl FarmReport {
    pub fn bucket(&self, category: CostCategory) -> &[ReportLine] {
        match category {
            CostCategory::Expense => &self.expenses,
            CostCategory::Profit => &self.profits,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty() && self.profits.is_empty()
    }
}

/// Per crop field totals, including the net result per hectare.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldBreakdown {
    pub crop_field_id: RecordId,
    pub name: String,
    pub hectares: f64,
    pub expense: f64,
    pub profit: f64,
    pub net_change: f64,
    pub net_per_hectare: f64,
}

pub struct ReportService;

impl ReportService {
    /// Groups entries by cost type and splits the sums into expense and profit buckets.
    ///
    /// Buckets are ordered by cost type name regardless of the entry order.
    /// Entries whose cost type is unknown are left out.
    pub fn aggregate(entries: &[LedgerEntry], cost_types: &[CostType]) -> FarmReport {
        let lookup: HashMap<RecordId, &CostType> = cost_types
            .iter()
            .map(|cost_type| (cost_type.id, cost_type))
            .collect();

        let mut sums: HashMap<RecordId, f64> = HashMap::new();
        let mut skipped = 0usize;
        for entry in entries {
            if lookup.contains_key(&entry.cost_type_id) {
                *sums.entry(entry.cost_type_id).or_default() += entry.amount;
            } else {
                skipped += 1;
            }
        }
        if skipped > 0 {
            tracing::warn!(skipped, "report skipped entries with unknown cost types");
        }

        let mut report = FarmReport::default();
        for (id, total) in sums {
            let Some(cost_type) = lookup.get(&id) else {
                continue;
            };
            let line = ReportLine {
                cost_type_id: id,
                name: cost_type.name.clone(),
                total,
            };
            match cost_type.category() {
                CostCategory::Expense => report.expenses.push(line),
                CostCategory::Profit => report.profits.push(line),
            }
        }
        // Totals follow bucket order, never hash order.
        report.expenses.sort_by(by_name);
        report.profits.sort_by(by_name);
        report.total_expense = bucket_total(&report.expenses);
        report.total_profit = bucket_total(&report.profits);
        report.net_change = report.total_profit - report.total_expense;
        report
    }

    /// Splits entries per crop field, ordered by field name.
    ///
    /// Every known field is listed, including fields without entries.
    pub fn by_crop_field(entries: &[LedgerEntry], dimensions: &Dimensions<'_>) -> Vec<FieldBreakdown> {
        let mut totals: HashMap<RecordId, (f64, f64)> = HashMap::new();
        for entry in entries {
            let Some(cost_type) = dimensions.cost_type(entry.cost_type_id) else {
                continue;
            };
            let slot = totals.entry(entry.crop_field_id).or_default();
            if cost_type.is_expense {
                slot.0 += entry.amount;
            } else {
                slot.1 += entry.amount;
            }
        }

        let mut rows: Vec<FieldBreakdown> = dimensions
            .crop_fields
            .iter()
            .map(|field| {
                let (expense, profit) = totals.get(&field.id).copied().unwrap_or_default();
                let net_change = profit - expense;
                FieldBreakdown {
                    crop_field_id: field.id,
                    name: field.name.clone(),
                    hectares: field.hectares,
                    expense,
                    profit,
                    net_change,
                    net_per_hectare: if field.hectares > 0.0 {
                        net_change / field.hectares
                    } else {
                        0.0
                    },
                }
            })
            .collect();
        rows.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then(a.crop_field_id.cmp(&b.crop_field_id))
        });
        rows
    }
}

fn bucket_total(lines: &[ReportLine]) -> f64 {
    lines.iter().map(|line| line.total).sum()
}

fn by_name(a: &ReportLine, b: &ReportLine) -> std::cmp::Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then(a.cost_type_id.cmp(&b.cost_type_id))
}
