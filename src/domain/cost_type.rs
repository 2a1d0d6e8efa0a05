use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::common::{Identifiable, NamedEntity, RecordId};

/// Categorises ledger activity as a cost or as income.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CostType {
    pub id: RecordId,
    pub name: String,
    /// `true` for costs, `false` for income.
    pub is_expense: bool,
}

impl CostType {
    pub fn new(id: RecordId, name: impl Into<String>, is_expense: bool) -> Self {
        Self {
            id,
            name: name.into(),
            is_expense,
        }
    }

    pub fn expense(id: RecordId, name: impl Into<String>) -> Self {
        Self::new(id, name, true)
    }

    pub fn profit(id: RecordId, name: impl Into<String>) -> Self {
        Self::new(id, name, false)
    }

    pub fn category(&self) -> CostCategory {
        CostCategory::from_flag(self.is_expense)
    }
}

impl Identifiable for CostType {
    fn id(&self) -> RecordId {
        self.id
    }
}

impl NamedEntity for CostType {
    fn name(&self) -> &str {
        &self.name
    }
}

/// The two report buckets a cost type can fall into.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CostCategory {
    Expense,
    Profit,
}

impl CostCategory {
    pub fn from_flag(is_expense: bool) -> Self {
        if is_expense {
            CostCategory::Expense
        } else {
            CostCategory::Profit
        }
    }
}

impl fmt::Display for CostCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CostCategory::Expense => "expense",
            CostCategory::Profit => "profit",
        };
        f.write_str(label)
    }
}
