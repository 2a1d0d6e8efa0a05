//! Filtering and ordering of ledger entries for listings.

use std::{
    cmp::{Ordering, Reverse},
    collections::BTreeSet,
    fmt,
};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::domain::{Dimensions, LedgerEntry, RecordId};

/// Accepted ids for one dimension of a [`FilterSpec`].
///
/// `Only` with an empty set selects nothing: "select nothing" shows nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum IdSelection {
    #[default]
    All,
    Only(BTreeSet<RecordId>),
}

impl IdSelection {
    pub fn only(ids: impl IntoIterator<Item = RecordId>) -> Self {
        IdSelection::Only(ids.into_iter().collect())
    }

    pub fn none() -> Self {
        IdSelection::Only(BTreeSet::new())
    }

    pub fn accepts(&self, id: RecordId) -> bool {
        match self {
            IdSelection::All => true,
            IdSelection::Only(ids) => ids.contains(&id),
        }
    }
}

/// Ordering applied to filtered entries.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    CostTypeName,
    #[default]
    DateAdded,
    SeasonStart,
    Amount,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SortKey::CostTypeName => "cost type",
            SortKey::DateAdded => "date added",
            SortKey::SeasonStart => "season start",
            SortKey::Amount => "amount",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Orients an ascending comparison; `Equal` stays `Equal` so ties keep input order.
    pub fn orient(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Which entries to list and in what order.
///
/// Every dimension defaults to accepting everything; date and amount ranges
/// are inclusive and default to the widest representable bounds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterSpec {
    #[serde(default)]
    pub crop_fields: IdSelection,
    #[serde(default)]
    pub cost_types: IdSelection,
    #[serde(default)]
    pub seasons: IdSelection,
    #[serde(default = "FilterSpec::min_date")]
    pub earliest: NaiveDateTime,
    #[serde(default = "FilterSpec::max_date")]
    pub latest: NaiveDateTime,
    #[serde(default = "FilterSpec::min_amount")]
    pub smallest: f64,
    #[serde(default = "FilterSpec::max_amount")]
    pub largest: f64,
    #[serde(default)]
    pub sort_key: SortKey,
    #[serde(default)]
    pub direction: SortDirection,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            crop_fields: IdSelection::All,
            cost_types: IdSelection::All,
            seasons: IdSelection::All,
            earliest: Self::min_date(),
            latest: Self::max_date(),
            smallest: Self::min_amount(),
            largest: Self::max_amount(),
            sort_key: SortKey::default(),
            direction: SortDirection::default(),
        }
    }
}

impl FilterSpec {
    /// Unrestricted filter ordered by the configured defaults.
    pub fn from_config(config: &Config) -> Self {
        Self::default().sorted_by(config.default_sort, config.default_direction)
    }

    pub fn min_date() -> NaiveDateTime {
        NaiveDateTime::MIN
    }

    pub fn max_date() -> NaiveDateTime {
        NaiveDateTime::MAX
    }

    pub fn min_amount() -> f64 {
        f64::MIN
    }

    pub fn max_amount() -> f64 {
        f64::MAX
    }

    pub fn with_crop_fields(mut self, selection: IdSelection) -> Self {
        self.crop_fields = selection;
        self
    }

    pub fn with_cost_types(mut self, selection: IdSelection) -> Self {
        self.cost_types = selection;
        self
    }

    pub fn with_seasons(mut self, selection: IdSelection) -> Self {
        self.seasons = selection;
        self
    }

    pub fn between(mut self, earliest: NaiveDateTime, latest: NaiveDateTime) -> Self {
        self.earliest = earliest;
        self.latest = latest;
        self
    }

    pub fn amount_between(mut self, smallest: f64, largest: f64) -> Self {
        self.smallest = smallest;
        self.largest = largest;
        self
    }

    pub fn sorted_by(mut self, key: SortKey, direction: SortDirection) -> Self {
        self.sort_key = key;
        self.direction = direction;
        self
    }

    /// Returns `true` when the entry passes every dimension and range.
    pub fn matches(&self, entry: &LedgerEntry) -> bool {
        self.crop_fields.accepts(entry.crop_field_id)
            && self.cost_types.accepts(entry.cost_type_id)
            && self.seasons.accepts(entry.season_id)
            && entry.date_added >= self.earliest
            && entry.date_added <= self.latest
            && entry.amount >= self.smallest
            && entry.amount <= self.largest
    }
}

/// Read-only listing over ledger entries.
pub struct QueryService;

impl QueryService {
    /// Returns the entries accepted by `filter`, ordered by its sort key.
    ///
    /// The sort is stable: entries with equal keys keep their input order in
    /// both directions. The input slice is never modified.
    pub fn filter_and_sort(
        entries: &[LedgerEntry],
        filter: &FilterSpec,
        dimensions: &Dimensions<'_>,
    ) -> Vec<LedgerEntry> {
        let mut selected: Vec<&LedgerEntry> =
            entries.iter().filter(|entry| filter.matches(entry)).collect();

        let direction = filter.direction;
        match filter.sort_key {
            SortKey::CostTypeName => {
                let name_of = |entry: &LedgerEntry| {
                    dimensions
                        .cost_type(entry.cost_type_id)
                        .map(|cost_type| cost_type.name.to_lowercase())
                        .unwrap_or_default()
                };
                match direction {
                    SortDirection::Ascending => selected.sort_by_cached_key(|entry| name_of(*entry)),
                    SortDirection::Descending => {
                        selected.sort_by_cached_key(|entry| Reverse(name_of(*entry)))
                    }
                }
            }
            SortKey::DateAdded => {
                selected.sort_by(|a, b| direction.orient(a.date_added.cmp(&b.date_added)));
            }
            SortKey::SeasonStart => {
                let start_of = |entry: &LedgerEntry| {
                    dimensions
                        .season(entry.season_id)
                        .map(|season| season.date_start)
                };
                selected.sort_by(|a, b| direction.orient(start_of(*a).cmp(&start_of(*b))));
            }
            SortKey::Amount => {
                selected.sort_by(|a, b| direction.orient(a.amount.total_cmp(&b.amount)));
            }
        }

        let dangling = selected
            .iter()
            .filter(|entry| {
                dimensions.cost_type(entry.cost_type_id).is_none()
                    || dimensions.season(entry.season_id).is_none()
            })
            .count();
        if dangling > 0 {
            tracing::warn!(dangling, "listing entries with unresolved cost type or season");
        }
        tracing::debug!(
            total = entries.len(),
            selected = selected.len(),
            sort = %filter.sort_key,
            "ledger entries filtered"
        );

        selected.into_iter().cloned().collect()
    }
}
