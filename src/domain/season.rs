use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::common::{Identifiable, NamedEntity, RecordId};

/// A named slice of the farm timeline.
///
/// Both bounds are inclusive. A `date_end` of `None` marks the open season:
/// the single season that is still running and has no end yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Season {
    pub id: RecordId,
    pub name: String,
    pub date_start: NaiveDateTime,
    #[serde(default)]
    pub date_end: Option<NaiveDateTime>,
}

impl Season {
    /// Creates an open season starting at `date_start`.
    pub fn open(id: RecordId, name: impl Into<String>, date_start: NaiveDateTime) -> Self {
        Self {
            id,
            name: name.into(),
            date_start,
            date_end: None,
        }
    }

    pub fn closed(
        id: RecordId,
        name: impl Into<String>,
        date_start: NaiveDateTime,
        date_end: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            date_start,
            date_end: Some(date_end),
        }
    }

    pub fn is_open(&self) -> bool {
        self.date_end.is_none()
    }

    /// Returns `true` when `instant` falls within the inclusive bounds.
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        instant >= self.date_start && self.date_end.map_or(true, |end| instant <= end)
    }
}

impl Identifiable for Season {
    fn id(&self) -> RecordId {
        self.id
    }
}

impl NamedEntity for Season {
    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn open_season_contains_everything_after_start() {
        let season = Season::open(1, "2025", at(2025, 1, 1));
        assert!(season.is_open());
        assert!(season.contains(at(2025, 1, 1)));
        assert!(season.contains(at(2090, 6, 1)));
        assert!(!season.contains(at(2024, 12, 31)));
    }

    #[test]
    fn closed_season_bounds_are_inclusive() {
        let season = Season::closed(1, "2024", at(2024, 1, 1), at(2024, 12, 31));
        assert!(season.contains(at(2024, 12, 31)));
        assert!(!season.contains(at(2025, 1, 1)));
    }
}
