//! Season timeline management.
//!
//! Seasons partition time into a gapless chain. Sorted by `date_start`, every
//! season ends exactly one tick before the next one starts, and the latest
//! season is open-ended. The current season is never stored: it is derived as
//! the open season whenever it is needed.

use chrono::NaiveDateTime;

use crate::core::services::{
    as_table_error, ensure_id_available, ensure_unique_ids, locate, normalized_name, Changeset,
    RecordRules, ServiceResult,
};
use crate::domain::{tick, RecordId, RecordKind, Season};
use crate::errors::ValidationError;

/// Guards the season table and keeps the timeline partitioned.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeasonService;

/// First place where a sorted chain stops being a valid partition.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ChainBreak {
    id: RecordId,
    field: &'static str,
    reason: String,
}

impl SeasonService {
    /// The season that is still running, if the chain has one.
    pub fn current(seasons: &[Season]) -> Option<&Season> {
        seasons
            .iter()
            .filter(|season| season.is_open())
            .max_by_key(|season| season.date_start)
    }

    /// The season with the latest start, open or not.
    pub fn latest(seasons: &[Season]) -> Option<&Season> {
        seasons.iter().max_by_key(|season| season.date_start)
    }

    /// Finds the season whose inclusive interval contains `instant`.
    pub fn season_at(seasons: &[Season], instant: NaiveDateTime) -> Option<&Season> {
        seasons.iter().find(|season| season.contains(instant))
    }

    /// Returns the seasons ordered by start, oldest first.
    pub fn sorted(seasons: &[Season]) -> Vec<&Season> {
        let mut sorted: Vec<&Season> = seasons.iter().collect();
        sorted.sort_by_key(|season| season.date_start);
        sorted
    }

    /// Moves the start of a season and closes its predecessor one tick earlier.
    ///
    /// This is the only edit that can shift a boundary of a valid chain, since
    /// a single-record edit always opens a gap or an overlap next to it.
    pub fn prepare_reschedule(
        &self,
        id: RecordId,
        new_start: NaiveDateTime,
        existing: &[Season],
    ) -> ServiceResult<Changeset<Season>> {
        let target = locate(RecordKind::Season, id, existing)?.clone();
        let sorted = Self::sorted(existing);
        let position = sorted
            .iter()
            .position(|season| season.id == id)
            .ok_or_else(|| ValidationError::not_found(RecordKind::Season, id))?;
        let predecessor = position.checked_sub(1).map(|index| sorted[index]);
        let successor = sorted.get(position + 1).copied();

        if let Some(previous) = predecessor {
            if !follows(previous.date_start, new_start) {
                return Err(ValidationError::property(
                    RecordKind::Season,
                    "date_start",
                    new_start,
                    format!(
                        "season must start at least one second after `{}` began on {}",
                        previous.name, previous.date_start
                    ),
                ));
            }
        }
        if let Some(next) = successor {
            if !follows(new_start, next.date_start) {
                return Err(ValidationError::property(
                    RecordKind::Season,
                    "date_start",
                    new_start,
                    format!(
                        "season must start at least one second before `{}` begins on {}",
                        next.name, next.date_start
                    ),
                ));
            }
        }

        let moved = Season {
            date_start: new_start,
            ..target.clone()
        };
        let mut change = Changeset::edited(moved, target);
        if let Some(previous) = predecessor {
            change = change.with_adjusted(Season {
                date_end: Some(closing_instant(new_start)?),
                ..previous.clone()
            });
        }
        if let Err(broken) = check_chain(&change.apply(existing)) {
            return Err(ValidationError::property(
                RecordKind::Season,
                broken.field,
                new_start,
                broken.reason,
            ));
        }
        tracing::debug!(id, %new_start, "season rescheduled");
        Ok(change)
    }
}

impl RecordRules for SeasonService {
    type Record = Season;
    const KIND: RecordKind = RecordKind::Season;

    fn validate_all(&self, records: &[Season]) -> ServiceResult<()> {
        if records.is_empty() {
            return Err(ValidationError::table(
                Self::KIND,
                "at least one season is required",
                None,
            ));
        }
        ensure_unique_ids(Self::KIND, records)?;
        for season in records {
            normalized_name(Self::KIND, season).map_err(|err| as_table_error(err, season.id))?;
        }
        check_chain(records).map_err(|broken| {
            ValidationError::table(Self::KIND, broken.reason, Some(broken.id))
        })
    }

    fn prepare_add(
        &self,
        candidate: Season,
        existing: &[Season],
    ) -> ServiceResult<Changeset<Season>> {
        ensure_id_available(Self::KIND, candidate.id, existing)?;
        let closed = match Self::latest(existing) {
            Some(latest) => {
                if !follows(latest.date_start, candidate.date_start) {
                    tracing::debug!(
                        start = %candidate.date_start,
                        latest = %latest.date_start,
                        "season does not start after the open season"
                    );
                    return Err(ValidationError::property(
                        Self::KIND,
                        "date_start",
                        candidate.date_start,
                        format!(
                            "season must start at least one second after `{}` began on {}",
                            latest.name, latest.date_start
                        ),
                    ));
                }
                Some(Season {
                    date_end: Some(closing_instant(candidate.date_start)?),
                    ..latest.clone()
                })
            }
            None => None,
        };
        let name = normalized_name(Self::KIND, &candidate)?;
        let added = Season {
            name,
            date_end: None,
            ..candidate
        };
        let change = Changeset::added(added);
        Ok(match closed {
            Some(season) => change.with_adjusted(season),
            None => change,
        })
    }

    fn prepare_edit(
        &self,
        candidate: Season,
        existing: &[Season],
    ) -> ServiceResult<Changeset<Season>> {
        let previous = locate(Self::KIND, candidate.id, existing)?.clone();
        let name = normalized_name(Self::KIND, &candidate)?;
        let updated = Season { name, ..candidate };
        let change = Changeset::edited(updated, previous);

        // The whole chain is re-derived: an edit may change which season is latest.
        if let Err(broken) = check_chain(&change.apply(existing)) {
            let target = &change.target;
            let field = if broken.id == target.id {
                broken.field
            } else if change
                .previous
                .as_ref()
                .is_some_and(|previous| previous.date_start != target.date_start)
            {
                "date_start"
            } else {
                "date_end"
            };
            let value = if field == "date_start" {
                target.date_start.to_string()
            } else {
                describe_end(target.date_end)
            };
            tracing::debug!(id = target.id, field, "season edit breaks the timeline");
            return Err(ValidationError::property(
                Self::KIND,
                field,
                value,
                broken.reason,
            ));
        }
        Ok(change)
    }

    fn prepare_delete(&self, id: RecordId, existing: &[Season]) -> ServiceResult<Changeset<Season>> {
        let target = locate(Self::KIND, id, existing)?.clone();
        if existing.len() <= 1 {
            return Err(ValidationError::deletion(
                Self::KIND,
                id,
                "at least one season must remain",
            ));
        }
        let sorted = Self::sorted(existing);
        let (latest, earlier) = match sorted.split_last() {
            Some((latest, earlier)) => (*latest, earlier),
            None => return Err(ValidationError::not_found(Self::KIND, id)),
        };
        if latest.id != id {
            tracing::debug!(id, current = latest.id, "refusing to delete a closed season");
            return Err(ValidationError::deletion(
                Self::KIND,
                id,
                format!(
                    "only the current season `{}` can be deleted; removing `{}` would leave a gap",
                    latest.name, target.name
                ),
            ));
        }
        let change = Changeset::deleted(target);
        Ok(match earlier.last() {
            Some(previous) => change.with_adjusted(Season {
                date_end: None,
                ..(*previous).clone()
            }),
            None => change,
        })
    }
}

/// Last instant of a season that is followed by one starting at `next_start`.
fn closing_instant(next_start: NaiveDateTime) -> ServiceResult<NaiveDateTime> {
    next_start.checked_sub_signed(tick()).ok_or_else(|| {
        ValidationError::property(
            RecordKind::Season,
            "date_start",
            next_start,
            "start leaves no room for a preceding season",
        )
    })
}

/// `true` when a season starting at `start` can close one that began at
/// `earlier`: the closing instant `start - tick()` must not precede `earlier`.
fn follows(earlier: NaiveDateTime, start: NaiveDateTime) -> bool {
    start
        .checked_sub_signed(tick())
        .is_some_and(|closing| closing >= earlier)
}

fn describe_end(end: Option<NaiveDateTime>) -> String {
    end.map_or_else(|| "open".to_string(), |end| end.to_string())
}

fn check_chain(seasons: &[Season]) -> Result<(), ChainBreak> {
    for season in seasons {
        if let Some(end) = season.date_end {
            if end < season.date_start {
                return Err(ChainBreak {
                    id: season.id,
                    field: "date_end",
                    reason: format!("`{}` ends on {} before it starts", season.name, end),
                });
            }
        }
    }

    let sorted = SeasonService::sorted(seasons);
    for pair in sorted.windows(2) {
        let (season, next) = (pair[0], pair[1]);
        let Some(end) = season.date_end else {
            return Err(ChainBreak {
                id: season.id,
                field: "date_end",
                reason: format!(
                    "`{}` is open although `{}` starts after it",
                    season.name, next.name
                ),
            });
        };
        let expected = next.date_start.checked_sub_signed(tick());
        if Some(end) == expected {
            continue;
        }
        let overlaps = expected.map_or(true, |expected| end > expected);
        let reason = if overlaps {
            format!(
                "`{}` ends on {} and overlaps `{}` starting {}",
                season.name, end, next.name, next.date_start
            )
        } else {
            format!(
                "`{}` ends on {} leaving a gap before `{}` starting {}",
                season.name, end, next.name, next.date_start
            )
        };
        return Err(ChainBreak {
            id: season.id,
            field: "date_end",
            reason,
        });
    }

    match sorted.last() {
        Some(latest) if !latest.is_open() => Err(ChainBreak {
            id: latest.id,
            field: "date_end",
            reason: format!(
                "`{}` is the latest season and must stay open, not end on {}",
                latest.name,
                describe_end(latest.date_end)
            ),
        }),
        _ => Ok(()),
    }
}
