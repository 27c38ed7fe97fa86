//! Validation of scheduling requests and the end-to-end computation.
//!
//! A request is an ordered list of [`MemberEntry`] values. Every member is
//! validated before any conversion runs; the first problem found is returned.

use chrono::NaiveDateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::convert::{parse_local_timestamp, parse_timezone, resolve_local};
use crate::error::{Field, Result, ScheduleError};
use crate::intersect::{intersect, AbsoluteInterval, OverlapResult};

/// One member's availability as submitted on the wire.
///
/// Fields are optional so that an absent field surfaces as
/// [`ScheduleError::MissingField`] rather than a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberEntry {
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub start_local: Option<String>,
    #[serde(default)]
    pub end_local: Option<String>,
}

impl MemberEntry {
    pub fn new(
        timezone: impl Into<String>,
        start_local: impl Into<String>,
        end_local: impl Into<String>,
    ) -> Self {
        Self {
            timezone: Some(timezone.into()),
            start_local: Some(start_local.into()),
            end_local: Some(end_local.into()),
        }
    }
}

/// A validated member window: a zone and two local readings with
/// `start_local < end_local`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalAvailability {
    timezone: Tz,
    start_local: NaiveDateTime,
    end_local: NaiveDateTime,
}

impl LocalAvailability {
    /// Validate one entry. `member` is the 1-based position used in errors.
    pub fn from_entry(member: usize, entry: &MemberEntry) -> Result<Self> {
        let zone = required(member, Field::Timezone, entry.timezone.as_deref())?;
        let start = required(member, Field::StartLocal, entry.start_local.as_deref())?;
        let end = required(member, Field::EndLocal, entry.end_local.as_deref())?;

        let timezone = parse_timezone(zone)?;
        let start_local = parse_local_timestamp(start)?;
        let end_local = parse_local_timestamp(end)?;

        Self::new(member, timezone, start_local, end_local)
    }

    pub fn new(
        member: usize,
        timezone: Tz,
        start_local: NaiveDateTime,
        end_local: NaiveDateTime,
    ) -> Result<Self> {
        if start_local >= end_local {
            return Err(ScheduleError::InvalidOrder {
                member,
                start: start_local.to_string(),
                end: end_local.to_string(),
            });
        }
        Ok(Self {
            timezone,
            start_local,
            end_local,
        })
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn start_local(&self) -> NaiveDateTime {
        self.start_local
    }

    pub fn end_local(&self) -> NaiveDateTime {
        self.end_local
    }

    /// Place the window on the UTC timeline. Both endpoints go through the
    /// same DST policy, so the result can shrink but never invert.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::EmptyWindow`] when both endpoints fall inside
    /// the same spring-forward gap.
    pub fn to_absolute(&self, member: usize) -> Result<AbsoluteInterval> {
        let start = resolve_local(self.start_local, self.timezone)?;
        let end = resolve_local(self.end_local, self.timezone)?;
        debug!(
            member,
            zone = self.timezone.name(),
            start = %start.instant,
            end = %end.instant,
            "resolved member window"
        );
        AbsoluteInterval::new(start.instant, end.instant).ok_or_else(|| {
            ScheduleError::EmptyWindow {
                member,
                zone: self.timezone.name().to_string(),
            }
        })
    }
}

fn required(member: usize, field: Field, value: Option<&str>) -> Result<&str> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ScheduleError::MissingField { member, field }),
    }
}

/// Validate every entry, in order, without converting anything.
///
/// # Errors
///
/// Returns [`ScheduleError::InsufficientMembers`] for fewer than two entries,
/// otherwise the first per-member error.
pub fn validate(entries: &[MemberEntry]) -> Result<Vec<LocalAvailability>> {
    if entries.len() < 2 {
        return Err(ScheduleError::InsufficientMembers {
            count: entries.len(),
        });
    }
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| LocalAvailability::from_entry(i + 1, entry))
        .collect()
}

/// Find the window every member can attend.
///
/// # Examples
///
/// ```
/// use overlap_engine::{find_overlap, MemberEntry};
///
/// let result = find_overlap(&[
///     MemberEntry::new("America/New_York", "2024-06-10T09:00", "2024-06-10T12:00"),
///     MemberEntry::new("Europe/London", "2024-06-10T15:00", "2024-06-10T18:00"),
/// ])
/// .unwrap();
///
/// assert!(result.is_overlap());
/// assert_eq!(
///     result.overlap_start_utc().unwrap().to_rfc3339(),
///     "2024-06-10T14:00:00+00:00"
/// );
/// ```
pub fn find_overlap(entries: &[MemberEntry]) -> Result<OverlapResult> {
    let members = validate(entries)?;
    find_overlap_for(&members)
}

/// [`find_overlap`] for members that are already validated.
pub fn find_overlap_for(members: &[LocalAvailability]) -> Result<OverlapResult> {
    let intervals = members
        .iter()
        .enumerate()
        .map(|(i, m)| m.to_absolute(i + 1))
        .collect::<Result<Vec<_>>>()?;
    let result = intersect(&intervals)?;
    debug!(
        members = intervals.len(),
        is_overlap = result.is_overlap(),
        "computed overlap"
    );
    Ok(result)
}
