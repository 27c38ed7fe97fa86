//! N-way intersection of half-open absolute intervals.

use chrono::{DateTime, Duration, Utc};
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::convert::format_utc;
use crate::error::{Result, ScheduleError};

/// A non-empty half-open interval `[start, end)` on the UTC timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AbsoluteInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl AbsoluteInterval {
    /// Returns `None` unless `start < end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Outcome of intersecting every member's window.
///
/// An empty intersection is a normal result, not an error. Serializes as
/// `{"is_overlap": true, "overlap_start_utc": "...", "overlap_end_utc": "..."}`
/// or `{"is_overlap": false}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlapResult {
    overlap: Option<AbsoluteInterval>,
}

impl OverlapResult {
    pub fn found(interval: AbsoluteInterval) -> Self {
        Self {
            overlap: Some(interval),
        }
    }

    pub fn none() -> Self {
        Self { overlap: None }
    }

    pub fn is_overlap(&self) -> bool {
        self.overlap.is_some()
    }

    pub fn overlap(&self) -> Option<AbsoluteInterval> {
        self.overlap
    }

    pub fn overlap_start_utc(&self) -> Option<DateTime<Utc>> {
        self.overlap.map(|iv| iv.start)
    }

    pub fn overlap_end_utc(&self) -> Option<DateTime<Utc>> {
        self.overlap.map(|iv| iv.end)
    }
}

impl Serialize for OverlapResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.overlap {
            Some(iv) => {
                let mut state = serializer.serialize_struct("OverlapResult", 3)?;
                state.serialize_field("is_overlap", &true)?;
                state.serialize_field("overlap_start_utc", &format_utc(iv.start))?;
                state.serialize_field("overlap_end_utc", &format_utc(iv.end))?;
                state.end()
            }
            None => {
                let mut state = serializer.serialize_struct("OverlapResult", 1)?;
                state.serialize_field("is_overlap", &false)?;
                state.end()
            }
        }
    }
}

/// Intersect all intervals: `[max(start), min(end))` if that is non-empty.
///
/// One pass, no sorting; the result does not depend on input order. Intervals
/// that only touch (`max(start) == min(end)`) do not overlap.
///
/// # Errors
///
/// Returns [`ScheduleError::InsufficientMembers`] for fewer than two intervals.
pub fn intersect(intervals: &[AbsoluteInterval]) -> Result<OverlapResult> {
    let (first, rest) = match intervals {
        [first, rest @ ..] if !rest.is_empty() => (first, rest),
        _ => {
            return Err(ScheduleError::InsufficientMembers {
                count: intervals.len(),
            })
        }
    };

    let (latest_start, earliest_end) = rest.iter().fold(
        (first.start, first.end),
        |(latest_start, earliest_end), iv| (latest_start.max(iv.start), earliest_end.min(iv.end)),
    );

    Ok(AbsoluteInterval::new(latest_start, earliest_end)
        .map_or_else(OverlapResult::none, OverlapResult::found))
}
