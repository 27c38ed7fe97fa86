//! Zone-aware conversion between local wall-clock time and the UTC timeline.
//!
//! All functions are pure: the only external input is the IANA rule database
//! compiled into `chrono-tz`, whose version is [`TZDB_VERSION`]. Because the
//! database is static data, both endpoints of a member's window are always
//! resolved against the same rule snapshot.
//!
//! # DST policy
//!
//! A local reading can fail to map to exactly one instant:
//!
//! - **Gap** (spring forward): the reading never happens on the wall clock.
//!   It resolves to the first valid instant after the gap, which is the
//!   transition instant itself. `2024-03-10 02:30` in `America/New_York`
//!   becomes `07:00Z`, i.e. 03:00 EDT.
//! - **Fold** (fall back): the reading happens twice. It resolves to the
//!   earlier instant, the one before the clocks roll back.
//!   `2024-11-03 01:30` in `America/New_York` becomes `05:30Z` (01:30 EDT).
//!
//! Both rules are monotone, so a window with `start < end` in local time can
//! never invert once converted. It can only collapse, when both endpoints sit
//! in the same gap.

use chrono::{
    DateTime, Datelike, LocalResult, NaiveDateTime, Offset, SecondsFormat, TimeZone, Timelike,
    Utc,
};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::debug;

use crate::error::{Result, ScheduleError};

/// Version of the IANA time zone database the converter resolves against.
pub const TZDB_VERSION: &str = chrono_tz::IANA_TZDB_VERSION;

/// Longest run of nonexistent wall-clock minutes the gap search will walk.
const MAX_GAP_MINUTES: i64 = 48 * 60;

/// Accepted offset-free layouts, most common first. `%.f` also matches an
/// absent fraction.
const LOCAL_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
];

// ── to_absolute ─────────────────────────────────────────────────────────────

/// How a local reading was mapped onto the UTC timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// The reading maps to exactly one instant.
    Exact,
    /// The reading fell in a spring-forward gap and was moved to the
    /// transition instant.
    ShiftedPastGap,
    /// The reading occurs twice; the earlier instant was chosen.
    EarlierOfFold,
}

/// An absolute instant together with the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedInstant {
    pub instant: DateTime<Utc>,
    pub resolution: Resolution,
}

/// Convert a local wall-clock reading in `zone` to an absolute instant.
///
/// # Errors
///
/// Returns [`ScheduleError::UnknownZone`] if `zone` is not an IANA identifier.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use overlap_engine::convert::{to_absolute, Resolution};
///
/// let local = NaiveDate::from_ymd_opt(2024, 6, 10)
///     .unwrap()
///     .and_hms_opt(9, 0, 0)
///     .unwrap();
/// let resolved = to_absolute(local, "America/New_York").unwrap();
/// // June is EDT (UTC-4)
/// assert_eq!(resolved.instant.to_rfc3339(), "2024-06-10T13:00:00+00:00");
/// assert_eq!(resolved.resolution, Resolution::Exact);
/// ```
pub fn to_absolute(local: NaiveDateTime, zone: &str) -> Result<ResolvedInstant> {
    let tz = parse_timezone(zone)?;
    resolve_local(local, tz)
}

/// Same as [`to_absolute`] for an already-parsed zone.
///
/// # Errors
///
/// Returns [`ScheduleError::InvalidTimestamp`] only when a gap is longer than
/// the search bound, which no real zone has.
pub fn resolve_local(local: NaiveDateTime, tz: Tz) -> Result<ResolvedInstant> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => Ok(ResolvedInstant {
            instant: dt.with_timezone(&Utc),
            resolution: Resolution::Exact,
        }),
        LocalResult::Ambiguous(first, second) => {
            let instant = first.with_timezone(&Utc).min(second.with_timezone(&Utc));
            debug!(zone = tz.name(), %local, %instant, "local time is ambiguous, taking earlier instant");
            Ok(ResolvedInstant {
                instant,
                resolution: Resolution::EarlierOfFold,
            })
        }
        LocalResult::None => {
            let instant = first_instant_after_gap(local, tz)?;
            debug!(zone = tz.name(), %local, %instant, "local time falls in a gap, shifting forward");
            Ok(ResolvedInstant {
                instant,
                resolution: Resolution::ShiftedPastGap,
            })
        }
    }
}

/// Walk forward minute by minute from `local` until the wall clock reads a
/// valid time again. Transitions land on whole minutes, so the first valid
/// minute is the transition itself.
fn first_instant_after_gap(local: NaiveDateTime, tz: Tz) -> Result<DateTime<Utc>> {
    let floor = local
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(local);

    (1..=MAX_GAP_MINUTES)
        .filter_map(|m| floor.checked_add_signed(chrono::Duration::minutes(m)))
        .find_map(|probe| tz.from_local_datetime(&probe).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| ScheduleError::InvalidTimestamp {
            value: local.to_string(),
            reason: format!("has no valid local time within 48 hours after it in {}", tz.name()),
        })
}

// ── to_local ────────────────────────────────────────────────────────────────

/// Project an absolute instant back onto the wall clock of `zone`.
///
/// Never ambiguous: every instant has exactly one local reading.
///
/// # Errors
///
/// Returns [`ScheduleError::UnknownZone`] if `zone` is not an IANA identifier.
pub fn to_local(instant: DateTime<Utc>, zone: &str) -> Result<NaiveDateTime> {
    let tz = parse_timezone(zone)?;
    Ok(instant.with_timezone(&tz).naive_local())
}

/// Render an instant in `tz` for people, e.g. `"Jun 10, 2024 10:00 AM EDT"`.
pub fn to_local_display(instant: DateTime<Utc>, tz: Tz) -> String {
    instant
        .with_timezone(&tz)
        .format("%b %-d, %Y %-I:%M %p %Z")
        .to_string()
}

// ── convert_local ───────────────────────────────────────────────────────────

/// A local reading resolved in its zone, with offset metadata.
#[derive(Debug, Clone, Serialize)]
pub struct ConvertedLocal {
    /// The input reading, normalized (`YYYY-MM-DDTHH:MM:SS`).
    pub local: String,
    /// The IANA timezone name used.
    pub timezone: String,
    /// The resolved instant in UTC (ISO 8601, `Z` suffix).
    pub utc: String,
    /// The offset in force at the resolved instant (e.g., "-04:00").
    pub utc_offset: String,
    /// Whether Daylight Saving Time is active at the resolved instant.
    pub dst_active: bool,
    /// Which DST rule, if any, was applied.
    pub resolution: Resolution,
}

/// Parse and resolve a local timestamp string in `zone`.
///
/// # Errors
///
/// Returns [`ScheduleError::InvalidTimestamp`] if `local` cannot be parsed as
/// an offset-free reading, or [`ScheduleError::UnknownZone`] for a bad zone.
pub fn convert_local(local: &str, zone: &str) -> Result<ConvertedLocal> {
    let tz = parse_timezone(zone)?;
    let naive = parse_local_timestamp(local)?;
    let resolved = resolve_local(naive, tz)?;
    let zoned = resolved.instant.with_timezone(&tz);

    Ok(ConvertedLocal {
        local: naive.format("%Y-%m-%dT%H:%M:%S").to_string(),
        timezone: tz.name().to_string(),
        utc: format_utc(resolved.instant),
        utc_offset: format_utc_offset(&zoned),
        dst_active: is_dst_active(&zoned, &tz),
        resolution: resolved.resolution,
    })
}

// ── Parsing and formatting ──────────────────────────────────────────────────

/// Parse an IANA timezone string into `Tz`. Matching is case-sensitive.
pub fn parse_timezone(s: &str) -> Result<Tz> {
    s.trim().parse::<Tz>().map_err(|_| ScheduleError::UnknownZone {
        zone: s.to_string(),
    })
}

/// Parse an offset-free local timestamp such as `2024-06-10T09:00`.
///
/// Fractional seconds are accepted and truncated: readings carry whole-second
/// precision, the same precision results are reported in.
pub fn parse_local_timestamp(s: &str) -> Result<NaiveDateTime> {
    let trimmed = s.trim();
    if let Some(dt) = LOCAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
    {
        return Ok(dt.with_nanosecond(0).unwrap_or(dt));
    }

    let reason = if DateTime::parse_from_rfc3339(trimmed).is_ok()
        || DateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M%#z").is_ok()
    {
        "carries a UTC offset; send the local wall-clock time without one"
    } else {
        "is not a local date-time (expected YYYY-MM-DDTHH:MM)"
    };
    Err(ScheduleError::InvalidTimestamp {
        value: s.to_string(),
        reason: reason.to_string(),
    })
}

/// Format an instant as ISO 8601 UTC with a `Z` suffix and whole seconds.
pub fn format_utc(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Determine if DST is active for a datetime in a timezone.
fn is_dst_active<T: TimeZone>(dt: &DateTime<T>, tz: &Tz) -> bool {
    // Compare the January and July offsets with the current one. Whichever of
    // the two is smaller is standard time, which also holds south of the
    // equator where DST runs over January.
    let year = dt.with_timezone(&Utc).year();
    let offset_at = |month: u32| {
        Utc.with_ymd_and_hms(year, month, 1, 12, 0, 0)
            .single()
            .map(|probe| probe.with_timezone(tz).offset().fix().local_minus_utc())
    };

    let current = dt.offset().fix().local_minus_utc();
    match (offset_at(1), offset_at(7)) {
        (Some(jan), Some(jul)) => current > jan.min(jul),
        _ => false,
    }
}

/// Format the UTC offset as a string (e.g., "-05:00", "+09:00").
fn format_utc_offset<T: TimeZone>(dt: &DateTime<T>) -> String {
    let offset_secs = dt.offset().fix().local_minus_utc();
    let sign = if offset_secs >= 0 { "+" } else { "-" };
    let abs_secs = offset_secs.unsigned_abs();
    let hours = abs_secs / 3600;
    let minutes = (abs_secs % 3600) / 60;
    format!("{sign}{hours:02}:{minutes:02}")
}

// ── Tests ───────────────────────────────────────────────────────────────────
