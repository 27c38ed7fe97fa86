//! # overlap-engine
//!
//! Find the meeting window shared by every member of a team spread across
//! time zones.
//!
//! Each member states availability as two local wall-clock readings in an
//! IANA zone. The engine places every window on the UTC timeline, applying
//! explicit rules for readings that fall in a DST gap or fold, and intersects
//! them in a single pass.
//!
//! ## Modules
//!
//! - [`convert`] — local wall-clock ↔ UTC conversion and the DST gap/fold policy
//! - [`intersect`] — N-way intersection of half-open absolute intervals
//! - [`request`] — request validation and the end-to-end computation
//! - [`error`] — Error types

pub mod convert;
pub mod error;
pub mod intersect;
pub mod request;

pub use convert::{
    convert_local, format_utc, parse_local_timestamp, parse_timezone, resolve_local,
    to_absolute, to_local, to_local_display, ConvertedLocal, Resolution, ResolvedInstant,
    TZDB_VERSION,
};
pub use error::{ErrorKind, Field, ScheduleError};
pub use intersect::{intersect, AbsoluteInterval, OverlapResult};
pub use request::{find_overlap, find_overlap_for, validate, LocalAvailability, MemberEntry};
