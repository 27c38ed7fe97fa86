//! Error types for overlap-engine operations.
//!
//! Every variant is a caller-input error. "No overlap" is not an error and
//! never travels through this type; see [`crate::OverlapResult`].

use thiserror::Error;

/// Which field of a member entry an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Timezone,
    StartLocal,
    EndLocal,
}

impl Field {
    /// The wire name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Timezone => "timezone",
            Field::StartLocal => "start_local",
            Field::EndLocal => "end_local",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Member positions are 1-based, matching how people are numbered in the
/// request ("Person 1", "Person 2", ...).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Missing field: member {member} has no {field}")]
    MissingField { member: usize, field: Field },

    #[error("Invalid order: member {member} starts at {start} which is not before {end}")]
    InvalidOrder {
        member: usize,
        start: String,
        end: String,
    },

    #[error("Unknown timezone: '{zone}' is not a recognized IANA time zone")]
    UnknownZone { zone: String },

    #[error("Insufficient members: at least 2 members are required, got {count}")]
    InsufficientMembers { count: usize },

    #[error("Invalid timestamp: '{value}' {reason}")]
    InvalidTimestamp { value: String, reason: String },

    #[error(
        "Empty window: member {member}'s availability in {zone} falls entirely inside a daylight-saving gap"
    )]
    EmptyWindow { member: usize, zone: String },
}

/// Machine-distinguishable error kind, stable across releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingField,
    InvalidOrder,
    UnknownZone,
    InsufficientMembers,
    InvalidTimestamp,
    EmptyWindow,
}

impl ErrorKind {
    /// Snake-case name used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::MissingField => "missing_field",
            ErrorKind::InvalidOrder => "invalid_order",
            ErrorKind::UnknownZone => "unknown_zone",
            ErrorKind::InsufficientMembers => "insufficient_members",
            ErrorKind::InvalidTimestamp => "invalid_timestamp",
            ErrorKind::EmptyWindow => "empty_window",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ScheduleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScheduleError::MissingField { .. } => ErrorKind::MissingField,
            ScheduleError::InvalidOrder { .. } => ErrorKind::InvalidOrder,
            ScheduleError::UnknownZone { .. } => ErrorKind::UnknownZone,
            ScheduleError::InsufficientMembers { .. } => ErrorKind::InsufficientMembers,
            ScheduleError::InvalidTimestamp { .. } => ErrorKind::InvalidTimestamp,
            ScheduleError::EmptyWindow { .. } => ErrorKind::EmptyWindow,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
