//! Critnotify time handling
//!
//! Maps environment codes to timezone profiles and renders the date and
//! timestamp strings used in notification emails:
//! - Static environment to IANA zone table with a default profile
//! - "Month Dth" calendar dates
//! - Zone-converted timestamps annotated with their GMT offset

use thiserror::Error;

pub mod format;
pub mod timezone;

pub use format::{format_calendar_date, format_gmt_offset, ordinal_suffix, TimestampFormatter};
pub use timezone::{parse_zone, DisplayFormat, TimezoneProfile, TimezoneResolver, DEFAULT_PROFILE};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeError {
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid timestamp '{0}', expected YYYY-MM-DDTHH:MM or RFC 3339")]
    InvalidTimestamp(String),

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),
}
