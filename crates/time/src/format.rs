//! Date and timestamp rendering for notification emails

use chrono::{
    DateTime, Datelike, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeDelta, TimeZone, Utc,
};
use chrono_tz::Tz;

use crate::timezone::{DisplayFormat, TimezoneProfile, TimezoneResolver};
use crate::TimeError;

/// Layouts accepted for timestamps without an explicit offset
const NAIVE_TIMESTAMP_PATTERNS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// English ordinal suffix for a day of the month
pub fn ordinal_suffix(day: u32) -> &'static str {
    if (11..=13).contains(&(day % 100)) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// Render a `YYYY-MM-DD` date as "Month Dth", e.g. `2025-10-02` -> "October 2nd"
pub fn format_calendar_date(iso_date: &str) -> Result<String, TimeError> {
    let date = NaiveDate::parse_from_str(iso_date.trim(), "%Y-%m-%d")
        .map_err(|_| TimeError::InvalidDate(iso_date.to_string()))?;
    let day = date.day();

    Ok(format!("{} {}{}", date.format("%B"), day, ordinal_suffix(day)))
}

/// Render a UTC offset in seconds as "+N" / "-N" hours.
///
/// The offset is rounded to whole minutes first. Whole hours render as
/// integers, anything else with at most two decimals (`+5.5`, `+5.75`,
/// `+2.35`).
pub fn format_gmt_offset(offset_seconds: i32) -> String {
    let minutes = (offset_seconds.unsigned_abs() + 30) / 60;
    let sign = if offset_seconds < 0 && minutes > 0 { '-' } else { '+' };

    if minutes % 60 == 0 {
        format!("{}{}", sign, minutes / 60)
    } else {
        let hours = format!("{:.2}", f64::from(minutes) / 60.0);
        format!("{}{}", sign, hours.trim_end_matches('0'))
    }
}

/// Converts form timestamps into an environment's wall clock
#[derive(Debug, Clone)]
pub struct TimestampFormatter {
    resolver: TimezoneResolver,
    input_zone: Tz,
}

impl TimestampFormatter {
    /// `input_zone` is where timestamps without an explicit offset were entered
    pub fn new(resolver: TimezoneResolver, input_zone: Tz) -> Self {
        Self {
            resolver,
            input_zone,
        }
    }

    pub fn resolver(&self) -> &TimezoneResolver {
        &self.resolver
    }

    pub fn input_zone(&self) -> Tz {
        self.input_zone
    }

    /// Format a timestamp for the given environment.
    ///
    /// Blank input yields an empty string since time fields are optional.
    pub fn format_timestamp(&self, input: &str, environment_code: &str) -> Result<String, TimeError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(String::new());
        }

        let instant = self.parse_instant(input)?;
        let profile = self.resolver.resolve(environment_code);

        Ok(render_in_profile(instant, profile))
    }

    fn parse_instant(&self, input: &str) -> Result<DateTime<Utc>, TimeError> {
        if let Ok(with_offset) = DateTime::parse_from_rfc3339(input) {
            return Ok(with_offset.with_timezone(&Utc));
        }

        let naive = NAIVE_TIMESTAMP_PATTERNS
            .iter()
            .find_map(|pattern| NaiveDateTime::parse_from_str(input, pattern).ok())
            .ok_or_else(|| TimeError::InvalidTimestamp(input.to_string()))?;

        match self.input_zone.from_local_datetime(&naive) {
            LocalResult::Single(local) => Ok(local.with_timezone(&Utc)),
            LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
            // Skipped by a DST transition: move forward past the gap
            LocalResult::None => self
                .input_zone
                .from_local_datetime(&(naive + TimeDelta::hours(1)))
                .earliest()
                .map(|local| local.with_timezone(&Utc))
                .ok_or_else(|| TimeError::InvalidTimestamp(input.to_string())),
        }
    }
}

fn render_in_profile(instant: DateTime<Utc>, profile: TimezoneProfile) -> String {
    let local = instant.with_timezone(&profile.zone);
    let pattern = match profile.display_format {
        DisplayFormat::Us => "%m/%d/%Y %I:%M %p",
        DisplayFormat::International => "%d/%m/%Y %H:%M",
    };
    let offset_seconds = local.offset().fix().local_minus_utc();

    format!(
        "{}(GMT {})",
        local.format(pattern),
        format_gmt_offset(offset_seconds)
    )
}
