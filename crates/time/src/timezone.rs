//! Environment timezone profiles
//!
//! Every known environment (site) code maps to an IANA zone and the regional
//! date/time convention used when rendering times for that site. Codes that
//! are not in the table fall back to [`DEFAULT_PROFILE`].

use chrono_tz::Tz;
use serde::Serialize;

use crate::TimeError;

/// Regional date/time display convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayFormat {
    /// MM/DD/YYYY with a 12-hour clock and AM/PM marker
    Us,
    /// DD/MM/YYYY with a 24-hour clock
    International,
}

impl std::fmt::Display for DisplayFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Us => write!(f, "us"),
            Self::International => write!(f, "international"),
        }
    }
}

/// Timezone and display convention for one environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimezoneProfile {
    pub zone: Tz,
    pub display_format: DisplayFormat,
}

impl TimezoneProfile {
    pub const fn new(zone: Tz, display_format: DisplayFormat) -> Self {
        Self {
            zone,
            display_format,
        }
    }

    /// IANA name of the zone, e.g. `America/New_York`
    pub fn iana_zone(&self) -> &'static str {
        self.zone.name()
    }
}

/// Profile used for codes missing from the table
pub const DEFAULT_PROFILE: TimezoneProfile =
    TimezoneProfile::new(chrono_tz::Asia::Jerusalem, DisplayFormat::International);

/// Built-in environment table, matched by exact code
const ENVIRONMENT_PROFILES: &[(&str, TimezoneProfile)] = &[
    (
        "NCEL",
        TimezoneProfile::new(chrono_tz::America::New_York, DisplayFormat::Us),
    ),
    (
        "VAL",
        TimezoneProfile::new(chrono_tz::America::New_York, DisplayFormat::Us),
    ),
    (
        "MSL",
        TimezoneProfile::new(chrono_tz::America::Detroit, DisplayFormat::Us),
    ),
    (
        "ALC",
        TimezoneProfile::new(chrono_tz::America::Halifax, DisplayFormat::Us),
    ),
    (
        "Sazka",
        TimezoneProfile::new(chrono_tz::Europe::Prague, DisplayFormat::International),
    ),
    (
        "OPAP",
        TimezoneProfile::new(chrono_tz::Europe::Athens, DisplayFormat::International),
    ),
    // NGL sites
    (
        "UNL",
        TimezoneProfile::new(chrono_tz::Europe::Kyiv, DisplayFormat::International),
    ),
    (
        "MLT",
        TimezoneProfile::new(chrono_tz::Europe::Malta, DisplayFormat::International),
    ),
];

/// Resolves environment codes to timezone profiles
#[derive(Debug, Clone)]
pub struct TimezoneResolver {
    profiles: &'static [(&'static str, TimezoneProfile)],
    default_profile: TimezoneProfile,
}

impl Default for TimezoneResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl TimezoneResolver {
    /// Resolver over the built-in environment table
    pub fn new() -> Self {
        Self {
            profiles: ENVIRONMENT_PROFILES,
            default_profile: DEFAULT_PROFILE,
        }
    }

    /// Resolver over a custom table
    pub fn with_profiles(
        profiles: &'static [(&'static str, TimezoneProfile)],
        default_profile: TimezoneProfile,
    ) -> Self {
        Self {
            profiles,
            default_profile,
        }
    }

    /// Look up the profile for an environment code.
    ///
    /// Unknown codes resolve to the default profile; this never fails.
    pub fn resolve(&self, environment_code: &str) -> TimezoneProfile {
        match self
            .profiles
            .iter()
            .find(|(code, _)| *code == environment_code)
        {
            Some((_, profile)) => *profile,
            None => {
                tracing::debug!(
                    environment = environment_code,
                    zone = self.default_profile.iana_zone(),
                    "Unknown environment code, using default timezone profile"
                );
                self.default_profile
            }
        }
    }

    /// Whether the code has its own table entry
    pub fn is_known(&self, environment_code: &str) -> bool {
        self.profiles
            .iter()
            .any(|(code, _)| *code == environment_code)
    }

    /// All known environment codes, in table order
    pub fn known_codes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.profiles.iter().map(|(code, _)| *code)
    }
}

/// Parse an IANA zone name such as `Europe/Prague`
pub fn parse_zone(name: &str) -> Result<Tz, TimeError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| TimeError::UnknownTimezone(name.to_string()))
}
