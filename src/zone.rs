use crate::{CronError, Result, Schedule};
use chrono::{DateTime, FixedOffset, Local, TimeZone, Utc};
use std::{fmt::Display, str::FromStr};

/// Timezone which wall-clock fields of the expression are evaluated in.
///
/// Parses from (and displays as) `local`, `UTC`, a fixed offset like `+02:00`,
/// or an IANA name like `Europe/Kyiv` if the `tz` feature is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String"))]
#[cfg_attr(feature = "serde", serde(into = "String"))]
pub enum Zone {
    /// System default timezone.
    #[default]
    Local,
    /// Coordinated Universal Time.
    Utc,
    /// Fixed offset from UTC.
    Fixed(FixedOffset),
    /// Named timezone from the IANA database.
    #[cfg(feature = "tz")]
    Named(chrono_tz::Tz),
}

impl Zone {
    /// Checks wall-clock time of `at` in this timezone against the `schedule`.
    pub(crate) fn matches(&self, schedule: &Schedule, at: &DateTime<Utc>) -> bool {
        match self {
            Self::Local => schedule.matches(&at.with_timezone(&Local)),
            Self::Utc => schedule.matches(at),
            Self::Fixed(offset) => schedule.matches(&at.with_timezone(offset)),
            #[cfg(feature = "tz")]
            Self::Named(tz) => schedule.matches(&at.with_timezone(tz)),
        }
    }

    /// Returns unix timestamp of the upcoming `schedule` event in this timezone.
    pub(crate) fn upcoming(&self, schedule: &Schedule, at: &DateTime<Utc>) -> Option<i64> {
        match self {
            Self::Local => upcoming_in(schedule, at, &Local),
            Self::Utc => upcoming_in(schedule, at, &Utc),
            Self::Fixed(offset) => upcoming_in(schedule, at, offset),
            #[cfg(feature = "tz")]
            Self::Named(tz) => upcoming_in(schedule, at, tz),
        }
    }
}

#[inline]
fn upcoming_in<Tz: TimeZone>(schedule: &Schedule, at: &DateTime<Utc>, tz: &Tz) -> Option<i64> {
    schedule.upcoming(&at.with_timezone(tz)).map(|dt| dt.timestamp())
}

impl FromStr for Zone {
    type Err = CronError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("local") {
            return Ok(Self::Local);
        }
        if s.eq_ignore_ascii_case("utc") || s == "Z" {
            return Ok(Self::Utc);
        }
        if s.starts_with(['+', '-']) {
            return FixedOffset::from_str(s)
                .map(Self::Fixed)
                .map_err(|_| CronError::InvalidTimeZone(s.to_owned()));
        }

        #[cfg(feature = "tz")]
        if let Ok(tz) = chrono_tz::Tz::from_str(s) {
            return Ok(Self::Named(tz));
        }

        Err(CronError::InvalidTimeZone(s.to_owned()))
    }
}

impl Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Utc => write!(f, "UTC"),
            Self::Fixed(offset) => write!(f, "{offset}"),
            #[cfg(feature = "tz")]
            Self::Named(tz) => write!(f, "{}", tz.name()),
        }
    }
}

impl From<FixedOffset> for Zone {
    fn from(value: FixedOffset) -> Self {
        Self::Fixed(value)
    }
}

#[cfg(feature = "tz")]
impl From<chrono_tz::Tz> for Zone {
    fn from(value: chrono_tz::Tz) -> Self {
        Self::Named(value)
    }
}

impl From<Zone> for String {
    fn from(value: Zone) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Zone {
    type Error = CronError;

    fn try_from(value: String) -> Result<Self> {
        Self::from_str(&value)
    }
}

impl TryFrom<&str> for Zone {
    type Error = CronError;

    fn try_from(value: &str) -> Result<Self> {
        Self::from_str(value)
    }
}
