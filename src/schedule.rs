use crate::{
    calendar::{self, WallClock},
    pattern::{Field, Pattern},
    CronError, Result,
};
use chrono::{DateTime, Datelike, LocalResult, NaiveDateTime, TimeDelta, TimeZone};
use std::{fmt::Display, str::FromStr};
use tracing::debug;

/// How many calendar years after the starting one are scanned for the upcoming event.
///
/// Under the day-of-month AND day-of-week rule, the rarest satisfiable combination
/// (29th of February on a particular weekday) repeats in at most 40 years.
pub const MAX_SEARCH_YEARS: i32 = 50;

/// Compiled five-fields cron expression.
///
/// For expression format and usage examples, please refer to the [crate documentation](crate).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String"))]
#[cfg_attr(feature = "serde", serde(into = "String"))]
pub struct Schedule {
    minute: Pattern,
    hour: Pattern,
    dom: Pattern,
    month: Pattern,
    dow: Pattern,
    source: String,
}

impl Schedule {
    /// Parses and validates provided `expression` and constructs [`Schedule`] instance.
    ///
    /// Fields may be separated by any run of whitespaces.
    ///
    /// Returns [`CronError`] in a case provided expression is unparsable or has format errors.
    pub fn new(expression: impl AsRef<str>) -> Result<Self> {
        let expression = expression.as_ref();
        let elements: Vec<&str> = expression.split_whitespace().collect();
        if elements.len() != Field::ALL.len() {
            return Err(CronError::InvalidSegmentCount(expression.to_owned()));
        }

        Ok(Self {
            minute: Pattern::parse(Field::Minute, elements[0])?,
            hour: Pattern::parse(Field::Hour, elements[1])?,
            dom: Pattern::parse(Field::DayOfMonth, elements[2])?,
            month: Pattern::parse(Field::Month, elements[3])?,
            dow: Pattern::parse(Field::DayOfWeek, elements[4])?,
            source: elements.join(" "),
        })
    }

    /// Returns compiled set of allowed values of the `field`.
    pub fn field(&self, field: Field) -> &Pattern {
        match field {
            Field::Minute => &self.minute,
            Field::Hour => &self.hour,
            Field::DayOfMonth => &self.dom,
            Field::Month => &self.month,
            Field::DayOfWeek => &self.dow,
        }
    }

    /// Returns `true` if wall-clock time of `current` (in its own timezone) satisfies all fields.
    ///
    /// Seconds are ignored.
    pub fn matches<Tz: TimeZone>(&self, current: &DateTime<Tz>) -> bool {
        self.matches_local(&current.naive_local())
    }

    fn matches_local(&self, current: &NaiveDateTime) -> bool {
        let clock = WallClock::from(current);

        self.minute.contains(clock.minute)
            && self.hour.contains(clock.hour)
            && self.dom.contains(clock.day)
            && self.month.contains(clock.month)
            && self.dow.contains(clock.weekday)
    }

    /// Returns time of the upcoming event, starting from the provided `current` value.
    ///
    /// `current` is rounded up to the whole minute first, so if it's exactly at the
    /// beginning of a matching minute, it's returned as is.
    /// Fields are evaluated against wall-clock time in the timezone of `current`.
    /// Local times skipped by DST transitions never match, repeated ones match twice.
    ///
    /// Returns `None` if there is no event within [`MAX_SEARCH_YEARS`].
    pub fn upcoming<Tz: TimeZone>(&self, current: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        let upcoming = self.upcoming_forward(current);

        // Second pass of the repeated span is behind `current` on the wall clock.
        let repeated = calendar::repeated_shift(current).and_then(|shift| self.upcoming_repeated(current, shift));

        match (upcoming, repeated) {
            (Some(upcoming), Some(repeated)) => Some(upcoming.min(repeated)),
            (upcoming, repeated) => upcoming.or(repeated),
        }
    }

    /// Searches wall-clock time forward from `current`.
    fn upcoming_forward<Tz: TimeZone>(&self, current: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        let tz = current.timezone();
        let mut start = calendar::ceil_to_minute(&current.naive_local())?;
        let last_year = start.year().checked_add(MAX_SEARCH_YEARS)?;

        loop {
            let Some(candidate) = self.upcoming_local(start, last_year) else {
                debug!(schedule = %self, %start, "no upcoming event within search horizon");
                return None;
            };
            match calendar::resolve_local(&tz, &candidate, current) {
                Some(upcoming) if upcoming >= *current => return Some(upcoming),
                _ => start = calendar::add_minute(&candidate)?,
            }
        }
    }

    /// Searches the later instances of local times repeated by the DST fold
    /// which `current` is the earlier instance in.
    ///
    /// The repeated span is `shift` long and contains local time of `current`,
    /// so it lies within `shift` before and after it.
    fn upcoming_repeated<Tz: TimeZone>(&self, current: &DateTime<Tz>, shift: TimeDelta) -> Option<DateTime<Tz>> {
        let tz = current.timezone();
        let local = current.naive_local();
        let end = local.checked_add_signed(shift)?;
        let mut start = calendar::ceil_to_minute(&local.checked_sub_signed(shift)?)?;

        loop {
            let candidate = self.upcoming_local(start, end.year())?;
            if candidate >= end {
                return None;
            }
            if let LocalResult::Ambiguous(_, latest) = tz.from_local_datetime(&candidate) {
                return Some(latest);
            }
            start = calendar::add_minute(&candidate)?;
        }
    }

    /// Searches for the first matching wall-clock minute starting from (including) `start`.
    fn upcoming_local(&self, start: NaiveDateTime, last_year: i32) -> Option<NaiveDateTime> {
        let mut current = start;
        let mut previous = WallClock::from(&current);

        loop {
            let mut clock = WallClock::from(&current);
            if clock.year > last_year {
                return None;
            }

            // Start over from the beginning of the unit which has just been changed.
            if clock.year != previous.year {
                current = calendar::with_ymd_hm(clock.year, 1, 1, 0, 0)?;
            } else if clock.month != previous.month {
                current = calendar::with_ymd_hm(clock.year, clock.month, 1, 0, 0)?;
            } else if clock.day != previous.day {
                current = calendar::with_ymd_hm(clock.year, clock.month, clock.day, 0, 0)?;
            } else if clock.hour != previous.hour {
                current = calendar::with_ymd_hm(clock.year, clock.month, clock.day, clock.hour, 0)?;
            }
            clock = WallClock::from(&current);
            previous = clock;

            if !self.month.contains(clock.month) {
                current = calendar::add_month(&current)?;
            } else if !(self.dom.contains(clock.day) && self.dow.contains(clock.weekday)) {
                current = calendar::add_day(&current)?;
            } else if !self.hour.contains(clock.hour) {
                current = calendar::add_hour(&current)?;
            } else if !self.minute.contains(clock.minute) {
                current = calendar::add_minute(&current)?;
            } else {
                return Some(current);
            }
        }
    }

    /// Returns iterator of events starting from `current` (inclusively).
    #[inline]
    pub fn iter<Tz: TimeZone>(&self, current: &DateTime<Tz>) -> impl Iterator<Item = DateTime<Tz>> {
        ScheduleIterator {
            schedule: self.clone(),
            next: self.upcoming(current),
        }
    }

    /// Consumes [`Schedule`] and returns iterator of events starting from `current` (inclusively).
    #[inline]
    pub fn into_iter<Tz: TimeZone>(self, current: &DateTime<Tz>) -> impl Iterator<Item = DateTime<Tz>> {
        let next = self.upcoming(current);
        ScheduleIterator { schedule: self, next }
    }
}

/// Contains iterator state.
#[derive(Debug, Clone)]
struct ScheduleIterator<Tz: TimeZone> {
    schedule: Schedule,
    next: Option<DateTime<Tz>>,
}

impl<Tz: TimeZone> Iterator for ScheduleIterator<Tz> {
    type Item = DateTime<Tz>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = self
            .schedule
            .upcoming(&current.clone().checked_add_signed(TimeDelta::seconds(1))?);
        Some(current)
    }
}

impl From<Schedule> for String {
    fn from(value: Schedule) -> Self {
        value.source
    }
}

impl From<&Schedule> for String {
    fn from(value: &Schedule) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Schedule {
    type Error = CronError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&String> for Schedule {
    type Error = CronError;

    fn try_from(value: &String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Schedule {
    type Error = CronError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl FromStr for Schedule {
    type Err = CronError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl Display for Schedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}
