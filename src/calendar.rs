/// Wall-clock calendar arithmetic used by the upcoming event search.
use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Timelike};

/// Broken-down wall-clock time with the values cron fields compare against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct WallClock {
    pub(crate) year: i32,
    pub(crate) month: u32,
    pub(crate) day: u32,
    pub(crate) hour: u32,
    pub(crate) minute: u32,
    /// Sunday is `0`.
    pub(crate) weekday: u32,
}

impl From<&NaiveDateTime> for WallClock {
    fn from(value: &NaiveDateTime) -> Self {
        Self {
            year: value.year(),
            month: value.month(),
            day: value.day(),
            hour: value.hour(),
            minute: value.minute(),
            weekday: value.weekday().num_days_from_sunday(),
        }
    }
}

/// Rounds `value` up to the start of the next whole minute, unless it's already there.
pub(crate) fn ceil_to_minute(value: &NaiveDateTime) -> Option<NaiveDateTime> {
    let floor = value.with_second(0)?.with_nanosecond(0)?;
    if floor == *value {
        Some(floor)
    } else {
        floor.checked_add_signed(TimeDelta::minutes(1))
    }
}

/// Sets date and time of the day, `None` if the date doesn't exist.
pub(crate) fn with_ymd_hm(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<NaiveDateTime> {
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
    Some(date.and_time(time))
}

/// Next calendar month, the day is clamped to the month's length.
#[inline]
pub(crate) fn add_month(value: &NaiveDateTime) -> Option<NaiveDateTime> {
    value.checked_add_months(Months::new(1))
}

/// Same time of the next day.
#[inline]
pub(crate) fn add_day(value: &NaiveDateTime) -> Option<NaiveDateTime> {
    value.checked_add_signed(TimeDelta::days(1))
}

/// Same minute of the next hour.
#[inline]
pub(crate) fn add_hour(value: &NaiveDateTime) -> Option<NaiveDateTime> {
    value.checked_add_signed(TimeDelta::hours(1))
}

/// Same second of the next minute.
#[inline]
pub(crate) fn add_minute(value: &NaiveDateTime) -> Option<NaiveDateTime> {
    value.checked_add_signed(TimeDelta::minutes(1))
}

/// Maps wall-clock `local` time back to the absolute time in `tz`.
///
/// Returns `None` if `local` doesn't exist in the zone (DST gap).
/// Ambiguous time resolves to the earliest instance which isn't before `not_before`.
pub(crate) fn resolve_local<Tz: TimeZone>(
    tz: &Tz,
    local: &NaiveDateTime,
    not_before: &chrono::DateTime<Tz>,
) -> Option<chrono::DateTime<Tz>> {
    match tz.from_local_datetime(local) {
        chrono::LocalResult::Single(dt) => Some(dt),
        chrono::LocalResult::Ambiguous(earliest, latest) => {
            if earliest >= *not_before {
                Some(earliest)
            } else {
                Some(latest)
            }
        }
        chrono::LocalResult::None => None,
    }
}

/// Returns length of the repeated span if `at` is the earlier instance of a local time
/// repeated by the DST fold, `None` otherwise.
pub(crate) fn repeated_shift<Tz: TimeZone>(at: &chrono::DateTime<Tz>) -> Option<TimeDelta> {
    match at.timezone().from_local_datetime(&at.naive_local()) {
        chrono::LocalResult::Ambiguous(earliest, latest) if earliest == *at => {
            Some(latest.naive_utc().signed_duration_since(earliest.naive_utc()))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use rstest::rstest;

    fn naive(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").unwrap()
    }

    #[rstest]
    #[case("2024-01-01 00:00:00", "2024-01-01 00:00:00")]
    #[case("2024-01-01 00:00:01", "2024-01-01 00:01:00")]
    #[case("2024-01-01 00:00:00.001", "2024-01-01 00:01:00")]
    #[case("2024-01-01 10:59:59", "2024-01-01 11:00:00")]
    #[case("2024-12-31 23:59:30", "2025-01-01 00:00:00")]
    fn test_ceil_to_minute(#[case] value: &str, #[case] expected: &str) {
        assert_eq!(ceil_to_minute(&naive(value)), Some(naive(expected)));
    }

    #[rstest]
    #[case("2024-01-31 10:30:00", "2024-02-29 10:30:00")]
    #[case("2025-01-31 10:30:00", "2025-02-28 10:30:00")]
    #[case("2024-12-15 00:00:00", "2025-01-15 00:00:00")]
    fn test_add_month(#[case] value: &str, #[case] expected: &str) {
        assert_eq!(add_month(&naive(value)), Some(naive(expected)));
    }

    #[test]
    fn test_add_smaller_units() {
        let value = naive("2024-02-28 23:59:00");
        assert_eq!(add_day(&value), Some(naive("2024-02-29 23:59:00")));
        assert_eq!(add_hour(&value), Some(naive("2024-02-29 00:59:00")));
        assert_eq!(add_minute(&value), Some(naive("2024-02-29 00:00:00")));
    }

    #[rstest]
    #[case(2024, 2, 29, 12, 30, Some("2024-02-29 12:30:00"))]
    #[case(2025, 2, 29, 12, 30, None)]
    #[case(2025, 4, 31, 0, 0, None)]
    #[case(2025, 4, 30, 24, 0, None)]
    fn test_with_ymd_hm(
        #[case] year: i32,
        #[case] month: u32,
        #[case] day: u32,
        #[case] hour: u32,
        #[case] minute: u32,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(with_ymd_hm(year, month, day, hour, minute), expected.map(naive));
    }

    #[test]
    fn test_wall_clock_fields() {
        let clock = WallClock::from(&naive("2024-01-07 13:45:10"));
        assert_eq!(
            clock,
            WallClock {
                year: 2024,
                month: 1,
                day: 7,
                hour: 13,
                minute: 45,
                weekday: 0,
            }
        );
    }

    #[test]
    fn test_resolve_local_unambiguous() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let start = tz.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let resolved = resolve_local(&tz, &naive("2024-01-01 10:00:00"), &start).unwrap();
        assert_eq!(resolved.to_rfc3339(), "2024-01-01T10:00:00+02:00");

        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let resolved = resolve_local(&Utc, &naive("2024-01-01 10:00:00"), &start).unwrap();
        assert_eq!(resolved.timestamp(), 1_704_103_200);
    }

    #[test]
    fn test_repeated_shift_without_fold() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(repeated_shift(&tz.with_ymd_and_hms(2024, 10, 27, 3, 30, 0).unwrap()), None);
        assert_eq!(repeated_shift(&Utc.with_ymd_and_hms(2024, 10, 27, 3, 30, 0).unwrap()), None);
    }

    #[cfg(feature = "tz")]
    #[test]
    fn test_resolve_local_in_fold() {
        // 2024-10-27 03:00-04:00 happens twice in Kyiv: at +03:00 and then at +02:00
        let tz = chrono_tz::Europe::Kyiv;
        let local = naive("2024-10-27 03:30:00");

        let before = Utc.with_ymd_and_hms(2024, 10, 27, 0, 0, 0).unwrap().with_timezone(&tz);
        let resolved = resolve_local(&tz, &local, &before).unwrap();
        assert_eq!(resolved.to_rfc3339(), "2024-10-27T03:30:00+03:00");

        let after = Utc.with_ymd_and_hms(2024, 10, 27, 0, 45, 0).unwrap().with_timezone(&tz);
        let resolved = resolve_local(&tz, &local, &after).unwrap();
        assert_eq!(resolved.to_rfc3339(), "2024-10-27T03:30:00+02:00");
    }

    #[cfg(feature = "tz")]
    #[rstest]
    #[case(0, 30, Some(TimeDelta::hours(1)))]
    #[case(1, 30, None)]
    #[case(2, 30, None)]
    #[case(23, 30, None)]
    fn test_repeated_shift_in_fold(#[case] hour: u32, #[case] minute: u32, #[case] expected: Option<TimeDelta>) {
        let at = Utc
            .with_ymd_and_hms(2024, 10, 27, hour, minute, 0)
            .unwrap()
            .with_timezone(&chrono_tz::Europe::Kyiv);
        assert_eq!(repeated_shift(&at), expected, "at = {at}");
    }
}
