use chrono::{DateTime, Utc};
use cron_eval::{CronExpression, Field, Result, Schedule, When, Zone};

#[test]
fn upcoming() -> Result<()> {
    let schedule = Schedule::new("*/5 * * * *")?;
    let now = Utc::now();

    // Get the next event's timestamp starting from now
    let next = schedule.upcoming(&now).unwrap();
    assert!(next >= now);
    assert!(schedule.matches(&next));

    Ok(())
}

#[test]
fn expression_from_scratch() {
    let mut expression = CronExpression::default();
    assert!(!expression.is_valid());

    expression.set_expression("0 0 1 1 *");
    expression.set_time_zone(Zone::Utc);
    assert!(expression.is_valid());

    let new_year = DateTime::parse_from_rfc3339("2031-01-01T00:00:00Z").unwrap();
    assert!(expression.is_matching(new_year));
    assert!(!expression.is_matching(new_year.timestamp() + 60));
    assert_eq!(expression.get_next(new_year.timestamp() - 30), Some(new_year.timestamp()));
    assert!(expression.get_next(When::Now).is_some());
}

#[test]
fn invalid_expressions_are_reported() {
    for text in ["* * * *", "60 * * * *", "*/0 * * * *", "* * * jan,feb *", "* * * * mon-fri"] {
        let expression = CronExpression::new(text);
        assert!(!expression.is_valid(), "expression = '{text}'");
        assert!(!expression.is_matching(When::Now), "expression = '{text}'");
        assert_eq!(expression.get_next(When::Now), None, "expression = '{text}'");

        let error = expression.compile().unwrap_err();
        assert!(!error.to_string().is_empty());
    }
}

#[test]
fn wraparound_weekdays() -> Result<()> {
    let schedule: Schedule = "0 12 * * 5-1".parse()?;
    let values: Vec<u32> = schedule.field(Field::DayOfWeek).values().collect();
    assert_eq!(values, vec![0, 1, 5, 6, 7]);

    // Tuesday -> Friday
    let start = DateTime::parse_from_rfc3339("2024-01-02T13:00:00Z").unwrap();
    let next = schedule.upcoming(&start).unwrap();
    assert_eq!(next.to_rfc3339(), "2024-01-05T12:00:00+00:00");

    Ok(())
}

#[cfg(feature = "serde")]
#[test]
fn serde_round_trip() -> Result<()> {
    let schedule = Schedule::new("0  12 * *   5-1")?;
    let json = serde_json::to_string(&schedule).unwrap();
    assert_eq!(json, "\"0 12 * * 5-1\"");
    assert_eq!(serde_json::from_str::<Schedule>(&json).unwrap(), schedule);
    assert!(serde_json::from_str::<Schedule>("\"* * * *\"").is_err());

    let zone: Zone = serde_json::from_str("\"+02:00\"").unwrap();
    assert_eq!(serde_json::to_string(&zone).unwrap(), "\"+02:00\"");

    Ok(())
}
