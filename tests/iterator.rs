use chrono::{DateTime, Utc};
use cron_eval::{CronExpression, Result, Schedule, Zone};

#[test]
fn iterator() -> Result<()> {
    let schedule = Schedule::new("0 0 * * *")?;
    let now = Utc::now();

    // Get the next 10 timestamps starting from now
    let events: Vec<_> = schedule.iter(&now).take(10).collect();
    assert_eq!(events.len(), 10);
    assert!(events.windows(2).all(|w| w[1] - w[0] == chrono::TimeDelta::days(1)));

    Ok(())
}

#[test]
fn expression_iterator() {
    let mut expression = CronExpression::new("0 9 * * mon");
    expression.set_time_zone(Zone::Utc);
    let start = DateTime::parse_from_rfc3339("2024-01-01T09:00:01Z").unwrap();

    let events: Vec<i64> = expression.iter(start).take(3).collect();
    let expected: Vec<i64> = ["2024-01-08T09:00:00Z", "2024-01-15T09:00:00Z", "2024-01-22T09:00:00Z"]
        .iter()
        .map(|t| DateTime::parse_from_rfc3339(t).unwrap().timestamp())
        .collect();

    assert_eq!(events, expected);
}
