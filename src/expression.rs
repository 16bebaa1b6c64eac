use crate::{zone::Zone, Result, Schedule};
use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use std::cell::OnceCell;
use tracing::{debug, trace};

/// Point in time to evaluate the expression at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum When {
    /// Current system time.
    #[default]
    Now,
    /// Unix timestamp in seconds.
    Timestamp(i64),
    /// Particular instant.
    At(DateTime<FixedOffset>),
}

impl When {
    /// Returns absolute time, `None` if timestamp is out of the supported range.
    fn resolve(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Now => Some(Utc::now()),
            Self::Timestamp(timestamp) => DateTime::<Utc>::from_timestamp(*timestamp, 0),
            Self::At(at) => Some(at.with_timezone(&Utc)),
        }
    }
}

impl From<i64> for When {
    fn from(value: i64) -> Self {
        Self::Timestamp(value)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for When {
    fn from(value: DateTime<Tz>) -> Self {
        Self::At(value.fixed_offset())
    }
}

impl<Tz: TimeZone> From<&DateTime<Tz>> for When {
    fn from(value: &DateTime<Tz>) -> Self {
        Self::At(value.fixed_offset())
    }
}

impl<T: Into<When>> From<Option<T>> for When {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

/// Cron expression with its timezone and lazily compiled [`Schedule`].
///
/// The expression is compiled on the first query and cached until it's replaced.
/// Queries never fail: invalid expression just never matches and has no upcoming events,
/// use [`compile()`](CronExpression::compile) to get the reason.
///
/// The cache isn't synchronized, so the instance may be moved between threads but not shared.
#[derive(Debug, Clone, Default)]
pub struct CronExpression {
    expression: String,
    zone: Zone,
    compiled: OnceCell<Schedule>,
}

impl CronExpression {
    /// Constructs an expression evaluated in the system default timezone.
    ///
    /// No parsing is performed here.
    pub fn new(expression: impl AsRef<str>) -> Self {
        let mut value = Self::default();
        value.set_expression(expression);
        value
    }

    /// Replaces expression text, surrounding whitespaces are trimmed.
    pub fn set_expression(&mut self, expression: impl AsRef<str>) {
        self.expression = expression.as_ref().trim().to_owned();
        self.compiled = OnceCell::new();
        trace!(expression = %self.expression, "expression replaced");
    }

    /// Current expression text.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Sets timezone for subsequent queries, `None` means system default.
    pub fn set_time_zone(&mut self, zone: impl Into<Option<Zone>>) {
        self.zone = zone.into().unwrap_or_default();
    }

    /// Current timezone.
    pub fn time_zone(&self) -> Zone {
        self.zone
    }

    /// Compiles the expression if it isn't compiled yet.
    ///
    /// Failed attempt isn't cached, so the next call parses the expression again.
    pub fn compile(&self) -> Result<&Schedule> {
        if let Some(schedule) = self.compiled.get() {
            return Ok(schedule);
        }

        let schedule = Schedule::new(&self.expression)?;
        trace!(expression = %self.expression, "expression compiled");
        Ok(self.compiled.get_or_init(|| schedule))
    }

    fn schedule(&self) -> Option<&Schedule> {
        match self.compile() {
            Ok(schedule) => Some(schedule),
            Err(error) => {
                debug!(expression = %self.expression, %error, "invalid cron expression");
                None
            }
        }
    }

    /// Returns `true` if the expression is valid.
    pub fn is_valid(&self) -> bool {
        self.schedule().is_some()
    }

    /// Returns `true` if the expression is valid and wall-clock time of `when` satisfies it.
    pub fn is_matching(&self, when: impl Into<When>) -> bool {
        let Some(schedule) = self.schedule() else {
            return false;
        };
        when.into()
            .resolve()
            .is_some_and(|at| self.zone.matches(schedule, &at))
    }

    /// Returns unix timestamp of the upcoming event, starting from `when` (inclusively),
    /// after rounding it up to the whole minute.
    ///
    /// Returns `None` if the expression is invalid or has no upcoming event.
    pub fn get_next(&self, when: impl Into<When>) -> Option<i64> {
        let schedule = self.schedule()?;
        let at = when.into().resolve()?;
        self.zone.upcoming(schedule, &at)
    }

    /// Returns iterator of upcoming events timestamps starting from `when` (inclusively).
    pub fn iter(&self, when: impl Into<When>) -> impl Iterator<Item = i64> + '_ {
        std::iter::successors(self.get_next(when), move |previous| {
            self.get_next(previous.checked_add(1)?)
        })
    }
}
