use crate::pattern::Field;
use thiserror::Error;

/// Crate specific Errors implementation.
///
/// Every pattern related variant carries the field where the problem was found
/// and the offending piece of the expression.
#[derive(Debug, Error, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CronError {
    /// Expression doesn't consist of exactly five fields.
    #[error("invalid number of segments: '{0}'")]
    InvalidSegmentCount(String),
    /// Stepping notation is malformed, i.e. has more than one `/`.
    #[error("{0}: invalid stepping notation: '{1}'")]
    InvalidSteppingNotation(Field, String),
    /// Stepping value is empty or isn't a number.
    #[error("{0}: non-numeric stepping notation: '{1}'")]
    NonNumericStepping(Field, String),
    /// Stepping value is zero or exceeds the field's maximum.
    #[error("{0}: stepping value out of allowed range: '{1}'")]
    SteppingOutOfRange(Field, String),
    /// Single value is outside the field's domain.
    #[error("{0}: invalid value: '{1}'")]
    InvalidValue(Field, String),
    /// Single value is combined with the stepping notation, i.e. `5/10`.
    #[error("{0}: invalid combination of value and stepping notation: '{1}'")]
    ValueWithStepping(Field, String),
    /// One of the range bounds isn't a number.
    #[error("{0}: non-numeric range notation: '{1}'")]
    NonNumericRange(Field, String),
    /// One of the range bounds is outside the field's domain.
    #[error("{0}: invalid range start or end value: '{1}'")]
    InvalidRangeValue(Field, String),
    /// List element has an unknown shape.
    #[error("{0}: failed to parse list segment: '{1}'")]
    InvalidListSegment(Field, String),
    /// Time zone string isn't recognized.
    #[error("invalid time zone: '{0}'")]
    InvalidTimeZone(String),
}
