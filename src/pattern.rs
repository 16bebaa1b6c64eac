use crate::{utils, CronError, Result};
use std::fmt::Display;

pub(crate) type PatternValueType = u16;

/// Position of the field in a cron expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// Minutes, `0-59`.
    Minute = 0,
    /// Hours, `0-23`.
    Hour = 1,
    /// Day of month, `1-31`.
    DayOfMonth = 2,
    /// Month, `1-12` or `JAN`-`DEC`.
    Month = 3,
    /// Day of week, `0-7` (both `0` and `7` are Sunday) or `SUN`-`SAT`.
    DayOfWeek = 4,
}

impl Field {
    /// All fields in the order they appear in an expression.
    pub const ALL: [Field; 5] = [
        Field::Minute,
        Field::Hour,
        Field::DayOfMonth,
        Field::Month,
        Field::DayOfWeek,
    ];

    const DAYS_OF_WEEK: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];
    const MONTHS: [&str; 12] = [
        "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
    ];

    /// Returns inclusive domain of the field.
    pub fn min_max(&self) -> (PatternValueType, PatternValueType) {
        match self {
            Self::Minute => (0, 59),
            Self::Hour => (0, 23),
            Self::DayOfMonth => (1, 31),
            Self::Month => (1, 12),
            Self::DayOfWeek => (0, 7),
        }
    }

    /// Looks up a whole-segment mnemonic name, if the field has them.
    fn mnemonic(&self, input: &str) -> Option<PatternValueType> {
        match self {
            Self::Month => utils::parse_string_value(input, &Self::MONTHS).map(|v| v + 1),
            Self::DayOfWeek => utils::parse_string_value(input, &Self::DAYS_OF_WEEK),
            _ => None,
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::DayOfMonth => "day of month",
            Self::Month => "month",
            Self::DayOfWeek => "day of week",
        };
        write!(f, "{name}")
    }
}

/// Set of values allowed by a single field of the expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pattern {
    field: Field,
    mask: u64,
}

impl Pattern {
    /// Compiles textual `input` of the `field` into the set of allowed values.
    pub(crate) fn parse(field: Field, input: &str) -> Result<Self> {
        let mut pattern = Self { field, mask: 0 };

        // Names can't be combined with lists, ranges or steps.
        if let Some(value) = field.mnemonic(input) {
            pattern.insert(value);
            return Ok(pattern);
        }

        for element in input.split(',') {
            pattern.parse_element(element)?;
        }

        // Sunday has two numbers.
        if field == Field::DayOfWeek && pattern.contains(7) {
            pattern.insert(0);
        }

        Ok(pattern)
    }

    fn parse_element(&mut self, element: &str) -> Result<()> {
        let field = self.field;
        let (min, max) = field.min_max();

        let (base, step) = if element.contains('/') {
            let parts: Vec<&str> = element.split('/').collect();
            if parts.len() != 2 {
                return Err(CronError::InvalidSteppingNotation(field, element.to_owned()));
            }
            let Some(step) = utils::parse_number(parts[1]) else {
                return Err(CronError::NonNumericStepping(field, element.to_owned()));
            };
            if step == 0 || step > max {
                return Err(CronError::SteppingOutOfRange(field, element.to_owned()));
            }
            (parts[0], Some(step))
        } else {
            (element, None)
        };

        if let Some(value) = utils::parse_number(base) {
            if value < min || value > max {
                return Err(CronError::InvalidValue(field, element.to_owned()));
            }
            if step.is_some() {
                return Err(CronError::ValueWithStepping(field, element.to_owned()));
            }
            self.insert(value);
            return Ok(());
        }

        let (start, end) = if base == "*" {
            (min, max)
        } else if let Some((start, end)) = base.split_once('-') {
            let (Some(start), Some(end)) = (utils::parse_number(start), utils::parse_number(end)) else {
                return Err(CronError::NonNumericRange(field, element.to_owned()));
            };
            if start < min || start > max || end < min || end > max {
                return Err(CronError::InvalidRangeValue(field, element.to_owned()));
            }
            (start, end)
        } else {
            return Err(CronError::InvalidListSegment(field, element.to_owned()));
        };

        if start == end {
            self.insert(start);
        } else {
            self.insert_range(start, end, step.unwrap_or(1));
        }

        Ok(())
    }

    /// Walks the whole domain so the step phase stays anchored to `start`
    /// even when the range wraps around the domain's maximum.
    fn insert_range(&mut self, start: PatternValueType, end: PatternValueType, step: PatternValueType) {
        let (min, max) = self.field.min_max();
        let (start, end, step) = (i32::from(start), i32::from(end), i32::from(step));

        for value in min..=max {
            let i = i32::from(value);
            let in_range = if start <= end {
                start <= i && i <= end
            } else {
                i >= start || i <= end
            };
            if in_range && (i - start) % step == 0 {
                self.insert(value);
            }
        }
    }

    #[inline]
    fn insert(&mut self, value: PatternValueType) {
        self.mask |= 1u64 << value;
    }

    /// Field this pattern belongs to.
    #[inline]
    pub fn field(&self) -> Field {
        self.field
    }

    /// Returns `true` if `value` is allowed by the pattern.
    #[inline]
    pub fn contains(&self, value: u32) -> bool {
        value < u64::BITS && self.mask & (1u64 << value) != 0
    }

    /// Returns all allowed values in ascending order.
    pub fn values(&self) -> impl Iterator<Item = u32> + '_ {
        let (min, max) = self.field.min_max();
        (u32::from(min)..=u32::from(max)).filter(|v| self.contains(*v))
    }
}
