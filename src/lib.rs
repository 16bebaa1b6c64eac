//! Five-fields cron expressions parser, matcher and next occurrence finder.
#![deny(unsafe_code, warnings, missing_docs)]

//! This is a tiny crate, intended to:
//! - parse and validate classic five-fields cron expressions;
//! - check whether particular time matches an expression;
//! - find the next time matching an expression, with respect to a timezone.
//!
//! It's built on top of [chrono](https://crates.io/crates/chrono).
//!
//! _This is not a cron jobs scheduler or runner._
//!
//! ## Cron expression format
//!
//! An expression consists of exactly five fields separated by any whitespaces:
//!
//! | Field        | Allowed values                  | Allowed special characters |
//! |--------------|---------------------------------|----------------------------|
//! | Minutes      | 0-59                            | * , - /                    |
//! | Hours        | 0-23                            | * , - /                    |
//! | Day of Month | 1-31                            | * , - /                    |
//! | Month        | 1-12 or JAN-DEC                 | * , - /                    |
//! | Day of Week  | 0-7 (0 and 7 are Sun) or SUN-SAT | * , - /                   |
//!
//! Patterns meanings:
//! - `*` - each possible value, i.e. `0,1,2,...,59` for minutes;
//! - `,` - list of values or patterns, i.e. `1,7,12`, `1-5,*/20`;
//! - `-` - range of values, i.e. `0-15`; if the start is greater than the end, the range wraps around,
//!   i.e. `5-1` for days of week means `FRI,SAT,SUN,MON`;
//! - `/` - repeating values within the range, starting from its first value, i.e. `*/12`, `30-59/2`, `22-4/2`.
//!
//! Names of months and days of week are case-insensitive and can't be combined with other patterns,
//! so `JAN` is fine, but `JAN,FEB` or `MON-FRI` are invalid.
//! Single value can't be repeated, so `5/10` is invalid, use `5-59/10` instead.
//!
//! Day of month and day of week fields are both applied to the day,
//! i.e. `0 0 13 * 5` means midnight of every Friday, the 13th.
//!
//! ## How to use
//!
//! [`Schedule`] is a compiled expression with three basic methods:
//! - [new()](Schedule::new): constructor to parse and validate provided expression;
//! - [matches()](Schedule::matches): checks whether the provided time matches the expression;
//! - [upcoming()](Schedule::upcoming): returns time of the next event, starting from the provided timestamp.
//!
//! [`CronExpression`] is a never-failing wrapper with a timezone and a lazily compiled schedule,
//! which works with unix timestamps as well as with `chrono` instants.
//!
//! ### Example with `Schedule`
//! ```rust
//! use chrono::{DateTime, Utc};
//! use cron_eval::{Result, Schedule};
//!
//! fn upcoming() -> Result<()> {
//!     let schedule = Schedule::new("30 9 * * 1")?;
//!     let now = DateTime::parse_from_rfc3339("2024-01-02T00:00:00Z").unwrap();
//!
//!     let next = schedule.upcoming(&now).unwrap();
//!     assert_eq!(next.to_rfc3339(), "2024-01-08T09:30:00+00:00");
//!     assert!(schedule.matches(&next));
//!
//!     // Get the next 10 timestamps starting from now
//!     schedule.iter(&Utc::now()).take(10).for_each(|t| println!("next: {t}"));
//!
//!     Ok(())
//! }
//! # upcoming().unwrap();
//! ```
//!
//! ### Example with `CronExpression`
//! ```rust
//! use cron_eval::{CronExpression, When, Zone};
//!
//! let mut expression = CronExpression::new("0 0 1 1 *");
//! expression.set_time_zone(Zone::Utc);
//!
//! assert!(expression.is_valid());
//! assert!(expression.is_matching(1_704_067_200_i64));
//! assert_eq!(expression.get_next(1_704_067_201_i64), Some(1_735_689_600));
//! assert!(expression.get_next(When::Now).is_some());
//!
//! expression.set_expression("*/0 * * * *");
//! assert!(!expression.is_valid());
//! assert_eq!(expression.get_next(When::Now), None);
//! assert!(expression.compile().is_err());
//! ```
//!
//! # Feature flags
//! * `serde`: adds [`Serialize`](https://docs.rs/serde/latest/serde/trait.Serialize.html) and [`Deserialize`](https://docs.rs/serde/latest/serde/trait.Deserialize.html) trait implementation for [`Schedule`] and [`Zone`].
//! * `tz`: enables named IANA timezones, see [`Zone`].

mod calendar;
/// Crate specific Error implementation.
pub mod error;
/// Never-failing expression wrapper with a timezone and a lazily compiled schedule.
pub mod expression;
/// Field compiler.
pub mod pattern;
/// Compiled cron expression and upcoming event search.
pub mod schedule;
mod utils;
/// Timezone which expression is evaluated in.
pub mod zone;

// Re-export of public entities.
pub use error::CronError;
pub use expression::{CronExpression, When};
pub use pattern::{Field, Pattern};
pub use schedule::Schedule;
pub use zone::Zone;

/// Convenient alias for `Result`.
pub type Result<T, E = CronError> = std::result::Result<T, E>;
