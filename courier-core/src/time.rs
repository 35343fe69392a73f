//! Time-of-day values and the courier's work shift.
//!
//! Every instant the engine reasons about is a whole number of seconds
//! measured from midnight of the day the shift starts. Instants on the
//! following day (a shift that crosses midnight) are simply larger than
//! [`SECONDS_PER_DAY`]; nothing wraps.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use thiserror::Error;

use crate::DeliveryWindow;

/// Number of seconds in one civil day.
pub const SECONDS_PER_DAY: u32 = 86_400;

const SECONDS_PER_HOUR: u32 = 3_600;
const SECONDS_PER_MINUTE: u32 = 60;

/// An instant measured in seconds from midnight of the shift's first day.
///
/// Parsed from and displayed as `HH:MM:SS`.
///
/// # Examples
/// ```
/// use courier_core::TimeOfDay;
///
/// let opens: TimeOfDay = "08:30:00".parse()?;
/// assert_eq!(opens.as_seconds(), 30_600);
/// assert_eq!(opens.plus_seconds(90).to_string(), "08:31:30");
/// # Ok::<(), courier_core::TimeOfDayError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimeOfDay(u32);

impl TimeOfDay {
    /// Midnight at the start of the shift's first day.
    pub const MIDNIGHT: Self = Self(0);

    /// Construct from a raw number of seconds since midnight.
    pub const fn from_seconds(seconds: u32) -> Self {
        Self(seconds)
    }

    /// Construct from hour, minute and second components.
    ///
    /// Components must describe a valid civil time (`hour < 24`,
    /// `minute < 60`, `second < 60`).
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Result<Self, TimeOfDayError> {
        let input = format!("{hour:02}:{minute:02}:{second:02}");
        check_range(&input, "hour", hour, 24)?;
        check_range(&input, "minute", minute, 60)?;
        check_range(&input, "second", second, 60)?;
        Ok(Self(
            hour * SECONDS_PER_HOUR + minute * SECONDS_PER_MINUTE + second,
        ))
    }

    /// Seconds since midnight of the shift's first day.
    pub const fn as_seconds(self) -> u32 {
        self.0
    }

    /// The instant `seconds` later.
    ///
    /// Saturates rather than overflowing.
    #[must_use]
    pub const fn plus_seconds(self, seconds: u32) -> Self {
        Self(self.0.saturating_add(seconds))
    }

    /// Seconds from `self` until `later`, or zero when `later` is not after
    /// `self`.
    pub const fn seconds_until(self, later: Self) -> u32 {
        later.0.saturating_sub(self.0)
    }

    /// The same wall-clock time one day later.
    #[must_use]
    pub const fn next_day(self) -> Self {
        self.plus_seconds(SECONDS_PER_DAY)
    }
}

fn check_range(
    input: &str,
    field: &'static str,
    value: u32,
    bound: u32,
) -> Result<(), TimeOfDayError> {
    if value < bound {
        Ok(())
    } else {
        Err(TimeOfDayError::OutOfRange {
            input: input.to_owned(),
            field,
            value,
        })
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let within_day = self.0 % SECONDS_PER_DAY;
        let hours = within_day / SECONDS_PER_HOUR;
        let minutes = within_day % SECONDS_PER_HOUR / SECONDS_PER_MINUTE;
        let seconds = within_day % SECONDS_PER_MINUTE;
        write!(f, "{hours:02}:{minutes:02}:{seconds:02}")
    }
}

/// Errors returned when parsing a [`TimeOfDay`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeOfDayError {
    /// The input did not have exactly three colon-separated fields.
    #[error("time {input:?} must have the form HH:MM:SS (found {found} field(s))")]
    WrongFieldCount {
        /// Text that failed to parse.
        input: String,
        /// Number of colon-separated fields present.
        found: usize,
    },
    /// A field was not an unsigned integer.
    #[error("time {input:?} has a non-numeric {field} field")]
    InvalidField {
        /// Text that failed to parse.
        input: String,
        /// Name of the offending field.
        field: &'static str,
        /// Underlying integer parse failure.
        #[source]
        source: ParseIntError,
    },
    /// A field was numeric but outside its civil range.
    #[error("time {input:?} has {field} {value} out of range")]
    OutOfRange {
        /// Text that failed to parse.
        input: String,
        /// Name of the offending field.
        field: &'static str,
        /// Parsed value.
        value: u32,
    },
}

impl FromStr for TimeOfDay {
    type Err = TimeOfDayError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = input.split(':').collect();
        let [hour, minute, second] = fields.as_slice() else {
            return Err(TimeOfDayError::WrongFieldCount {
                input: input.to_owned(),
                found: fields.len(),
            });
        };
        let parse = |field: &'static str, raw: &str| {
            raw.trim()
                .parse::<u32>()
                .map_err(|source| TimeOfDayError::InvalidField {
                    input: input.to_owned(),
                    field,
                    source,
                })
        };
        let time = Self::from_hms(
            parse("hour", hour)?,
            parse("minute", minute)?,
            parse("second", second)?,
        );
        time.map_err(|err| match err {
            TimeOfDayError::OutOfRange { field, value, .. } => TimeOfDayError::OutOfRange {
                input: input.to_owned(),
                field,
                value,
            },
            other => other,
        })
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for TimeOfDay {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for TimeOfDay {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// The courier's work day, `[start, end]`.
///
/// An `end` earlier than `start` is read as the next day, so the end is
/// always logically after the start.
///
/// # Examples
/// ```
/// use courier_core::{Shift, TimeOfDay};
///
/// let shift = Shift::new(
///     TimeOfDay::from_hms(22, 0, 0)?,
///     TimeOfDay::from_hms(6, 0, 0)?,
/// );
/// assert!(shift.crosses_midnight());
/// assert_eq!(shift.duration_seconds(), 8 * 3_600);
/// # Ok::<(), courier_core::TimeOfDayError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Shift {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl Shift {
    /// Build a shift, anchoring `end` on the next day when it precedes
    /// `start`.
    pub const fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        let anchored_end = if end.0 < start.0 { end.next_day() } else { end };
        Self {
            start,
            end: anchored_end,
        }
    }

    /// When the courier leaves the origin.
    pub const fn start(&self) -> TimeOfDay {
        self.start
    }

    /// Latest instant the courier may be back at the origin.
    pub const fn end(&self) -> TimeOfDay {
        self.end
    }

    /// Whether the shift runs past midnight.
    pub const fn crosses_midnight(&self) -> bool {
        self.end.0 >= SECONDS_PER_DAY
    }

    /// Length of the shift in seconds.
    pub const fn duration_seconds(&self) -> u32 {
        self.start.seconds_until(self.end)
    }

    /// Place a delivery window's bounds on the shift's timeline.
    ///
    /// Day shifts leave both bounds as written. On a shift that crosses
    /// midnight, a window whose `to` precedes its `from` wraps past midnight
    /// and only `to` moves to the next day; a window lying wholly before the
    /// shift start moves to the next day as a whole.
    ///
    /// # Examples
    /// ```
    /// use courier_core::{DeliveryWindow, Shift, TimeOfDay};
    ///
    /// let hm = |h, m| TimeOfDay::from_hms(h, m, 0).expect("valid time");
    /// let shift = Shift::new(hm(23, 30), hm(2, 0));
    /// let (opens, closes) = shift.anchor_window(DeliveryWindow::new(hm(22, 0), hm(1, 0)));
    /// assert_eq!(opens, hm(22, 0));
    /// assert_eq!(closes, hm(1, 0).next_day());
    /// ```
    pub const fn anchor_window(&self, window: DeliveryWindow) -> (TimeOfDay, TimeOfDay) {
        let DeliveryWindow { from, to } = window;
        if !self.crosses_midnight() {
            (from, to)
        } else if from.0 > to.0 {
            (from, to.next_day())
        } else if to.0 < self.start.0 {
            (from.next_day(), to.next_day())
        } else {
            (from, to)
        }
    }
}
