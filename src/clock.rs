use std::{fmt, str::FromStr};

use chrono::{Duration, NaiveTime};
use serde_with::{DeserializeFromStr, SerializeDisplay};

use crate::planner::PlanError;

const MINUTES_PER_DAY: u64 = 24 * 60;

/// Wall-clock time of day with minute precision, written as `HH:MM`.
///
/// There is no date attached: adding minutes past midnight wraps around.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, SerializeDisplay, DeserializeFromStr,
)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self, PlanError> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| PlanError::InvalidTime(format!("{hour}:{minute:02}")))
    }

    /// For literal times baked into defaults; panics when out of range.
    pub(crate) fn fixed(hour: u32, minute: u32) -> Self {
        Self::from_hm(hour, minute).expect("literal clock time should be in range")
    }

    pub fn add_minutes(self, minutes: u64) -> Self {
        // Reduced first so the delta never leaves chrono's range.
        let delta = Duration::minutes((minutes % MINUTES_PER_DAY) as i64);
        let (wrapped, _) = self.0.overflowing_add_signed(delta);
        Self(wrapped)
    }

    /// Closed interval test, both ends inclusive.
    pub fn is_within(&self, start: ClockTime, end: ClockTime) -> bool {
        start <= *self && *self <= end
    }

    /// `4:05 PM` style; midnight and noon show as 12.
    pub fn to_12h(&self) -> String {
        self.0.format("%-I:%M %p").to_string()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl FromStr for ClockTime {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PlanError::InvalidTime(s.to_string());
        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if !(1..=2).contains(&hour.len()) || minute.len() != 2 {
            return Err(invalid());
        }
        if !all_digits(hour) || !all_digits(minute) {
            return Err(invalid());
        }
        let hour: u32 = hour.parse().map_err(|_| invalid())?;
        let minute: u32 = minute.parse().map_err(|_| invalid())?;
        Self::from_hm(hour, minute).map_err(|_| invalid())
    }
}

/// `1h 20m` when there is at least an hour, `45m` otherwise.
pub fn format_duration(total_minutes: u64) -> String {
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}
