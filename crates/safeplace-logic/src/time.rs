//! In-game clock: minute rollover into hours and days.
//!
//! Time is tracked as a day counter plus a minute-of-day in `0..1440`.
//! Advancing never fails and never goes backwards.
//!
//! ```
//! use safeplace_logic::time::advance_time;
//!
//! let t = advance_time(1, 8, 0, 1440);
//! assert_eq!((t.day, t.hour, t.minute), (2, 8, 0));
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::MINUTES_PER_DAY;

/// Result of advancing the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvancedTime {
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    /// Minutes since midnight of `day`.
    pub minute_of_day: u32,
}

/// Add `minutes` to a day/hour/minute triple.
///
/// `hour` and `minute` are expected in `0..24` / `0..60`; out-of-range
/// inputs are folded into the total before rollover.
pub fn advance_time(day: u32, hour: u32, minute: u32, minutes: u32) -> AdvancedTime {
    let total = u64::from(hour) * 60 + u64::from(minute) + u64::from(minutes);
    let per_day = u64::from(MINUTES_PER_DAY);
    let minute_of_day = (total % per_day) as u32;
    let days_passed = (total / per_day) as u32;

    AdvancedTime {
        day: day.saturating_add(days_passed),
        hour: minute_of_day / 60,
        minute: minute_of_day % 60,
        minute_of_day,
    }
}

/// Coarse period of the day used by ambience and event selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => Self::Morning,
            12..=17 => Self::Afternoon,
            18..=21 => Self::Evening,
            _ => Self::Night,
        }
    }
}

/// The running game clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameClock {
    pub day: u32,
    /// Minutes since midnight, always `< 1440`.
    pub minute_of_day: u32,
}

impl Default for GameClock {
    /// Day 1, 08:00, the start of a new game.
    fn default() -> Self {
        Self {
            day: 1,
            minute_of_day: 8 * 60,
        }
    }
}

impl GameClock {
    pub fn new(day: u32, hour: u32, minute: u32) -> Self {
        let t = advance_time(day, hour, minute, 0);
        Self {
            day: t.day,
            minute_of_day: t.minute_of_day,
        }
    }

    pub fn hour(&self) -> u32 {
        self.minute_of_day / 60
    }

    pub fn minute(&self) -> u32 {
        self.minute_of_day % 60
    }

    /// Return the clock `minutes` later.
    pub fn advance(self, minutes: u32) -> Self {
        let t = advance_time(self.day, self.hour(), self.minute(), minutes);
        Self {
            day: t.day,
            minute_of_day: t.minute_of_day,
        }
    }

    pub fn time_of_day(&self) -> TimeOfDay {
        TimeOfDay::from_hour(self.hour())
    }

    pub fn is_night(&self) -> bool {
        self.time_of_day() == TimeOfDay::Night
    }

    /// `HH:MM` for journal headers.
    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.hour(), self.minute())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_day_rolls_over() {
        let t = advance_time(1, 8, 0, 1440);
        assert_eq!(t.day, 2);
        assert_eq!(t.hour, 8);
        assert_eq!(t.minute, 0);
    }

    #[test]
    fn zero_minutes_is_identity() {
        let t = advance_time(3, 23, 59, 0);
        assert_eq!((t.day, t.hour, t.minute), (3, 23, 59));
    }

    #[test]
    fn minute_carry_into_next_day() {
        let t = advance_time(3, 23, 59, 1);
        assert_eq!((t.day, t.hour, t.minute), (4, 0, 0));
        assert_eq!(t.minute_of_day, 0);
    }

    #[test]
    fn multi_day_jump() {
        // 10:30 + 3 days 2h 45m
        let t = advance_time(1, 10, 30, 3 * 1440 + 165);
        assert_eq!((t.day, t.hour, t.minute), (4, 13, 15));
    }

    #[test]
    fn bounds_hold_across_sweep() {
        for day in [0u32, 1, 17] {
            for hour in 0..24 {
                for minute in [0u32, 1, 29, 59] {
                    for minutes in [0u32, 1, 59, 60, 61, 719, 1439, 1440, 1441, 10_000] {
                        let t = advance_time(day, hour, minute, minutes);
                        assert!(t.hour < 24);
                        assert!(t.minute < 60);
                        let expected_day = day + (hour * 60 + minute + minutes) / 1440;
                        assert_eq!(t.day, expected_day);
                    }
                }
            }
        }
    }

    #[test]
    fn time_of_day_bands() {
        assert_eq!(TimeOfDay::from_hour(5), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(6), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(11), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(12), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(17), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(18), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(21), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(22), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(0), TimeOfDay::Night);
    }

    #[test]
    fn clock_advance_and_display() {
        let clock = GameClock::default();
        assert_eq!(clock.display(), "08:00");
        assert!(!clock.is_night());

        let later = clock.advance(14 * 60 + 5);
        assert_eq!(later.day, 1);
        assert_eq!(later.display(), "22:05");
        assert!(later.is_night());

        let next = later.advance(120);
        assert_eq!(next.day, 2);
        assert_eq!(next.display(), "00:05");
    }

    #[test]
    fn clock_new_normalises_overflow() {
        let clock = GameClock::new(1, 25, 0);
        assert_eq!(clock.day, 2);
        assert_eq!(clock.hour(), 1);
    }
}
