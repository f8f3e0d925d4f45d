//! Console calendar (2000-01-01 through 2099-12-31)

use crate::domain::criteria::CriteriaError;
use serde::{Deserialize, Serialize};

pub const MIN_YEAR: u16 = 2000;
pub const MAX_YEAR: u16 = 2099;

/// Day of week of 2000-01-01 (0 = Sunday)
const EPOCH_WEEKDAY: u32 = 6;

/// Calendar date as the console's RTC stores it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "GameDateFields")]
pub struct GameDate {
    year: u16,
    month: u8,
    day: u8,
}

#[derive(Deserialize)]
struct GameDateFields {
    year: u16,
    month: u8,
    day: u8,
}

impl TryFrom<GameDateFields> for GameDate {
    type Error = CriteriaError;

    fn try_from(fields: GameDateFields) -> Result<Self, CriteriaError> {
        Self::new(fields.year, fields.month, fields.day)
    }
}

impl GameDate {
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, CriteriaError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(CriteriaError::InvalidSeedRange(format!(
                "year {} outside {}..={}",
                year, MIN_YEAR, MAX_YEAR
            )));
        }
        if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
            return Err(CriteriaError::InvalidSeedRange(format!(
                "invalid date {:04}-{:02}-{:02}",
                year, month, day
            )));
        }
        Ok(Self { year, month, day })
    }

    #[inline]
    pub const fn year(&self) -> u16 {
        self.year
    }

    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    #[inline]
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Days since 2000-01-01
    pub fn day_number(&self) -> u32 {
        let mut days = 0u32;
        for y in MIN_YEAR..self.year {
            days += if is_leap_year(y) { 366 } else { 365 };
        }
        for m in 1..self.month {
            days += days_in_month(self.year, m) as u32;
        }
        days + self.day as u32 - 1
    }

    /// Inverse of [`day_number`](Self::day_number)
    pub fn from_day_number(mut days: u32) -> Option<Self> {
        let mut year = MIN_YEAR;
        loop {
            let len = if is_leap_year(year) { 366 } else { 365 };
            if days < len {
                break;
            }
            days -= len;
            year += 1;
            if year > MAX_YEAR {
                return None;
            }
        }
        let mut month = 1u8;
        loop {
            let len = days_in_month(year, month) as u32;
            if days < len {
                break;
            }
            days -= len;
            month += 1;
        }
        Some(Self {
            year,
            month,
            day: days as u8 + 1,
        })
    }

    /// 0 = Sunday .. 6 = Saturday
    pub fn weekday(&self) -> u8 {
        ((self.day_number() + EPOCH_WEEKDAY) % 7) as u8
    }

    /// Following day, or `None` past 2099-12-31
    pub fn succ(&self) -> Option<Self> {
        if self.day < days_in_month(self.year, self.month) {
            return Some(Self {
                day: self.day + 1,
                ..*self
            });
        }
        if self.month < 12 {
            return Some(Self {
                month: self.month + 1,
                day: 1,
                ..*self
            });
        }
        if self.year < MAX_YEAR {
            return Some(Self {
                year: self.year + 1,
                month: 1,
                day: 1,
            });
        }
        None
    }
}

impl std::fmt::Display for GameDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Time of day
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GameTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl GameTime {
    pub fn new(hour: u8, minute: u8, second: u8) -> Result<Self, CriteriaError> {
        if hour > 23 || minute > 59 || second > 59 {
            return Err(CriteriaError::InvalidSeedRange(format!(
                "invalid time {:02}:{:02}:{:02}",
                hour, minute, second
            )));
        }
        Ok(Self {
            hour,
            minute,
            second,
        })
    }
}

impl std::fmt::Display for GameTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// Allowed hours / minutes / seconds as bit masks
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeFilter {
    hours: u32,
    minutes: u64,
    seconds: u64,
}

impl TimeFilter {
    const ALL_HOURS: u32 = (1 << 24) - 1;
    const ALL_MINUTES: u64 = (1 << 60) - 1;

    pub const fn all() -> Self {
        Self {
            hours: Self::ALL_HOURS,
            minutes: Self::ALL_MINUTES,
            seconds: Self::ALL_MINUTES,
        }
    }

    /// Restrict hours to the inclusive range
    #[must_use]
    pub fn hours(mut self, range: std::ops::RangeInclusive<u8>) -> Self {
        self.hours = range.filter(|&h| h < 24).fold(0, |m, h| m | 1 << h);
        self
    }

    #[must_use]
    pub fn minutes(mut self, range: std::ops::RangeInclusive<u8>) -> Self {
        self.minutes = range.filter(|&m| m < 60).fold(0, |acc, m| acc | 1 << m);
        self
    }

    #[must_use]
    pub fn seconds(mut self, range: std::ops::RangeInclusive<u8>) -> Self {
        self.seconds = range.filter(|&s| s < 60).fold(0, |acc, s| acc | 1 << s);
        self
    }

    #[inline]
    pub const fn allows_hour(&self, hour: u8) -> bool {
        hour < 24 && self.hours & (1 << hour) != 0
    }

    #[inline]
    pub const fn allows_minute(&self, minute: u8) -> bool {
        minute < 60 && self.minutes & (1 << minute) != 0
    }

    #[inline]
    pub const fn allows_second(&self, second: u8) -> bool {
        second < 60 && self.seconds & (1 << second) != 0
    }

    pub fn hour_list(&self) -> Vec<u8> {
        (0..24).filter(|&h| self.allows_hour(h)).collect()
    }

    pub fn minute_list(&self) -> Vec<u8> {
        (0..60).filter(|&m| self.allows_minute(m)).collect()
    }

    pub fn second_list(&self) -> Vec<u8> {
        (0..60).filter(|&s| self.allows_second(s)).collect()
    }
}

impl Default for TimeFilter {
    fn default() -> Self {
        Self::all()
    }
}

#[inline]
pub const fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub const fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Packed BCD of a two-digit value
#[inline]
pub const fn bcd(value: u8) -> u32 {
    (((value / 10) << 4) | (value % 10)) as u32
}
