//! Second-by-second walk over a date range

use crate::domain::criteria::CriteriaError;
use crate::domain::seed::{GameDate, GameTime, TimeFilter};
use serde::{Deserialize, Serialize};

/// Inclusive date range with an hour / minute / second filter
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockRange {
    pub start: GameDate,
    pub end: GameDate,
    pub filter: TimeFilter,
}

impl ClockRange {
    pub fn new(start: GameDate, end: GameDate, filter: TimeFilter) -> Result<Self, CriteriaError> {
        if end < start {
            return Err(CriteriaError::InvalidSeedRange(format!(
                "end date {} is before start date {}",
                end, start
            )));
        }
        Ok(Self { start, end, filter })
    }

    /// Every day of `year`
    pub fn year(year: u16, filter: TimeFilter) -> Result<Self, CriteriaError> {
        Self::new(GameDate::new(year, 1, 1)?, GameDate::new(year, 12, 31)?, filter)
    }

    /// Zero when `end` precedes `start`
    pub fn days(&self) -> u32 {
        (self.end.day_number() + 1).saturating_sub(self.start.day_number())
    }
}

/// Which clock field changed on the last step (smaller fields reset too)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Tick {
    Second,
    Minute,
    Hour,
    Day,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ClockPosition {
    pub date: GameDate,
    day: u32,
    hour: usize,
    minute: usize,
    second: usize,
}

/// Expanded [`ClockRange`] with the allowed values listed out
#[derive(Clone, Debug)]
pub(crate) struct ClockSpace {
    first_day: u32,
    days: u32,
    hours: Vec<u8>,
    minutes: Vec<u8>,
    seconds: Vec<u8>,
}

impl ClockSpace {
    pub fn new(range: &ClockRange) -> Result<Self, CriteriaError> {
        let range = ClockRange::new(range.start, range.end, range.filter)?;
        let space = Self {
            first_day: range.start.day_number(),
            days: range.days(),
            hours: range.filter.hour_list(),
            minutes: range.filter.minute_list(),
            seconds: range.filter.second_list(),
        };
        if space.len() == 0 {
            return Err(CriteriaError::EmptySeedSpace);
        }
        Ok(space)
    }

    #[inline]
    pub fn seconds_per_day(&self) -> u64 {
        (self.hours.len() * self.minutes.len() * self.seconds.len()) as u64
    }

    pub fn len(&self) -> u64 {
        self.days as u64 * self.seconds_per_day()
    }

    /// Decode an enumeration index
    pub fn position(&self, index: u64) -> Option<ClockPosition> {
        if index >= self.len() {
            return None;
        }
        let second = (index % self.seconds.len() as u64) as usize;
        let rest = index / self.seconds.len() as u64;
        let minute = (rest % self.minutes.len() as u64) as usize;
        let rest = rest / self.minutes.len() as u64;
        let hour = (rest % self.hours.len() as u64) as usize;
        let day = (rest / self.hours.len() as u64) as u32;

        Some(ClockPosition {
            date: GameDate::from_day_number(self.first_day + day)?,
            day,
            hour,
            minute,
            second,
        })
    }

    pub fn time(&self, pos: &ClockPosition) -> GameTime {
        GameTime {
            hour: self.hours[pos.hour],
            minute: self.minutes[pos.minute],
            second: self.seconds[pos.second],
        }
    }

    /// Next allowed second, `None` past the end of the range
    pub fn step(&self, mut pos: ClockPosition) -> Option<(ClockPosition, Tick)> {
        pos.second += 1;
        if pos.second < self.seconds.len() {
            return Some((pos, Tick::Second));
        }
        pos.second = 0;
        pos.minute += 1;
        if pos.minute < self.minutes.len() {
            return Some((pos, Tick::Minute));
        }
        pos.minute = 0;
        pos.hour += 1;
        if pos.hour < self.hours.len() {
            return Some((pos, Tick::Hour));
        }
        pos.hour = 0;
        pos.day += 1;
        if pos.day >= self.days {
            return None;
        }
        pos.date = pos.date.succ()?;
        Some((pos, Tick::Day))
    }
}
