//! 32-bit time seeds (Gen 4 and Gen 5 C-Gear)
//!
//! ```text
//! AABBCCCC
//! AA   = (month * day + minute + second) & 0xFF
//! BB   = hour
//! CCCC = (year - 2000 + delay) & 0xFFFF
//! ```
//!
//! The packing is lossy, so recovering the calendar values means enumerating
//! every date and time that reproduces `AA`.

use super::date::{GameDate, GameTime, TimeFilter, days_in_month};
use serde::{Deserialize, Serialize};

#[inline]
const fn pack(ab: u32, hour: u32, cd: u32) -> u32 {
    ((ab & 0xFF) << 24) | ((hour & 0xFF) << 16) | (cd & 0xFFFF)
}

#[inline]
const fn checksum(month: u8, day: u8, minute: u8, second: u8) -> u32 {
    (month as u32 * day as u32 + minute as u32 + second as u32) & 0xFF
}

/// One calendar reading that reproduces a seed's checksum byte
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeElements {
    pub date: GameDate,
    pub time: GameTime,
}

// =============================================================================
// TimeSeed
// =============================================================================

/// Gen 4 initial seed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeSeed(u32);

impl TimeSeed {
    pub fn new(date: GameDate, time: GameTime, delay: u32) -> Self {
        let ab = checksum(date.month(), date.day(), time.minute, time.second);
        let cd = (date.year() as u32 - 2000).wrapping_add(delay);
        Self(pack(ab, time.hour as u32, cd))
    }

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(&self) -> u32 {
        self.0
    }

    /// Top byte (date/time checksum)
    #[inline]
    pub const fn ab(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub const fn hour(&self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Seeds whose hour byte exceeds 23 cannot come from a real clock
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.hour() <= 23
    }

    /// Delay encoded in the low word, given the year
    pub const fn delay(&self, year: u16) -> u32 {
        (self.0 & 0xFFFF).wrapping_sub(year as u32 - 2000) & 0xFFFF
    }

    /// Every (date, time) in `year` that reproduces this seed's checksum
    ///
    /// The hour comes from the seed itself; seconds outside the filter are
    /// skipped.
    pub fn time_elements(&self, year: u16, seconds: &TimeFilter) -> Vec<TimeElements> {
        let mut elements = Vec::new();
        if !self.is_valid() {
            return elements;
        }
        let ab = self.ab() as u32;
        let hour = self.hour();

        for month in 1..=12u8 {
            for day in 1..=days_in_month(year, month) {
                let Ok(date) = GameDate::new(year, month, day) else {
                    continue;
                };
                for minute in 0..60u8 {
                    for second in 0..60u8 {
                        if !seconds.allows_second(second) {
                            continue;
                        }
                        if checksum(month, day, minute, second) == ab {
                            elements.push(TimeElements {
                                date,
                                time: GameTime {
                                    hour,
                                    minute,
                                    second,
                                },
                            });
                        }
                    }
                }
            }
        }
        elements
    }
}

impl std::fmt::Display for TimeSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:08X}", self.0)
    }
}

// =============================================================================
// CGearSeed
// =============================================================================

/// Gen 5 C-Gear seed: time seed plus the low 24 bits of the MAC address
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CGearSeed(u32);

impl CGearSeed {
    pub fn new(date: GameDate, time: GameTime, delay: u32, mac_address: u64) -> Self {
        let base = TimeSeed::new(date, time, delay).raw();
        Self(base.wrapping_add((mac_address & 0xFF_FFFF) as u32))
    }

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(&self) -> u32 {
        self.0
    }

    /// Time seed with the MAC contribution removed
    pub const fn time_seed(&self, mac_address: u64) -> TimeSeed {
        TimeSeed(self.0.wrapping_sub((mac_address & 0xFF_FFFF) as u32))
    }
}

impl std::fmt::Display for CGearSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:08X}", self.0)
    }
}
