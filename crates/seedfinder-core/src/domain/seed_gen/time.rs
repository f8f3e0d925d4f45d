//! Clock-based 32-bit seeds (Gen 4 time seeds and Gen 5 C-Gear seeds)
//!
//! Enumeration order: delay innermost, then second by second through the
//! date range. Seconds rejected by the filter are not visited.

use super::clock::{ClockPosition, ClockRange, ClockSpace};
use super::{SeedGenerator, shard_bounds};
use crate::domain::criteria::CriteriaError;
use crate::domain::seed::{CGearSeed, GameDate, GameTime, TimeFilter, TimeSeed};
use serde::{Deserialize, Serialize};

/// A seed with the clock reading and delay that produced it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timed<S> {
    pub seed: S,
    pub date: GameDate,
    pub time: GameTime,
    pub delay: u32,
}

// =============================================================================
// TimeSeedGenerator
// =============================================================================

#[derive(Clone, Debug)]
pub struct TimeSeedGenerator {
    clock: ClockSpace,
    min_delay: u32,
    num_delays: u32,
    position: Option<ClockPosition>,
    delay_index: u32,
    next: u64,
    end: u64,
}

impl TimeSeedGenerator {
    pub fn new(range: &ClockRange, min_delay: u32, max_delay: u32) -> Result<Self, CriteriaError> {
        if min_delay > max_delay {
            return Err(CriteriaError::InvalidSeedRange(format!(
                "delay {} > {}",
                min_delay, max_delay
            )));
        }
        let clock = ClockSpace::new(range)?;
        let num_delays = max_delay - min_delay + 1;
        let end = clock.len() * num_delays as u64;
        Ok(Self::shard(clock, min_delay, num_delays, 0, end))
    }

    /// Every second of `year` that passes the hour / second filter
    pub fn for_year(
        year: u16,
        filter: TimeFilter,
        min_delay: u32,
        max_delay: u32,
    ) -> Result<Self, CriteriaError> {
        Self::new(&ClockRange::year(year, filter)?, min_delay, max_delay)
    }

    fn shard(clock: ClockSpace, min_delay: u32, num_delays: u32, next: u64, end: u64) -> Self {
        let position = clock.position(next / num_delays as u64);
        Self {
            clock,
            min_delay,
            num_delays,
            position,
            delay_index: (next % num_delays as u64) as u32,
            next,
            end,
        }
    }
}

impl SeedGenerator for TimeSeedGenerator {
    type Seed = Timed<TimeSeed>;

    fn num_seeds(&self) -> u64 {
        self.end.saturating_sub(self.next)
    }

    fn next_seed(&mut self) -> Option<Timed<TimeSeed>> {
        if self.next >= self.end {
            return None;
        }
        let pos = self.position?;
        let time = self.clock.time(&pos);
        let delay = self.min_delay + self.delay_index;
        let seed = Timed {
            seed: TimeSeed::new(pos.date, time, delay),
            date: pos.date,
            time,
            delay,
        };

        self.next += 1;
        self.delay_index += 1;
        if self.delay_index == self.num_delays {
            self.delay_index = 0;
            self.position = self.clock.step(pos).map(|(next, _)| next);
        }
        Some(seed)
    }

    fn split(self, n: usize) -> Vec<Self> {
        shard_bounds(self.next, self.end, n)
            .into_iter()
            .map(|(next, end)| Self::shard(self.clock.clone(), self.min_delay, self.num_delays, next, end))
            .collect()
    }
}

// =============================================================================
// CGearSeedGenerator
// =============================================================================

/// Same walk as [`TimeSeedGenerator`], with the MAC address folded in
#[derive(Clone, Debug)]
pub struct CGearSeedGenerator {
    inner: TimeSeedGenerator,
    mac_address: u64,
}

impl CGearSeedGenerator {
    pub fn new(
        range: &ClockRange,
        min_delay: u32,
        max_delay: u32,
        mac_address: u64,
    ) -> Result<Self, CriteriaError> {
        Ok(Self {
            inner: TimeSeedGenerator::new(range, min_delay, max_delay)?,
            mac_address,
        })
    }
}

impl SeedGenerator for CGearSeedGenerator {
    type Seed = Timed<CGearSeed>;

    fn num_seeds(&self) -> u64 {
        self.inner.num_seeds()
    }

    fn next_seed(&mut self) -> Option<Timed<CGearSeed>> {
        let timed = self.inner.next_seed()?;
        Some(Timed {
            seed: CGearSeed::new(timed.date, timed.time, timed.delay, self.mac_address),
            date: timed.date,
            time: timed.time,
            delay: timed.delay,
        })
    }

    fn split(self, n: usize) -> Vec<Self> {
        let mac_address = self.mac_address;
        self.inner
            .split(n)
            .into_iter()
            .map(|inner| Self { inner, mac_address })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_day(filter: TimeFilter) -> ClockRange {
        let day = GameDate::new(2010, 5, 15).unwrap();
        ClockRange::new(day, day, filter).unwrap()
    }

    fn drain<G: SeedGenerator>(mut generator: G) -> Vec<G::Seed> {
        std::iter::from_fn(|| generator.next_seed()).collect()
    }

    #[test]
    fn test_delay_is_innermost() {
        let filter = TimeFilter::all().hours(12..=12).minutes(0..=0).seconds(10..=11);
        let generator = TimeSeedGenerator::new(&one_day(filter), 600, 602).unwrap();
        assert_eq!(generator.num_seeds(), 6);

        let seeds = drain(generator);
        let order: Vec<(u8, u32)> = seeds.iter().map(|s| (s.time.second, s.delay)).collect();
        assert_eq!(order, vec![(10, 600), (10, 601), (10, 602), (11, 600), (11, 601), (11, 602)]);
        for timed in &seeds {
            assert_eq!(timed.seed, TimeSeed::new(timed.date, timed.time, timed.delay));
        }
    }

    #[test]
    fn test_split_is_partition() {
        let filter = TimeFilter::all().hours(3..=4).minutes(0..=1);
        let whole = TimeSeedGenerator::new(&one_day(filter), 500, 504).unwrap();
        let expected = drain(whole.clone());

        let mut joined = Vec::new();
        for shard in whole.split(7) {
            joined.extend(drain(shard));
        }
        assert_eq!(joined, expected);
    }

    #[test]
    fn test_year_generator_size() {
        let filter = TimeFilter::all().hours(0..=0).minutes(0..=0).seconds(0..=0);
        let generator = TimeSeedGenerator::for_year(2012, filter, 0, 9).unwrap();
        assert_eq!(generator.num_seeds(), 366 * 10);
    }

    #[test]
    fn test_cgear_adds_mac() {
        let filter = TimeFilter::all().hours(8..=8).minutes(30..=30).seconds(0..=0);
        let mac = 0x0009_BF6D_93CE;
        let generator = CGearSeedGenerator::new(&one_day(filter), 0x40, 0x41, mac).unwrap();
        let seeds = drain(generator);
        assert_eq!(seeds.len(), 2);
        for timed in seeds {
            assert_eq!(timed.seed, CGearSeed::new(timed.date, timed.time, timed.delay, mac));
        }
    }

    #[test]
    fn test_invalid_delay_range() {
        let err = TimeSeedGenerator::new(&one_day(TimeFilter::all()), 10, 9).unwrap_err();
        assert!(matches!(err, CriteriaError::InvalidSeedRange(_)));
    }
}
