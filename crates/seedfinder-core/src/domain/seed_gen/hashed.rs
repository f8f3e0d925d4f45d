//! Gen 5 hashed-seed space
//!
//! Enumeration order, innermost first:
//!
//! 1. held-button combination
//! 2. Timer0
//! 3. VCount
//! 4. VFrame
//! 5. clock, second by second across the date range
//!
//! Sequential stepping rewrites only the message words that changed, so the
//! common case (next button combination) touches one word before rehashing.

use super::clock::{ClockPosition, ClockRange, ClockSpace, Tick};
use super::{ButtonComboSet, SeedGenerator, shard_bounds};
use crate::domain::criteria::CriteriaError;
use crate::domain::seed::{HashedSeed, HashedSeedParameters, Nazo};
use crate::domain::types::{ButtonMask, ConsoleType, GameVersion};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Console profile plus the ranges to search
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashedSeedRanges {
    pub version: GameVersion,
    pub console: ConsoleType,
    pub mac_address: u64,
    pub timer0: RangeInclusive<u16>,
    pub vcount: RangeInclusive<u8>,
    pub vframe: RangeInclusive<u8>,
    pub clock: ClockRange,
    pub buttons: ButtonComboSet,
    /// Overrides the built-in constants for `(version, console)`
    pub nazo: Option<Nazo>,
}

impl HashedSeedRanges {
    pub fn validate(&self) -> Result<(), CriteriaError> {
        if self.timer0.is_empty() {
            return Err(CriteriaError::InvalidSeedRange(format!("Timer0 {:?}", self.timer0)));
        }
        if self.vcount.is_empty() {
            return Err(CriteriaError::InvalidSeedRange(format!("VCount {:?}", self.vcount)));
        }
        if self.vframe.is_empty() {
            return Err(CriteriaError::InvalidSeedRange(format!("VFrame {:?}", self.vframe)));
        }
        if self.buttons.is_empty() {
            return Err(CriteriaError::EmptySeedSpace);
        }
        Ok(())
    }
}

#[inline]
fn span<T: Copy + Into<u64>>(range: &RangeInclusive<T>) -> u64 {
    (*range.end()).into() - (*range.start()).into() + 1
}

/// Decoded enumeration coordinates
#[derive(Clone, Copy, Debug)]
struct Coords {
    button: usize,
    timer0: u16,
    vcount: u8,
    vframe: u8,
    clock: Option<ClockPosition>,
}

#[derive(Clone, Debug)]
pub struct HashedSeedGenerator {
    ranges: HashedSeedRanges,
    clock: ClockSpace,
    coords: Coords,
    current: HashedSeed,
    next: u64,
    end: u64,
}

impl HashedSeedGenerator {
    pub fn new(ranges: HashedSeedRanges) -> Result<Self, CriteriaError> {
        ranges.validate()?;
        let clock = ClockSpace::new(&ranges.clock)?;
        let end = [
            ranges.buttons.len() as u64,
            span(&ranges.timer0),
            span(&ranges.vcount),
            span(&ranges.vframe),
        ]
        .into_iter()
        .try_fold(clock.len(), u64::checked_mul)
        .ok_or_else(|| CriteriaError::InvalidSeedRange("more than 2^64 seeds to enumerate".to_string()))?;
        Ok(Self::shard(ranges, clock, 0, end))
    }

    fn shard(ranges: HashedSeedRanges, clock: ClockSpace, next: u64, end: u64) -> Self {
        let coords = Self::decode(&ranges, &clock, next);
        let current = Self::build(&ranges, &clock, &coords);
        Self {
            ranges,
            clock,
            coords,
            current,
            next,
            end,
        }
    }

    fn decode(ranges: &HashedSeedRanges, clock: &ClockSpace, index: u64) -> Coords {
        let buttons = ranges.buttons.len() as u64;
        let button = (index % buttons) as usize;
        let rest = index / buttons;
        let timer0 = rest % span(&ranges.timer0);
        let rest = rest / span(&ranges.timer0);
        let vcount = rest % span(&ranges.vcount);
        let rest = rest / span(&ranges.vcount);
        let vframe = rest % span(&ranges.vframe);
        let rest = rest / span(&ranges.vframe);

        Coords {
            button,
            timer0: ranges.timer0.start() + timer0 as u16,
            vcount: ranges.vcount.start() + vcount as u8,
            vframe: ranges.vframe.start() + vframe as u8,
            clock: clock.position(rest),
        }
    }

    fn build(ranges: &HashedSeedRanges, clock: &ClockSpace, coords: &Coords) -> HashedSeed {
        let (date, time) = match coords.clock {
            Some(pos) => (pos.date, clock.time(&pos)),
            None => (ranges.clock.end, Default::default()),
        };
        let params = HashedSeedParameters {
            version: ranges.version,
            console: ranges.console,
            mac_address: ranges.mac_address,
            timer0: coords.timer0,
            vcount: coords.vcount,
            vframe: coords.vframe,
            date,
            time,
            buttons: ranges.buttons.get(coords.button).unwrap_or(ButtonMask::NONE),
        };
        match ranges.nazo {
            Some(nazo) => HashedSeed::with_nazo(params, nazo),
            None => HashedSeed::new(params),
        }
    }

    /// Reposition at absolute enumeration index `index`
    pub fn skip_to(&mut self, index: u64) {
        self.next = index;
        self.coords = Self::decode(&self.ranges, &self.clock, index);
        self.current = Self::build(&self.ranges, &self.clock, &self.coords);
    }

    /// Index of the seed the next call returns
    #[inline]
    pub fn position(&self) -> u64 {
        self.next
    }

    fn step(&mut self) {
        let c = &mut self.coords;
        let seed = &mut self.current;
        let ranges = &self.ranges;

        c.button += 1;
        if c.button < ranges.buttons.len() {
            seed.set_buttons(ranges.buttons.get(c.button).unwrap_or(ButtonMask::NONE));
            return;
        }
        c.button = 0;
        seed.set_buttons(ranges.buttons.get(0).unwrap_or(ButtonMask::NONE));

        if c.timer0 < *ranges.timer0.end() {
            c.timer0 += 1;
            seed.set_timer0(c.timer0);
            return;
        }
        c.timer0 = *ranges.timer0.start();
        seed.set_timer0(c.timer0);

        if c.vcount < *ranges.vcount.end() {
            c.vcount += 1;
            seed.set_vcount(c.vcount);
            return;
        }
        c.vcount = *ranges.vcount.start();
        seed.set_vcount(c.vcount);

        if c.vframe < *ranges.vframe.end() {
            c.vframe += 1;
            seed.set_vframe(c.vframe);
            return;
        }
        c.vframe = *ranges.vframe.start();
        seed.set_vframe(c.vframe);

        c.clock = c.clock.and_then(|pos| self.clock.step(pos)).map(|(pos, tick)| {
            let time = self.clock.time(&pos);
            match tick {
                Tick::Second => seed.set_second(time.second),
                Tick::Minute | Tick::Hour => seed.set_time(time),
                Tick::Day => {
                    seed.set_date(pos.date);
                    seed.set_time(time);
                }
            }
            pos
        });
    }
}

impl SeedGenerator for HashedSeedGenerator {
    type Seed = HashedSeed;

    fn num_seeds(&self) -> u64 {
        self.end.saturating_sub(self.next)
    }

    fn next_seed(&mut self) -> Option<HashedSeed> {
        if self.next >= self.end {
            return None;
        }
        self.coords.clock?;
        let seed = self.current.clone();
        self.next += 1;
        self.step();
        Some(seed)
    }

    fn split(self, n: usize) -> Vec<Self> {
        shard_bounds(self.next, self.end, n)
            .into_iter()
            .map(|(next, end)| Self::shard(self.ranges.clone(), self.clock.clone(), next, end))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::seed::{GameDate, TimeFilter};

    fn ranges() -> HashedSeedRanges {
        let day = GameDate::new(2011, 12, 31).unwrap();
        let next = GameDate::new(2012, 1, 1).unwrap();
        HashedSeedRanges {
            version: GameVersion::White2,
            console: ConsoleType::Dsi,
            mac_address: 0x0009_BF6D_93CE,
            timer0: 0x10F5..=0x10F6,
            vcount: 0x82..=0x82,
            vframe: 8..=9,
            clock: ClockRange::new(day, next, TimeFilter::all().hours(23..=23).minutes(59..=59).seconds(58..=59))
                .unwrap(),
            buttons: ButtonComboSet::up_to(1),
            nazo: None,
        }
    }

    fn drain(mut generator: HashedSeedGenerator) -> Vec<HashedSeed> {
        std::iter::from_fn(|| generator.next_seed()).collect()
    }

    #[test]
    fn test_num_seeds() {
        let generator = HashedSeedGenerator::new(ranges()).unwrap();
        assert_eq!(generator.num_seeds(), 13 * 2 * 2 * 2 * 2);
    }

    #[test]
    fn test_rejects_overflowing_space() {
        let mut wide = ranges();
        wide.clock = ClockRange::new(
            GameDate::new(2000, 1, 1).unwrap(),
            GameDate::new(2099, 12, 31).unwrap(),
            TimeFilter::all(),
        )
        .unwrap();
        wide.timer0 = 0..=0xFFFF;
        wide.vcount = 0..=0xFF;
        wide.vframe = 0..=0xFF;
        wide.buttons = ButtonComboSet::up_to(3);
        assert!(matches!(
            HashedSeedGenerator::new(wide.clone()),
            Err(CriteriaError::InvalidSeedRange(_))
        ));

        wide.buttons = ButtonComboSet::none();
        let generator = HashedSeedGenerator::new(wide).unwrap();
        assert_eq!(generator.num_seeds(), 36525 * 86400 * (1 << 32));
    }

    #[test]
    fn test_incremental_matches_fresh_hash() {
        let seeds = drain(HashedSeedGenerator::new(ranges()).unwrap());
        assert_eq!(seeds.len(), 13 * 16);
        for seed in &seeds {
            let fresh = HashedSeed::new(*seed.parameters());
            assert_eq!(seed.message(), fresh.message());
            assert_eq!(seed.raw_seed(), fresh.raw_seed());
        }
    }

    #[test]
    fn test_enumeration_order() {
        let seeds = drain(HashedSeedGenerator::new(ranges()).unwrap());
        let first = seeds[0].parameters();
        let second = seeds[1].parameters();
        let after_buttons = seeds[13].parameters();
        let after_timer0 = seeds[26].parameters();

        assert_eq!(first.buttons, ButtonMask::NONE);
        assert_eq!(second.timer0, first.timer0);
        assert_ne!(second.buttons, first.buttons);
        assert_eq!(after_buttons.timer0, 0x10F6);
        assert_eq!(after_buttons.buttons, ButtonMask::NONE);
        assert_eq!(after_timer0.timer0, 0x10F5);
        assert_eq!(after_timer0.vframe, 9);

        let last = seeds[seeds.len() - 1].parameters();
        assert_eq!(last.date, GameDate::new(2012, 1, 1).unwrap());
        assert_eq!(last.time.second, 59);
    }

    #[test]
    fn test_skip_to_matches_sequential() {
        let seeds = drain(HashedSeedGenerator::new(ranges()).unwrap());
        let mut generator = HashedSeedGenerator::new(ranges()).unwrap();
        for index in [0u64, 1, 12, 13, 51, 52, 100, 207] {
            generator.skip_to(index);
            assert_eq!(generator.position(), index);
            let seed = generator.next_seed().unwrap();
            assert_eq!(seed.parameters(), seeds[index as usize].parameters());
        }
    }

    #[test]
    fn test_split_is_partition() {
        let whole = drain(HashedSeedGenerator::new(ranges()).unwrap());
        let shards = HashedSeedGenerator::new(ranges()).unwrap().split(5);
        assert_eq!(shards.len(), 5);
        let joined: Vec<HashedSeed> = shards.into_iter().flat_map(drain).collect();
        let raw = |seeds: &[HashedSeed]| seeds.iter().map(HashedSeed::raw_seed).collect::<Vec<_>>();
        assert_eq!(raw(&joined), raw(&whole));
    }

    #[test]
    fn test_rejects_empty_ranges() {
        let mut bad = ranges();
        bad.timer0 = RangeInclusive::new(0x10F6, 0x10F5);
        assert!(HashedSeedGenerator::new(bad).is_err());

        let mut no_buttons = ranges();
        no_buttons.buttons = ButtonComboSet::from_masks([]);
        assert_eq!(
            HashedSeedGenerator::new(no_buttons).unwrap_err(),
            CriteriaError::EmptySeedSpace
        );
    }
}
