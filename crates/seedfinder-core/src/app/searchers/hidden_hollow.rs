//! Black 2 / White 2 hidden hollow search
//!
//! Looks for frames on which one chosen hollow fills with a given sub table
//! and slot roll.

use super::{Gen5Result, hashed_seed_count};
use crate::app::search::{FrameSearcher, Search, scan_window};
use crate::domain::criteria::{CriteriaError, ExpectedResults, FrameRange, ResultEstimate};
use crate::domain::frame::hidden_hollow::HOLLOW_COUNT;
use crate::domain::frame::{HiddenHollowGenerator, HollowSpawn};
use crate::domain::seed::HashedSeed;
use crate::domain::seed_gen::{HashedSeedGenerator, HashedSeedRanges};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Chance in percent that an empty hollow fills
const FILL_PERCENT: u64 = 5;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiddenHollowCriteria {
    pub ranges: HashedSeedRanges,
    /// Hollows already holding something
    pub filled: [bool; HOLLOW_COUNT],
    /// Hollow that must fill (0-based)
    pub hollow: usize,
    pub sub_slot: Option<u8>,
    /// Accepted percent rolls for the table entry
    pub slot: RangeInclusive<u8>,
    pub frames: FrameRange,
    /// Count `frames` from the first frame the player can act on
    pub start_from_initial_pid_frame: bool,
    pub memory_link: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HiddenHollowHit {
    pub number: u32,
    /// Generator state the frame was drawn from
    pub seed: u64,
    pub spawn: HollowSpawn,
}

#[derive(Clone, Debug)]
pub struct HiddenHollowSearch {
    criteria: HiddenHollowCriteria,
}

impl HiddenHollowSearch {
    pub fn new(criteria: HiddenHollowCriteria) -> Result<Self, CriteriaError> {
        if criteria.hollow >= HOLLOW_COUNT || criteria.filled[criteria.hollow] {
            return Err(CriteriaError::InvalidHollowIndex(criteria.hollow));
        }
        criteria.ranges.validate()?;
        Ok(Self { criteria })
    }

    fn accepts(&self, spawn: &HollowSpawn) -> bool {
        let c = &self.criteria;
        c.sub_slot.is_none_or(|sub| spawn.sub_slot == sub) && c.slot.contains(&spawn.slot)
    }
}

impl FrameSearcher for HiddenHollowSearch {
    type Seed = HashedSeed;
    type Result = Gen5Result<HiddenHollowHit>;

    fn search_seed(&self, seed: HashedSeed, on_match: &mut dyn FnMut(Self::Result)) {
        let c = &self.criteria;
        let window = if c.start_from_initial_pid_frame {
            c.frames.offset(seed.skipped_pid_frames(c.memory_link))
        } else {
            c.frames
        };
        let mut generator = HiddenHollowGenerator::new(seed.raw_seed(), c.filled);
        scan_window(&mut generator, window, |frame| {
            if let Some(spawn) = frame.spawn(c.hollow).filter(|spawn| self.accepts(spawn)) {
                on_match(Gen5Result::new(
                    &seed,
                    HiddenHollowHit {
                        number: frame.number,
                        seed: frame.seed,
                        spawn,
                    },
                ));
            }
        });
    }
}

impl Search for HiddenHollowSearch {
    type Seeds = HashedSeedGenerator;

    fn seeds(&self) -> Result<HashedSeedGenerator, CriteriaError> {
        HashedSeedGenerator::new(self.criteria.ranges.clone())
    }
}

impl ExpectedResults for HiddenHollowSearch {
    fn expected_number_of_results(&self) -> Result<u64, CriteriaError> {
        let c = &self.criteria;
        let slots = (c.slot.end().min(&99) + 1).saturating_sub(*c.slot.start()) as u64;
        let mut estimate = ResultEstimate::new(hashed_seed_count(&c.ranges)?, c.frames.len())
            .fraction(FILL_PERCENT, 100)
            .fraction(slots, 100);
        if c.sub_slot.is_some() {
            estimate = estimate.fraction(1, 4);
        }
        Ok(estimate.value())
    }
}
