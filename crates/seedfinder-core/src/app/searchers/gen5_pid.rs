//! Gen 5 PID search

use super::{Gen5Result, hashed_seed_count};
use crate::app::search::{FrameSearcher, Search, scan_window};
use crate::domain::criteria::{CriteriaError, ExpectedResults, FrameRange, PidCriteria, ResultEstimate};
use crate::domain::frame::{Gen5Encounter, Gen5PidFrame, Gen5PidGenerator, PidContext, PidStrategy};
use crate::domain::seed::HashedSeed;
use crate::domain::seed_gen::{HashedSeedGenerator, HashedSeedRanges};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gen5PidCriteria {
    pub ranges: HashedSeedRanges,
    pub encounter: Gen5Encounter,
    pub ctx: PidContext,
    pub pid: PidCriteria,
    /// Encounter slot to require
    pub slot: Option<u8>,
    pub frames: FrameRange,
    /// Count `frames` from the first frame the player can act on
    pub start_from_initial_pid_frame: bool,
    /// BW2 continue screen with Memory Link active
    pub memory_link: bool,
}

pub struct Gen5PidSearch {
    criteria: Gen5PidCriteria,
    strategy: Arc<dyn PidStrategy>,
}

impl Gen5PidSearch {
    pub fn new(criteria: Gen5PidCriteria) -> Result<Self, CriteriaError> {
        criteria.ranges.validate()?;
        let strategy = criteria.encounter.strategy();
        Ok(Self { criteria, strategy })
    }

    /// Absolute PID frames to scan for `seed`
    fn window(&self, seed: &HashedSeed) -> FrameRange {
        let c = &self.criteria;
        if c.start_from_initial_pid_frame {
            c.frames.offset(seed.skipped_pid_frames(c.memory_link))
        } else {
            c.frames
        }
    }
}

impl FrameSearcher for Gen5PidSearch {
    type Seed = HashedSeed;
    type Result = Gen5Result<Gen5PidFrame>;

    fn search_seed(&self, seed: HashedSeed, on_match: &mut dyn FnMut(Self::Result)) {
        let c = &self.criteria;
        let mut generator = Gen5PidGenerator::with_strategy(seed.raw_seed(), Arc::clone(&self.strategy), c.ctx);
        scan_window(&mut generator, self.window(&seed), |frame| {
            if c.pid.matches(frame.pid, frame.nature, frame.ability, c.ctx.id)
                && c.slot.is_none_or(|slot| frame.slot == Some(slot))
                && !frame.found_item
            {
                on_match(Gen5Result::new(&seed, *frame));
            }
        });
    }
}

impl Search for Gen5PidSearch {
    type Seeds = HashedSeedGenerator;

    fn seeds(&self) -> Result<HashedSeedGenerator, CriteriaError> {
        HashedSeedGenerator::new(self.criteria.ranges.clone())
    }
}

impl ExpectedResults for Gen5PidSearch {
    fn expected_number_of_results(&self) -> Result<u64, CriteriaError> {
        let c = &self.criteria;
        Ok(ResultEstimate::new(hashed_seed_count(&c.ranges)?, c.frames.len())
            .pid(&c.pid)
            .value())
    }
}
