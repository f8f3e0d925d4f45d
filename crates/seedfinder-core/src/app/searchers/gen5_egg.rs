//! Gen 5 egg search
//!
//! Eggs combine two streams: the PID stream decides nature, ability, PID
//! and which parent each inherited stat comes from, while the IV stream
//! supplies the random IVs. Every (IV frame, egg frame) pair in the two
//! windows is checked.

use super::{Gen5Result, hashed_seed_count};
use crate::app::search::{FrameSearcher, Search, scan_window};
use crate::domain::criteria::{CriteriaError, ExpectedResults, FrameRange, IvCriteria, PidCriteria, ResultEstimate};
use crate::domain::frame::{Gen5EggFrame, Gen5EggGenerator, Gen5EggParameters, Gen5IvGenerator, Gen5IvKind};
use crate::domain::seed::HashedSeed;
use crate::domain::seed_gen::{HashedSeedGenerator, HashedSeedRanges};
use crate::domain::types::Ivs;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gen5EggCriteria {
    pub ranges: HashedSeedRanges,
    pub egg: Gen5EggParameters,
    pub parent_a: Ivs,
    pub parent_b: Ivs,
    pub ivs: IvCriteria,
    pub pid: PidCriteria,
    pub iv_frames: FrameRange,
    pub egg_frames: FrameRange,
    /// Count `egg_frames` from the first frame the player can act on
    pub start_from_initial_pid_frame: bool,
    pub memory_link: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gen5EggHit {
    pub iv_frame: u32,
    /// IVs after inheritance
    pub ivs: Ivs,
    pub egg: Gen5EggFrame,
}

#[derive(Clone, Debug)]
pub struct Gen5EggSearch {
    criteria: Gen5EggCriteria,
}

impl Gen5EggSearch {
    pub fn new(criteria: Gen5EggCriteria) -> Result<Self, CriteriaError> {
        criteria.ranges.validate()?;
        Ok(Self { criteria })
    }
}

impl FrameSearcher for Gen5EggSearch {
    type Seed = HashedSeed;
    type Result = Gen5Result<Gen5EggHit>;

    fn search_seed(&self, seed: HashedSeed, on_match: &mut dyn FnMut(Self::Result)) {
        let c = &self.criteria;

        let mut iv_frames = Vec::with_capacity(c.iv_frames.len() as usize);
        let mut ivs = Gen5IvGenerator::new(seed.iv_seed(), Gen5IvKind::Normal);
        scan_window(&mut ivs, c.iv_frames, |frame| iv_frames.push(*frame));

        let egg_window = if c.start_from_initial_pid_frame {
            c.egg_frames.offset(seed.skipped_pid_frames(c.memory_link))
        } else {
            c.egg_frames
        };
        let mut eggs = Gen5EggGenerator::new(seed.raw_seed(), c.egg);
        scan_window(&mut eggs, egg_window, |egg| {
            if !c.pid.matches_with_gender(egg.pid, egg.nature, egg.ability, egg.gender, c.egg.id) {
                return;
            }
            for iv_frame in &iv_frames {
                let ivs = egg.resolve(iv_frame.ivs, c.parent_a, c.parent_b);
                if c.ivs.matches(ivs) {
                    on_match(Gen5Result::new(
                        &seed,
                        Gen5EggHit {
                            iv_frame: iv_frame.number,
                            ivs,
                            egg: *egg,
                        },
                    ));
                }
            }
        });
    }
}

impl Search for Gen5EggSearch {
    type Seeds = HashedSeedGenerator;

    fn seeds(&self) -> Result<HashedSeedGenerator, CriteriaError> {
        HashedSeedGenerator::new(self.criteria.ranges.clone())
    }
}

impl ExpectedResults for Gen5EggSearch {
    /// Inheritance is ignored: the estimate treats the result IVs as random
    fn expected_number_of_results(&self) -> Result<u64, CriteriaError> {
        let c = &self.criteria;
        Ok(ResultEstimate::new(hashed_seed_count(&c.ranges)?, c.egg_frames.len())
            .fraction(c.iv_frames.len(), 1)
            .ivs(&c.ivs)?
            .pid(&c.pid)
            .value())
    }
}
