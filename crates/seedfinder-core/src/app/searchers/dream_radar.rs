//! Pokemon Dream Radar search

use super::{Gen5Result, hashed_seed_count};
use crate::app::search::{FrameSearcher, Search, scan_window};
use crate::domain::criteria::{CriteriaError, ExpectedResults, FrameRange, IvCriteria, PidCriteria, ResultEstimate};
use crate::domain::frame::{DreamRadarFrame, DreamRadarGenerator, DreamRadarParameters};
use crate::domain::seed::HashedSeed;
use crate::domain::seed_gen::{HashedSeedGenerator, HashedSeedRanges};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DreamRadarCriteria {
    pub ranges: HashedSeedRanges,
    pub radar: DreamRadarParameters,
    pub ivs: IvCriteria,
    pub pid: PidCriteria,
    pub frames: FrameRange,
}

#[derive(Clone, Debug)]
pub struct DreamRadarSearch {
    criteria: DreamRadarCriteria,
}

impl DreamRadarSearch {
    pub fn new(criteria: DreamRadarCriteria) -> Result<Self, CriteriaError> {
        criteria.ranges.validate()?;
        Ok(Self { criteria })
    }
}

impl FrameSearcher for DreamRadarSearch {
    type Seed = HashedSeed;
    type Result = Gen5Result<DreamRadarFrame>;

    fn search_seed(&self, seed: HashedSeed, on_match: &mut dyn FnMut(Self::Result)) {
        let c = &self.criteria;
        let mut generator = DreamRadarGenerator::new(seed.raw_seed(), c.radar);
        scan_window(&mut generator, c.frames, |frame| {
            if c.ivs.matches(frame.ivs) && c.pid.matches(frame.pid, frame.nature, frame.ability, c.radar.id) {
                on_match(Gen5Result::new(&seed, *frame));
            }
        });
    }
}

impl Search for DreamRadarSearch {
    type Seeds = HashedSeedGenerator;

    fn seeds(&self) -> Result<HashedSeedGenerator, CriteriaError> {
        HashedSeedGenerator::new(self.criteria.ranges.clone())
    }
}

impl ExpectedResults for DreamRadarSearch {
    fn expected_number_of_results(&self) -> Result<u64, CriteriaError> {
        let c = &self.criteria;
        Ok(ResultEstimate::new(hashed_seed_count(&c.ranges)?, c.frames.len())
            .ivs(&c.ivs)?
            .pid(&c.pid)
            .value())
    }
}
