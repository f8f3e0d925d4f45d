//! C-Gear IV search
//!
//! Entralink and C-Gear encounters draw IVs from MT19937 seeded with the
//! 32-bit C-Gear seed. The game consumes 20 outputs first, so the earliest
//! reachable frame is 21.

use crate::app::search::{FrameSearcher, Search, scan_window};
use crate::domain::criteria::{CriteriaError, ExpectedResults, FrameRange, IvCriteria, ResultEstimate};
use crate::domain::frame::{Gen5IvGenerator, Gen5IvKind};
use crate::domain::seed::CGearSeed;
use crate::domain::seed_gen::{CGearSeedGenerator, ClockRange, SeedGenerator, Timed};
use crate::domain::types::Ivs;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CGearCriteria {
    pub clock: ClockRange,
    pub min_delay: u32,
    pub max_delay: u32,
    pub mac_address: u64,
    pub ivs: IvCriteria,
    /// Absolute IV frames (the first reachable one is 21)
    pub frames: FrameRange,
    pub roamer: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CGearResult {
    pub seed: Timed<CGearSeed>,
    pub frame: u32,
    pub ivs: Ivs,
}

#[derive(Clone, Debug)]
pub struct CGearSearch {
    criteria: CGearCriteria,
}

impl CGearSearch {
    pub fn new(criteria: CGearCriteria) -> Result<Self, CriteriaError> {
        let search = Self { criteria };
        search.seeds()?;
        Ok(search)
    }

    fn kind(&self) -> Gen5IvKind {
        if self.criteria.roamer { Gen5IvKind::Roamer } else { Gen5IvKind::Normal }
    }
}

impl FrameSearcher for CGearSearch {
    type Seed = Timed<CGearSeed>;
    type Result = CGearResult;

    fn search_seed(&self, seed: Timed<CGearSeed>, on_match: &mut dyn FnMut(CGearResult)) {
        let c = &self.criteria;
        let mut generator = Gen5IvGenerator::cgear(seed.seed, self.kind());
        scan_window(&mut generator, c.frames, |frame| {
            if c.ivs.matches(frame.ivs) {
                on_match(CGearResult {
                    seed,
                    frame: frame.number,
                    ivs: frame.ivs,
                });
            }
        });
    }
}

impl Search for CGearSearch {
    type Seeds = CGearSeedGenerator;

    fn seeds(&self) -> Result<CGearSeedGenerator, CriteriaError> {
        let c = &self.criteria;
        CGearSeedGenerator::new(&c.clock, c.min_delay, c.max_delay, c.mac_address)
    }
}

impl ExpectedResults for CGearSearch {
    fn expected_number_of_results(&self) -> Result<u64, CriteriaError> {
        let c = &self.criteria;
        Ok(ResultEstimate::new(self.seeds()?.num_seeds(), c.frames.len())
            .ivs(&c.ivs)?
            .value())
    }
}
