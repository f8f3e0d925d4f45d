//! Gen 3/4 seed recovery from IVs
//!
//! Instead of walking all 2^32 seeds, the search enumerates only the seeds
//! whose first IV draw lands in the IV box, checks frame 1 from each, and
//! reports one origin seed per frame of the window by stepping backwards.

use crate::app::search::{FrameSearcher, Search};
use crate::constants::SEED_SPACE;
use crate::domain::criteria::{CriteriaError, ExpectedResults, FrameRange, IvCriteria, PidCriteria, ResultEstimate};
use crate::domain::frame::{FrameGenerator, Gen34Frame, Gen34Generator, Gen34Method};
use crate::domain::rng::{PokeRng, PokeRngR};
use crate::domain::seed_gen::IvSeedGenerator;
use crate::domain::types::TrainerId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gen34SeedCriteria {
    pub method: Gen34Method,
    pub ivs: IvCriteria,
    pub pid: PidCriteria,
    pub frames: FrameRange,
    pub id: TrainerId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gen34SeedResult {
    /// Seed that produces `frame` after `frame.number - 1` steps
    pub origin: u32,
    pub frame: Gen34Frame,
}

#[derive(Clone, Debug)]
pub struct Gen34SeedSearch {
    criteria: Gen34SeedCriteria,
}

impl Gen34SeedSearch {
    pub fn new(criteria: Gen34SeedCriteria) -> Self {
        Self { criteria }
    }

    pub fn criteria(&self) -> &Gen34SeedCriteria {
        &self.criteria
    }
}

impl FrameSearcher for Gen34SeedSearch {
    type Seed = u32;
    type Result = Gen34SeedResult;

    fn search_seed(&self, seed: u32, on_match: &mut dyn FnMut(Gen34SeedResult)) {
        let c = &self.criteria;
        let mut generator = Gen34Generator::<PokeRng>::new(seed, c.method);
        generator.advance();
        let frame = *generator.current();
        if !c.ivs.matches(frame.ivs) || !c.pid.matches_gen34(frame.pid, c.id) {
            return;
        }

        let mut origin = PokeRngR::new(seed);
        origin.jump(c.frames.min() as u64 - 1);
        for number in c.frames.min()..=c.frames.max() {
            on_match(Gen34SeedResult {
                origin: origin.state(),
                frame: Gen34Frame { number, ..frame },
            });
            origin.next_u32();
        }
    }
}

impl Search for Gen34SeedSearch {
    type Seeds = IvSeedGenerator;

    fn seeds(&self) -> Result<IvSeedGenerator, CriteriaError> {
        Ok(IvSeedGenerator::new(&self.criteria.ivs, self.criteria.method))
    }
}

impl ExpectedResults for Gen34SeedSearch {
    fn expected_number_of_results(&self) -> Result<u64, CriteriaError> {
        let c = &self.criteria;
        Ok(ResultEstimate::new(SEED_SPACE, c.frames.len())
            .ivs(&c.ivs)?
            .pid(&c.pid)
            .value())
    }
}
