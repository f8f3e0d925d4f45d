//! C-Gear spinner search
//!
//! Finds the C-Gear seeds whose spinner shows an observed sequence of
//! directions starting at any frame of the window.

use crate::app::search::{FrameSearcher, Search};
use crate::domain::criteria::{CriteriaError, ExpectedResults, FrameRange, ResultEstimate};
use crate::domain::frame::{FrameGenerator, SpinDirection, SpinnerGenerator};
use crate::domain::seed::CGearSeed;
use crate::domain::seed_gen::{CGearSeedGenerator, ClockRange, SeedGenerator, Timed};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinnerCriteria {
    pub clock: ClockRange,
    pub min_delay: u32,
    pub max_delay: u32,
    pub mac_address: u64,
    pub sequence: Vec<SpinDirection>,
    /// Frames the observed sequence may start on
    pub frames: FrameRange,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpinnerResult {
    pub seed: Timed<CGearSeed>,
    /// Frame of the first observed direction
    pub frame: u32,
}

#[derive(Clone, Debug)]
pub struct SpinnerSearch {
    criteria: SpinnerCriteria,
}

impl SpinnerSearch {
    pub fn new(criteria: SpinnerCriteria) -> Result<Self, CriteriaError> {
        if criteria.sequence.is_empty() {
            return Err(CriteriaError::EmptySpinSequence);
        }
        let search = Self { criteria };
        search.seeds()?;
        Ok(search)
    }
}

impl FrameSearcher for SpinnerSearch {
    type Seed = Timed<CGearSeed>;
    type Result = SpinnerResult;

    fn search_seed(&self, seed: Timed<CGearSeed>, on_match: &mut dyn FnMut(SpinnerResult)) {
        let c = &self.criteria;
        let mut generator = SpinnerGenerator::new(seed.seed);
        if c.frames.min() > 1 {
            generator.skip(c.frames.min() - 1);
        }
        let len = c.sequence.len();
        let directions = generator.sequence(c.frames.len() as usize + len - 1);
        for (frame, window) in (c.frames.min()..).zip(directions.windows(len)) {
            if window == c.sequence.as_slice() {
                on_match(SpinnerResult { seed, frame });
            }
        }
    }
}

impl Search for SpinnerSearch {
    type Seeds = CGearSeedGenerator;

    fn seeds(&self) -> Result<CGearSeedGenerator, CriteriaError> {
        let c = &self.criteria;
        CGearSeedGenerator::new(&c.clock, c.min_delay, c.max_delay, c.mac_address)
    }
}

impl ExpectedResults for SpinnerSearch {
    fn expected_number_of_results(&self) -> Result<u64, CriteriaError> {
        let c = &self.criteria;
        let estimate = ResultEstimate::new(self.seeds()?.num_seeds(), c.frames.len());
        Ok(c.sequence
            .iter()
            .fold(estimate, |estimate, _| estimate.fraction(1, SpinDirection::ALL.len() as u64))
            .value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::search::SearchRunner;
    use crate::domain::seed::{GameDate, TimeFilter};

    fn criteria(sequence: Vec<SpinDirection>) -> SpinnerCriteria {
        let day = GameDate::new(2011, 11, 11).unwrap();
        let filter = TimeFilter::all().hours(11..=11).minutes(11..=11).seconds(0..=59);
        SpinnerCriteria {
            clock: ClockRange::new(day, day, filter).unwrap(),
            min_delay: 0x300,
            max_delay: 0x30F,
            mac_address: 0x0009_BF6D_93CE,
            sequence,
            frames: FrameRange::new(1, 5).unwrap(),
        }
    }

    #[test]
    fn test_finds_observed_sequence() {
        let any = SpinnerSearch::new(criteria(vec![SpinDirection::Up])).unwrap();
        let mut seeds = any.seeds().unwrap();
        for _ in 0..100 {
            seeds.next_seed();
        }
        let target = seeds.next_seed().unwrap();
        let mut generator = SpinnerGenerator::new(target.seed);
        generator.skip(2);
        let observed = generator.sequence(6);

        let search = SpinnerSearch::new(criteria(observed.clone())).unwrap();
        let mut results = Vec::new();
        SearchRunner::search(search.seeds().unwrap(), &search, |r| results.push(r), |_| true);
        assert!(results.contains(&SpinnerResult { seed: target, frame: 3 }));

        for result in results {
            let mut replay = SpinnerGenerator::new(result.seed.seed);
            replay.skip(result.frame - 1);
            assert_eq!(replay.sequence(observed.len()), observed);
        }
    }

    #[test]
    fn test_single_direction_hits_every_eighth() {
        let search = SpinnerSearch::new(criteria(vec![SpinDirection::Down])).unwrap();
        let summary = SearchRunner::search(search.seeds().unwrap(), &search, |_| {}, |_| true);
        // 60 * 16 seeds, 5 frames each
        assert_eq!(search.expected_number_of_results().unwrap(), 600);
        assert!(summary.results > 400 && summary.results < 800);
    }

    #[test]
    fn test_empty_sequence_rejected() {
        let err = SpinnerSearch::new(criteria(Vec::new())).unwrap_err();
        assert_eq!(err, CriteriaError::EmptySpinSequence);
    }
}
