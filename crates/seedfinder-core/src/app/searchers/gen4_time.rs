//! Gen 4 time seed search
//!
//! Walks every (date, time, delay) of a year and replays either the static
//! Method 1 layout or a wild Method J / K encounter from each time seed.

use crate::app::search::{FrameSearcher, Search, scan_window};
use crate::domain::criteria::{CriteriaError, ExpectedResults, FrameRange, IvCriteria, PidCriteria, ResultEstimate};
use crate::domain::frame::{
    FrameGenerator, Gen34Encounter, Gen34Generator, Gen34Method, Gen4Lead, Gen4Method, Gen4WildGenerator,
};
use crate::domain::rng::PokeRng;
use crate::domain::seed::{TimeFilter, TimeSeed};
use crate::domain::seed_gen::{SeedGenerator, TimeSeedGenerator, Timed};
use crate::domain::types::{Ivs, Nature, Pid, TrainerId};
use serde::{Deserialize, Serialize};

/// Frame layout replayed from each seed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gen4FrameKind {
    /// Static and gift Pokemon
    Method1,
    Wild {
        method: Gen4Method,
        encounter: Gen34Encounter,
        lead: Gen4Lead,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gen4TimeCriteria {
    pub year: u16,
    pub filter: TimeFilter,
    pub min_delay: u32,
    pub max_delay: u32,
    pub kind: Gen4FrameKind,
    pub ivs: IvCriteria,
    pub pid: PidCriteria,
    /// Encounter slot to require (wild kinds only)
    pub slot: Option<u8>,
    pub frames: FrameRange,
    pub id: TrainerId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gen4TimeResult {
    pub seed: Timed<TimeSeed>,
    pub frame: u32,
    pub pid: Pid,
    pub nature: Nature,
    pub ivs: Ivs,
    pub slot: Option<u8>,
}

#[derive(Clone, Debug)]
pub struct Gen4TimeSeedSearch {
    criteria: Gen4TimeCriteria,
}

impl Gen4TimeSeedSearch {
    pub fn new(criteria: Gen4TimeCriteria) -> Result<Self, CriteriaError> {
        if criteria.min_delay > criteria.max_delay {
            return Err(CriteriaError::InvalidSeedRange(format!(
                "delay {} > {}",
                criteria.min_delay, criteria.max_delay
            )));
        }
        Ok(Self { criteria })
    }

    fn accepts(&self, pid: Pid, nature: Nature, ivs: Ivs, slot: Option<u8>) -> bool {
        let c = &self.criteria;
        c.ivs.matches(ivs)
            && c.pid.matches(pid, nature, pid.ability_gen34(), c.id)
            && c.slot.is_none_or(|want| slot == Some(want))
    }
}

impl FrameSearcher for Gen4TimeSeedSearch {
    type Seed = Timed<TimeSeed>;
    type Result = Gen4TimeResult;

    fn search_seed(&self, seed: Timed<TimeSeed>, on_match: &mut dyn FnMut(Gen4TimeResult)) {
        let frames = self.criteria.frames;
        let mut report = |number: u32, pid: Pid, nature: Nature, ivs: Ivs, slot: Option<u8>| {
            if self.accepts(pid, nature, ivs, slot) {
                on_match(Gen4TimeResult {
                    seed,
                    frame: number,
                    pid,
                    nature,
                    ivs,
                    slot,
                });
            }
        };

        match self.criteria.kind {
            Gen4FrameKind::Method1 => {
                let mut generator = Gen34Generator::<PokeRng>::new(seed.seed.raw(), Gen34Method::Method1);
                scan_window(&mut generator, frames, |f| report(f.number, f.pid, f.nature(), f.ivs, None));
            }
            Gen4FrameKind::Wild { method, encounter, lead } => {
                let mut generator = Gen4WildGenerator::new(seed.seed.raw(), method, encounter, lead);
                scan_window(&mut generator, frames, |f| report(f.number, f.pid, f.nature, f.ivs, f.slot));
            }
        }
    }
}

impl Search for Gen4TimeSeedSearch {
    type Seeds = TimeSeedGenerator;

    fn seeds(&self) -> Result<TimeSeedGenerator, CriteriaError> {
        let c = &self.criteria;
        TimeSeedGenerator::for_year(c.year, c.filter, c.min_delay, c.max_delay)
    }
}

impl ExpectedResults for Gen4TimeSeedSearch {
    fn expected_number_of_results(&self) -> Result<u64, CriteriaError> {
        let c = &self.criteria;
        let seeds = self.seeds()?.num_seeds();
        Ok(ResultEstimate::new(seeds, c.frames.len())
            .ivs(&c.ivs)?
            .pid(&c.pid)
            .value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::search::SearchRunner;
    use crate::domain::seed::{GameDate, GameTime};

    fn criteria(kind: Gen4FrameKind) -> Gen4TimeCriteria {
        Gen4TimeCriteria {
            year: 2010,
            filter: TimeFilter::all().hours(0..=0).minutes(0..=0).seconds(0..=1),
            min_delay: 600,
            max_delay: 609,
            kind,
            ivs: IvCriteria::any(),
            pid: PidCriteria::any(),
            slot: None,
            frames: FrameRange::new(1, 3).unwrap(),
            id: TrainerId::default(),
        }
    }

    #[test]
    fn test_reports_every_frame_when_unconstrained() {
        let search = Gen4TimeSeedSearch::new(criteria(Gen4FrameKind::Method1)).unwrap();
        let seeds = search.seeds().unwrap();
        let num_seeds = seeds.num_seeds();
        assert_eq!(num_seeds, 365 * 2 * 10);

        let mut results = Vec::new();
        SearchRunner::search(seeds, &search, |r| results.push(r), |_| true);
        assert_eq!(results.len() as u64, num_seeds * 3);
        assert_eq!(search.expected_number_of_results().unwrap(), num_seeds * 3);
    }

    #[test]
    fn test_result_replays() {
        let kind = Gen4FrameKind::Wild {
            method: Gen4Method::K,
            encounter: Gen34Encounter::Land,
            lead: Gen4Lead::None,
        };
        let mut c = criteria(kind);
        c.slot = Some(0);
        let search = Gen4TimeSeedSearch::new(c).unwrap();

        let mut results = Vec::new();
        SearchRunner::search(search.seeds().unwrap(), &search, |r| results.push(r), |_| true);
        assert!(!results.is_empty());
        for result in results {
            assert_eq!(result.slot, Some(0));
            let expected = TimeSeed::new(result.seed.date, result.seed.time, result.seed.delay);
            assert_eq!(result.seed.seed, expected);
            let mut replay = Gen4WildGenerator::new(expected.raw(), Gen4Method::K, Gen34Encounter::Land, Gen4Lead::None);
            replay.skip(result.frame);
            assert_eq!(replay.current().pid, result.pid);
        }
    }

    #[test]
    fn test_first_seed_of_year() {
        let search = Gen4TimeSeedSearch::new(criteria(Gen4FrameKind::Method1)).unwrap();
        let mut seeds = search.seeds().unwrap();
        let first = seeds.next_seed().unwrap();
        assert_eq!(first.date, GameDate::new(2010, 1, 1).unwrap());
        assert_eq!(first.time, GameTime::new(0, 0, 0).unwrap());
        assert_eq!(first.delay, 600);
    }

    #[test]
    fn test_bad_delay_range() {
        let mut c = criteria(Gen4FrameKind::Method1);
        c.min_delay = 700;
        assert!(Gen4TimeSeedSearch::new(c).is_err());
    }
}
