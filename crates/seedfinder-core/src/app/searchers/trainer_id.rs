//! Gen 5 trainer ID search

use super::{Gen5Result, hashed_seed_count};
use crate::app::search::{FrameSearcher, Search, scan_window};
use crate::domain::criteria::{CriteriaError, ExpectedResults, FrameRange, ResultEstimate};
use crate::domain::frame::{TrainerIdFrame, TrainerIdGenerator};
use crate::domain::seed::HashedSeed;
use crate::domain::seed_gen::{HashedSeedGenerator, HashedSeedRanges};
use crate::domain::types::Pid;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainerIdCriteria {
    pub ranges: HashedSeedRanges,
    pub tid: Option<u16>,
    pub sid: Option<u16>,
    /// Require the ID pair to make this PID shiny
    pub shiny_pid: Option<Pid>,
    pub frames: FrameRange,
    /// Count `frames` from the ID draw of a new Black / White game
    pub from_new_game: bool,
}

#[derive(Clone, Debug)]
pub struct TrainerIdSearch {
    criteria: TrainerIdCriteria,
}

impl TrainerIdSearch {
    pub fn new(criteria: TrainerIdCriteria) -> Result<Self, CriteriaError> {
        criteria.ranges.validate()?;
        Ok(Self { criteria })
    }

    fn accepts(&self, frame: &TrainerIdFrame) -> bool {
        let c = &self.criteria;
        c.tid.is_none_or(|tid| frame.id.tid == tid)
            && c.sid.is_none_or(|sid| frame.id.sid == sid)
            && c.shiny_pid.is_none_or(|pid| frame.makes_shiny(pid))
    }
}

impl FrameSearcher for TrainerIdSearch {
    type Seed = HashedSeed;
    type Result = Gen5Result<TrainerIdFrame>;

    fn search_seed(&self, seed: HashedSeed, on_match: &mut dyn FnMut(Self::Result)) {
        let c = &self.criteria;
        let window = match seed.new_game_skipped_frames() {
            Some(skipped) if c.from_new_game => c.frames.offset(skipped),
            _ => c.frames,
        };
        let mut generator = TrainerIdGenerator::new(seed.raw_seed());
        scan_window(&mut generator, window, |frame| {
            if self.accepts(frame) {
                on_match(Gen5Result::new(&seed, *frame));
            }
        });
    }
}

impl Search for TrainerIdSearch {
    type Seeds = HashedSeedGenerator;

    fn seeds(&self) -> Result<HashedSeedGenerator, CriteriaError> {
        HashedSeedGenerator::new(self.criteria.ranges.clone())
    }
}

impl ExpectedResults for TrainerIdSearch {
    fn expected_number_of_results(&self) -> Result<u64, CriteriaError> {
        let c = &self.criteria;
        let mut estimate = ResultEstimate::new(hashed_seed_count(&c.ranges)?, c.frames.len());
        if c.tid.is_some() {
            estimate = estimate.fraction(1, 1 << 16);
        }
        if c.sid.is_some() {
            estimate = estimate.fraction(1, 1 << 16);
        }
        if c.shiny_pid.is_some() {
            estimate = estimate.fraction(1, 8192);
        }
        Ok(estimate.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::search::SearchRunner;
    use crate::app::searchers::test_support::small_ranges;
    use crate::domain::types::GameVersion;

    fn criteria(version: GameVersion) -> TrainerIdCriteria {
        TrainerIdCriteria {
            ranges: small_ranges(version),
            tid: None,
            sid: None,
            shiny_pid: None,
            frames: FrameRange::single(1).unwrap(),
            from_new_game: true,
        }
    }

    #[test]
    fn test_new_game_frame() {
        let search = TrainerIdSearch::new(criteria(GameVersion::Black)).unwrap();
        let mut results = Vec::new();
        SearchRunner::search(search.seeds().unwrap(), &search, |r| results.push(r), |_| true);
        assert_eq!(results.len(), 260);
        for result in results {
            let seed = HashedSeed::new(result.params);
            let skipped = seed.new_game_skipped_frames().unwrap();
            assert_eq!(result.frame.number, skipped + 1);
        }
    }

    #[test]
    fn test_sequel_uses_absolute_frames() {
        let search = TrainerIdSearch::new(criteria(GameVersion::White2)).unwrap();
        let mut results = Vec::new();
        SearchRunner::search(search.seeds().unwrap(), &search, |r| results.push(r), |_| true);
        assert!(results.iter().all(|r| r.frame.number == 1));
    }

    #[test]
    fn test_tid_filter() {
        let mut c = criteria(GameVersion::Black);
        c.from_new_game = false;
        c.frames = FrameRange::new(1, 3).unwrap();
        let search = TrainerIdSearch::new(c.clone()).unwrap();
        let mut all = Vec::new();
        SearchRunner::search(search.seeds().unwrap(), &search, |r| all.push(r), |_| true);
        assert_eq!(all.len(), 260 * 3);

        let target = all[17].frame;
        c.tid = Some(target.id.tid);
        c.shiny_pid = Some(Pid(((target.id.tid ^ target.id.sid) as u32) << 16));
        let search = TrainerIdSearch::new(c).unwrap();
        let mut filtered = Vec::new();
        SearchRunner::search(search.seeds().unwrap(), &search, |r| filtered.push(r), |_| true);
        assert!(filtered.iter().any(|r| r.frame == target));
        assert!(filtered.iter().all(|r| r.frame.id.tid == target.id.tid));
    }
}
