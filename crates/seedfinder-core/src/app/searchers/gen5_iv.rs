//! Gen 5 IV search
//!
//! When the IV criteria pin every stat but at most one to 31 and the frame
//! window fits a cache window, the search looks frames up in a seed cache
//! instead of running MT19937 for every seed. Any cache failure falls back
//! to simulation.

use super::{Gen5Result, hashed_seed_count};
use crate::app::cache_manager::{CacheHandle, CacheKey, CacheManager};
use crate::app::search::{FrameSearcher, Search, scan_window};
use crate::constants::{DEFAULT_CACHE_WINDOW, EXTENDED_CACHE_WINDOW};
use crate::domain::cache_format::{CacheKind, IvPattern};
use crate::domain::criteria::{CriteriaError, ExpectedResults, FrameRange, IvCriteria, ResultEstimate};
use crate::domain::frame::{Gen5IvFrame, Gen5IvGenerator, Gen5IvKind};
use crate::domain::seed::HashedSeed;
use crate::domain::seed_gen::{HashedSeedGenerator, HashedSeedRanges};
use crate::domain::types::Ivs;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gen5IvCriteria {
    pub ranges: HashedSeedRanges,
    pub ivs: IvCriteria,
    pub frames: FrameRange,
    pub roamer: bool,
}

impl Gen5IvCriteria {
    fn iv_kind(&self) -> Gen5IvKind {
        if self.roamer { Gen5IvKind::Roamer } else { Gen5IvKind::Normal }
    }

    /// Cache able to answer this search, if any
    pub fn cache_key(&self) -> Option<CacheKey> {
        let pattern = IvPattern::for_criteria(&self.ivs)?;
        let window = [DEFAULT_CACHE_WINDOW, EXTENDED_CACHE_WINDOW]
            .into_iter()
            .find(|&window| self.frames.max() <= window)?;
        Some(CacheKey::new(CacheKind::new(pattern, self.roamer), window))
    }
}

pub struct Gen5IvSearch {
    criteria: Gen5IvCriteria,
    cache: Option<CacheHandle>,
}

impl Gen5IvSearch {
    /// Build the search, borrowing a cache from `caches` when one applies
    pub fn new(criteria: Gen5IvCriteria, caches: Option<&Arc<CacheManager>>) -> Result<Self, CriteriaError> {
        criteria.ranges.validate()?;
        let cache = match (caches, criteria.cache_key()) {
            (Some(manager), Some(key)) => match manager.acquire(key) {
                Ok(handle) => {
                    debug!(key = ?key, "searching with seed cache");
                    Some(handle)
                }
                Err(e) => {
                    warn!(error = %e, "seed cache unavailable, falling back to simulation");
                    None
                }
            },
            _ => None,
        };
        Ok(Self { criteria, cache })
    }

    pub fn uses_cache(&self) -> bool {
        self.cache.is_some()
    }

    /// Matching IV frames of one IV seed
    fn iv_hits(&self, iv_seed: u32, mut on_hit: impl FnMut(Gen5IvFrame)) {
        let c = &self.criteria;
        match &self.cache {
            Some(cache) => {
                for entry in cache.lookup(iv_seed) {
                    let ivs = Ivs::from_word(entry.iv_word);
                    if c.frames.contains(entry.frame) && c.ivs.matches(ivs) {
                        on_hit(Gen5IvFrame {
                            number: entry.frame,
                            ivs,
                        });
                    }
                }
            }
            None => {
                let mut generator = Gen5IvGenerator::new(iv_seed, c.iv_kind());
                scan_window(&mut generator, c.frames, |frame| {
                    if c.ivs.matches(frame.ivs) {
                        on_hit(*frame);
                    }
                });
            }
        }
    }
}

impl FrameSearcher for Gen5IvSearch {
    type Seed = HashedSeed;
    type Result = Gen5Result<Gen5IvFrame>;

    fn search_seed(&self, seed: HashedSeed, on_match: &mut dyn FnMut(Self::Result)) {
        self.iv_hits(seed.iv_seed(), |frame| on_match(Gen5Result::new(&seed, frame)));
    }
}

impl Search for Gen5IvSearch {
    type Seeds = HashedSeedGenerator;

    fn seeds(&self) -> Result<HashedSeedGenerator, CriteriaError> {
        HashedSeedGenerator::new(self.criteria.ranges.clone())
    }
}

impl ExpectedResults for Gen5IvSearch {
    fn expected_number_of_results(&self) -> Result<u64, CriteriaError> {
        let c = &self.criteria;
        Ok(ResultEstimate::new(hashed_seed_count(&c.ranges)?, c.frames.len())
            .ivs(&c.ivs)?
            .value())
    }
}
