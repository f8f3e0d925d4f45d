//! seedfinder-core - PRNG replay and parallel seed search for Gen 3-5 Pokemon games
//!
//! This crate provides functionality to:
//! - Replay the games' random number generators (LCG32, LCG64, MT19937) frame by frame
//! - Derive Gen 5 initial seeds from console parameters via SHA-1
//! - Enumerate seed spaces and search them in parallel with progress and cancellation
//! - Build and load precomputed IV seed caches

pub mod constants;
pub mod domain;
pub mod infra;
pub mod app;

// Re-export commonly used types
pub use app::cache_manager::{CacheHandle, CacheKey, CacheManager};
pub use app::search::{FrameSearcher, Search, SearchOptions, SearchRunner, SearchSummary};
pub use domain::criteria::{CriteriaError, ExpectedResults, FrameRange, IvCriteria, PidCriteria};
pub use domain::frame::FrameGenerator;
pub use domain::seed::{HashedSeed, HashedSeedParameters};
pub use domain::seed_gen::{HashedSeedRanges, SeedGenerator};
pub use domain::types::{GameVersion, Ivs, Nature, Pid, TrainerId};
pub use infra::cache_io::CacheError;
