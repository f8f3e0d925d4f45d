//! Seed derivation
//!
//! - [`TimeSeed`] / [`CGearSeed`]: 32-bit seeds packed from the clock
//! - [`HashedSeed`]: 64-bit Gen 5 seeds derived through SHA-1

pub mod date;
pub mod hashed_seed;
pub mod nazo;
pub mod skipped_frames;
pub mod time_seed;

pub use date::{GameDate, GameTime, TimeFilter};
pub use hashed_seed::{HashedSeed, HashedSeedParameters};
pub use nazo::Nazo;
pub use time_seed::{CGearSeed, TimeElements, TimeSeed};
