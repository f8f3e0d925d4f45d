//! Per-mechanic searches
//!
//! Each search pairs a criteria value with the seed generator and frame
//! generator its mechanic needs. Criteria are validated when the search is
//! built; [`Search::seeds`](crate::app::search::Search::seeds) and the
//! per-seed checks never fail afterwards.

pub mod cgear;
pub mod dream_radar;
pub mod gen34;
pub mod gen4_time;
pub mod gen5_egg;
pub mod gen5_iv;
pub mod gen5_pid;
pub mod hidden_hollow;
pub mod spinner;
pub mod trainer_id;

pub use cgear::{CGearCriteria, CGearResult, CGearSearch};
pub use dream_radar::{DreamRadarCriteria, DreamRadarSearch};
pub use gen34::{Gen34SeedCriteria, Gen34SeedResult, Gen34SeedSearch};
pub use gen4_time::{Gen4FrameKind, Gen4TimeCriteria, Gen4TimeResult, Gen4TimeSeedSearch};
pub use gen5_egg::{Gen5EggCriteria, Gen5EggHit, Gen5EggSearch};
pub use gen5_iv::{Gen5IvCriteria, Gen5IvSearch};
pub use gen5_pid::{Gen5PidCriteria, Gen5PidSearch};
pub use hidden_hollow::{HiddenHollowCriteria, HiddenHollowHit, HiddenHollowSearch};
pub use spinner::{SpinnerCriteria, SpinnerResult, SpinnerSearch};
pub use trainer_id::{TrainerIdCriteria, TrainerIdSearch};

use crate::domain::criteria::CriteriaError;
use crate::domain::seed::{HashedSeed, HashedSeedParameters};
use crate::domain::seed_gen::{HashedSeedGenerator, HashedSeedRanges, SeedGenerator};
use serde::{Deserialize, Serialize};

/// A Gen 5 match: the startup parameters, their raw seed, and the frame
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gen5Result<F> {
    pub params: HashedSeedParameters,
    pub raw_seed: u64,
    pub frame: F,
}

impl<F> Gen5Result<F> {
    pub(crate) fn new(seed: &HashedSeed, frame: F) -> Self {
        Self {
            params: *seed.parameters(),
            raw_seed: seed.raw_seed(),
            frame,
        }
    }
}

/// Validate `ranges` and count the hashed seeds they cover
pub(crate) fn hashed_seed_count(ranges: &HashedSeedRanges) -> Result<u64, CriteriaError> {
    Ok(HashedSeedGenerator::new(ranges.clone())?.num_seeds())
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::domain::seed::{GameDate, TimeFilter};
    use crate::domain::seed_gen::{ButtonComboSet, ClockRange, HashedSeedRanges};
    use crate::domain::types::{ConsoleType, GameVersion};

    /// A few hundred hashed seeds around one minute of 2011-01-01
    pub fn small_ranges(version: GameVersion) -> HashedSeedRanges {
        let date = GameDate::new(2011, 1, 1).unwrap();
        let filter = TimeFilter::all().hours(10..=10).minutes(0..=0).seconds(0..=9);
        HashedSeedRanges {
            version,
            console: ConsoleType::Ds,
            mac_address: 0x0009_BF12_3456,
            timer0: 0x0C79..=0x0C7A,
            vcount: 0x60..=0x60,
            vframe: 5..=5,
            clock: ClockRange::new(date, date, filter).unwrap(),
            buttons: ButtonComboSet::up_to(1),
            nazo: None,
        }
    }
}
