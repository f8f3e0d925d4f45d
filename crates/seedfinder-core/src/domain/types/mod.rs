//! Game value types shared by every mechanic

pub mod buttons;
pub mod gender;
pub mod ivs;
pub mod nature;
pub mod pid;

pub use buttons::{Button, ButtonMask};
pub use gender::{Gender, GenderRatio};
pub use ivs::{Element, Ivs, Stat};
pub use nature::{NATURE_COUNT, Nature, NatureSet};
pub use pid::{Ability, Pid, TrainerId};

/// Game version
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum GameVersion {
    Black,
    White,
    Black2,
    White2,
}

impl GameVersion {
    /// Black 2 / White 2
    pub const fn is_sequel(self) -> bool {
        matches!(self, GameVersion::Black2 | GameVersion::White2)
    }
}

/// Console hardware
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ConsoleType {
    Ds,
    DsLite,
    Dsi,
    ThreeDs,
}
