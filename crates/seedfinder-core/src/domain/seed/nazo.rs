//! Per-version / per-console hash constants

use crate::domain::types::{ConsoleType, GameVersion};
use serde::{Deserialize, Serialize};

/// Five firmware addresses mixed into the seed message
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Nazo(pub [u32; 5]);

const BLACK_DS: [u32; 5] = [0x0221_5F10, 0x0221_600C, 0x0221_600C, 0x0221_6058, 0x0221_6058];
const WHITE_DS: [u32; 5] = [0x0221_5F30, 0x0221_602C, 0x0221_602C, 0x0221_6078, 0x0221_6078];
const BLACK2_DS: [u32; 5] = [0x0209_A8DC, 0x0203_9AC9, 0x021F_F9B0, 0x021F_FA04, 0x021F_FA04];
const WHITE2_DS: [u32; 5] = [0x0209_A8FC, 0x0203_9AF5, 0x021F_F9D0, 0x021F_FA24, 0x021F_FA24];

const BLACK_DSI: [u32; 5] = [0x0276_1150, 0x0276_124C, 0x0276_124C, 0x0276_1298, 0x0276_1298];
const WHITE_DSI: [u32; 5] = [0x0276_1170, 0x0276_126C, 0x0276_126C, 0x0276_12B8, 0x0276_12B8];
const BLACK2_DSI: [u32; 5] = [0x027A_A730, 0x0276_A9CD, 0x027A_A82C, 0x027A_A880, 0x027A_A880];
const WHITE2_DSI: [u32; 5] = [0x027A_A750, 0x0276_A9F9, 0x027A_A84C, 0x027A_A8A0, 0x027A_A8A0];

impl Nazo {
    /// Built-in constants for a version on a console
    pub const fn for_console(version: GameVersion, console: ConsoleType) -> Self {
        let dsi_memory_map = matches!(console, ConsoleType::Dsi | ConsoleType::ThreeDs);
        let words = match (version, dsi_memory_map) {
            (GameVersion::Black, false) => BLACK_DS,
            (GameVersion::White, false) => WHITE_DS,
            (GameVersion::Black2, false) => BLACK2_DS,
            (GameVersion::White2, false) => WHITE2_DS,
            (GameVersion::Black, true) => BLACK_DSI,
            (GameVersion::White, true) => WHITE_DSI,
            (GameVersion::Black2, true) => BLACK2_DSI,
            (GameVersion::White2, true) => WHITE2_DSI,
        };
        Self(words)
    }

    /// Caller-supplied constants (regional builds, research)
    pub const fn custom(words: [u32; 5]) -> Self {
        Self(words)
    }
}
