//! Gen 5 wonder card (event) frames
//!
//! ```text
//! 2 unused draws -> six IV draws rand(32) (fixed IVs take no draw)
//! -> 2 unused draws -> PID -> nature (fixed nature takes no draw)
//! ```
//!
//! The PID is adjusted afterwards to satisfy the card's ability, gender and
//! shiny settings.

use super::FrameGenerator;
use crate::domain::rng::Gen5Rng;
use crate::domain::types::{Ability, Gender, GenderRatio, Ivs, Nature, Pid, Stat, TrainerId};
use serde::{Deserialize, Serialize};

const ABILITY_BIT: u32 = 0x0001_0000;
const SHINY_LOCK_BIT: u32 = 0x1000_0000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WonderCardAbility {
    /// Taken from the PID
    #[default]
    Random,
    First,
    Second,
    Hidden,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShinyLock {
    #[default]
    Random,
    Never,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WonderCardParameters {
    pub id: TrainerId,
    /// Fixed IVs in HP, Atk, Def, SpA, SpD, Spe order
    pub fixed_ivs: [Option<u8>; 6],
    pub ability: WonderCardAbility,
    pub gender: Option<(Gender, GenderRatio)>,
    pub shiny: ShinyLock,
    pub nature: Option<Nature>,
}

impl WonderCardParameters {
    pub fn new(id: TrainerId) -> Self {
        Self {
            id,
            fixed_ivs: [None; 6],
            ability: WonderCardAbility::Random,
            gender: None,
            shiny: ShinyLock::Random,
            nature: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WonderCardFrame {
    pub number: u32,
    pub seed: u64,
    pub ivs: Ivs,
    pub pid: Pid,
    pub nature: Nature,
    pub ability: Ability,
    pub shiny: bool,
}

#[derive(Clone, Debug)]
pub struct WonderCardGenerator {
    params: WonderCardParameters,
    rng: Gen5Rng,
    frame: WonderCardFrame,
}

impl WonderCardGenerator {
    pub fn new(raw_seed: u64, params: WonderCardParameters) -> Self {
        Self {
            params,
            rng: Gen5Rng::new(raw_seed),
            frame: WonderCardFrame::default(),
        }
    }

    fn adjust_pid(&self, raw: u32) -> (Pid, Ability) {
        let p = &self.params;
        let (mut raw, ability) = match p.ability {
            WonderCardAbility::Random => (raw, Pid(raw).ability_gen5()),
            WonderCardAbility::First => (raw & !ABILITY_BIT, Ability::First),
            WonderCardAbility::Second => (raw | ABILITY_BIT, Ability::Second),
            WonderCardAbility::Hidden => (raw & !ABILITY_BIT, Ability::Hidden),
        };
        if let Some((gender, ratio)) = p.gender {
            raw = (raw & !0xFF) | ratio.force_low_byte(raw as u8, gender) as u32;
        }
        if p.shiny == ShinyLock::Never && Pid(raw).is_shiny(p.id) {
            raw ^= SHINY_LOCK_BIT;
        }
        (Pid(raw), ability)
    }

    fn derive(&self, number: u32) -> WonderCardFrame {
        let p = &self.params;
        let seed = self.rng.state();
        let mut rng = self.rng;

        rng.jump(2);
        let mut ivs = Ivs::default();
        for (stat, fixed) in Stat::ALL.iter().zip(p.fixed_ivs) {
            let value = fixed.unwrap_or_else(|| rng.rand(32) as u8);
            ivs = ivs.with_stat(*stat, value);
        }
        rng.jump(2);

        let (pid, ability) = self.adjust_pid(rng.next_u32());
        let nature = p.nature.unwrap_or_else(|| Nature::from_index(rng.rand(25)));

        WonderCardFrame {
            number,
            seed,
            ivs,
            pid,
            nature,
            ability,
            shiny: pid.is_shiny(p.id),
        }
    }
}

impl FrameGenerator for WonderCardGenerator {
    type Frame = WonderCardFrame;

    fn advance(&mut self) {
        self.frame = self.derive(self.frame.number + 1);
        self.rng.next_u64();
    }

    fn skip(&mut self, n: u32) {
        if n == 0 {
            return;
        }
        self.rng.jump(n as u64 - 1);
        self.frame.number += n - 1;
        self.advance();
    }

    fn current(&self) -> &WonderCardFrame {
        &self.frame
    }

    fn frame_number(&self) -> u32 {
        self.frame.number
    }
}
