//! Personality values and trainer IDs

use super::gender::{Gender, GenderRatio};
use super::nature::Nature;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ability {
    #[default]
    First,
    Second,
    Hidden,
}

/// Trainer ID / secret ID pair
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrainerId {
    pub tid: u16,
    pub sid: u16,
}

impl TrainerId {
    pub const fn new(tid: u16, sid: u16) -> Self {
        Self { tid, sid }
    }

    /// Split a 32-bit ID word: TID is the low half, SID the high half
    pub const fn from_word(word: u32) -> Self {
        Self {
            tid: word as u16,
            sid: (word >> 16) as u16,
        }
    }

    #[inline]
    pub const fn xor(self) -> u16 {
        self.tid ^ self.sid
    }
}

/// Personality value
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pid(pub u32);

impl Pid {
    /// Assemble from two 16-bit draws (Gen 3/4)
    #[inline]
    pub const fn from_halves(low: u16, high: u16) -> Self {
        Self(((high as u32) << 16) | low as u32)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn low(self) -> u16 {
        self.0 as u16
    }

    #[inline]
    pub const fn high(self) -> u16 {
        (self.0 >> 16) as u16
    }

    #[inline]
    pub const fn nature(self) -> Nature {
        Nature::from_index(self.0)
    }

    #[inline]
    pub const fn gender(self, ratio: GenderRatio) -> Gender {
        ratio.gender_of(self.0 as u8)
    }

    pub const fn ability_gen34(self) -> Ability {
        if self.0 & 1 == 0 {
            Ability::First
        } else {
            Ability::Second
        }
    }

    pub const fn ability_gen5(self) -> Ability {
        if (self.0 >> 16) & 1 == 0 {
            Ability::First
        } else {
            Ability::Second
        }
    }

    #[inline]
    pub const fn shiny_value(self, id: TrainerId) -> u16 {
        id.tid ^ id.sid ^ self.high() ^ self.low()
    }

    #[inline]
    pub const fn is_shiny(self, id: TrainerId) -> bool {
        self.shiny_value(id) < 8
    }
}

impl std::fmt::Display for Pid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:08X}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pid_fields() {
        let pid = Pid(0x84EA_0B71);
        assert_eq!(pid.low(), 0x0B71);
        assert_eq!(pid.high(), 0x84EA);
        assert_eq!(pid.nature(), Nature::Modest);
        assert_eq!(pid.ability_gen34(), Ability::Second);
        assert_eq!(pid.ability_gen5(), Ability::First);
        assert_eq!(pid.gender(GenderRatio::Even), Gender::Female);
        assert_eq!(Pid::from_halves(0x0B71, 0x84EA), pid);
    }

    #[test]
    fn test_shiny() {
        let id = TrainerId::new(12345, 54321);
        let high = 0x1234u16;
        let low = id.tid ^ id.sid ^ high;
        assert!(Pid::from_halves(low, high).is_shiny(id));
        assert!(Pid::from_halves(low ^ 7, high).is_shiny(id));
        assert!(!Pid::from_halves(low ^ 8, high).is_shiny(id));
    }

    #[test]
    fn test_trainer_id_from_word() {
        let id = TrainerId::from_word(0xBAFC_1633);
        assert_eq!(id.tid, 0x1633);
        assert_eq!(id.sid, 0xBAFC);
    }
}
