//! Individual values, stats and hidden power

use crate::domain::criteria::CriteriaError;
use serde::{Deserialize, Serialize};

/// Stat slot, in packing order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Stat {
    Hp = 0,
    Atk,
    Def,
    SpA,
    SpD,
    Spe,
}

impl Stat {
    pub const ALL: [Stat; 6] = [Stat::Hp, Stat::Atk, Stat::Def, Stat::SpA, Stat::SpD, Stat::Spe];

    pub fn from_index(index: usize) -> Result<Stat, CriteriaError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(CriteriaError::InvalidStatIndex(index))
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Stat::Hp => "HP",
            Stat::Atk => "Atk",
            Stat::Def => "Def",
            Stat::SpA => "SpA",
            Stat::SpD => "SpD",
            Stat::Spe => "Spe",
        }
    }
}

/// Hidden power type
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Element {
    Fighting = 0,
    Flying,
    Poison,
    Ground,
    Rock,
    Bug,
    Ghost,
    Steel,
    Fire,
    Water,
    Grass,
    Electric,
    Psychic,
    Ice,
    Dragon,
    Dark,
}

impl Element {
    pub const ALL: [Element; 16] = [
        Element::Fighting,
        Element::Flying,
        Element::Poison,
        Element::Ground,
        Element::Rock,
        Element::Bug,
        Element::Ghost,
        Element::Steel,
        Element::Fire,
        Element::Water,
        Element::Grass,
        Element::Electric,
        Element::Psychic,
        Element::Ice,
        Element::Dragon,
        Element::Dark,
    ];

    #[inline]
    pub const fn from_index(index: u32) -> Element {
        Self::ALL[(index & 15) as usize]
    }
}

// =============================================================================
// Hidden power arithmetic
// =============================================================================

/// Hidden power bit order: HP, Atk, Def, Spe, SpA, SpD
pub(crate) const HIDDEN_POWER_ORDER: [Stat; 6] =
    [Stat::Hp, Stat::Atk, Stat::Def, Stat::Spe, Stat::SpA, Stat::SpD];

/// Hidden power type from the 6-bit sum of the IVs' lowest bits
#[inline]
pub(crate) const fn hidden_type_from_bits(bits: u32) -> Element {
    Element::from_index(bits * 15 / 63)
}

/// Hidden power base power from the 6-bit sum of the IVs' second bits
#[inline]
pub(crate) const fn hidden_power_from_bits(bits: u32) -> u8 {
    (bits * 40 / 63 + 30) as u8
}

// =============================================================================
// Ivs
// =============================================================================

/// Six IVs packed 5 bits each (HP in bits 0..5, Spe in bits 25..30)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32")]
pub struct Ivs(u32);

impl From<u32> for Ivs {
    fn from(word: u32) -> Self {
        Self::from_word(word)
    }
}

impl Ivs {
    pub const MAX_VALUE: u8 = 31;

    /// Every stat at 31
    pub const PERFECT: Ivs = Ivs(0x3FFF_FFFF);

    /// Pack six values (HP, Atk, Def, SpA, SpD, Spe)
    ///
    /// Each value is masked to its low 5 bits; debug builds assert it is at
    /// most 31. Use [`Ivs::try_new`] for unchecked input.
    pub fn new(values: [u8; 6]) -> Self {
        let mut word = 0u32;
        for (i, &value) in values.iter().enumerate() {
            debug_assert!(value <= Self::MAX_VALUE);
            word |= ((value & 31) as u32) << (i * 5);
        }
        Self(word)
    }

    /// Pack six values, rejecting any above 31
    pub fn try_new(values: [u8; 6]) -> Result<Self, CriteriaError> {
        for (stat, &value) in Stat::ALL.iter().zip(values.iter()) {
            if value > Self::MAX_VALUE {
                return Err(CriteriaError::InvalidIvValue { stat: stat.name(), value });
            }
        }
        Ok(Self::new(values))
    }

    /// Rebuild from a packed word (bits above 29 are dropped)
    #[inline]
    pub const fn from_word(word: u32) -> Self {
        Self(word & 0x3FFF_FFFF)
    }

    /// Decode the two 15-bit IV words of the Gen 3/4 games
    ///
    /// `iv1` holds HP | Atk << 5 | Def << 10 and `iv2` holds
    /// Spe | SpA << 5 | SpD << 10.
    #[inline]
    pub const fn from_gen34_words(iv1: u16, iv2: u16) -> Self {
        let iv1 = iv1 as u32 & 0x7FFF;
        let iv2 = iv2 as u32 & 0x7FFF;
        let low = iv1;
        let spa = (iv2 >> 5) & 31;
        let spd = (iv2 >> 10) & 31;
        let spe = iv2 & 31;
        Self(low | spa << 15 | spd << 20 | spe << 25)
    }

    /// The two Gen 3/4 IV words for these values
    pub const fn gen34_words(self) -> (u16, u16) {
        let iv1 = (self.0 & 0x7FFF) as u16;
        let spa = (self.0 >> 15) & 31;
        let spd = (self.0 >> 20) & 31;
        let spe = (self.0 >> 25) & 31;
        (iv1, (spe | spa << 5 | spd << 10) as u16)
    }

    #[inline]
    pub const fn word(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn stat(self, stat: Stat) -> u8 {
        ((self.0 >> (stat as u32 * 5)) & 31) as u8
    }

    pub fn stat_by_index(self, index: usize) -> Result<u8, CriteriaError> {
        Ok(self.stat(Stat::from_index(index)?))
    }

    #[must_use]
    pub const fn with_stat(self, stat: Stat, value: u8) -> Self {
        let shift = stat as u32 * 5;
        Self((self.0 & !(31 << shift)) | ((value as u32 & 31) << shift))
    }

    pub fn values(self) -> [u8; 6] {
        Stat::ALL.map(|s| self.stat(s))
    }

    fn hidden_bits(self, bit: u32) -> u32 {
        HIDDEN_POWER_ORDER
            .iter()
            .enumerate()
            .map(|(i, &s)| ((self.stat(s) as u32 >> bit) & 1) << i)
            .sum()
    }

    pub fn hidden_power_type(self) -> Element {
        hidden_type_from_bits(self.hidden_bits(0))
    }

    /// Hidden power base power, 30..=70
    pub fn hidden_power_power(self) -> u8 {
        hidden_power_from_bits(self.hidden_bits(1))
    }

    // -------------------------------------------------------------------------
    // Relations
    //
    // Each relation holds only when it holds for every stat, so two IV sets
    // can be unrelated in all four directions.
    // -------------------------------------------------------------------------

    fn all_stats(self, other: Ivs, op: impl Fn(u8, u8) -> bool) -> bool {
        Stat::ALL.iter().all(|&s| op(self.stat(s), other.stat(s)))
    }

    pub fn better_than(self, other: Ivs) -> bool {
        self.all_stats(other, |a, b| a > b)
    }

    pub fn better_than_or_equal(self, other: Ivs) -> bool {
        self.all_stats(other, |a, b| a >= b)
    }

    pub fn worse_than(self, other: Ivs) -> bool {
        self.all_stats(other, |a, b| a < b)
    }

    pub fn worse_than_or_equal(self, other: Ivs) -> bool {
        self.all_stats(other, |a, b| a <= b)
    }
}

impl std::fmt::Display for Ivs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let v = self.values();
        write!(f, "{}/{}/{}/{}/{}/{}", v[0], v[1], v[2], v[3], v[4], v[5])
    }
}
