//! Natures and nature masks

use serde::{Deserialize, Serialize};

/// One of the 25 natures, in in-game index order
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum Nature {
    #[default]
    Hardy = 0,
    Lonely,
    Brave,
    Adamant,
    Naughty,
    Bold,
    Docile,
    Relaxed,
    Impish,
    Lax,
    Timid,
    Hasty,
    Serious,
    Jolly,
    Naive,
    Modest,
    Mild,
    Quiet,
    Bashful,
    Rash,
    Calm,
    Gentle,
    Sassy,
    Careful,
    Quirky,
}

/// Number of natures
pub const NATURE_COUNT: u32 = 25;

impl Nature {
    /// All natures in index order
    pub const ALL: [Nature; 25] = [
        Nature::Hardy,
        Nature::Lonely,
        Nature::Brave,
        Nature::Adamant,
        Nature::Naughty,
        Nature::Bold,
        Nature::Docile,
        Nature::Relaxed,
        Nature::Impish,
        Nature::Lax,
        Nature::Timid,
        Nature::Hasty,
        Nature::Serious,
        Nature::Jolly,
        Nature::Naive,
        Nature::Modest,
        Nature::Mild,
        Nature::Quiet,
        Nature::Bashful,
        Nature::Rash,
        Nature::Calm,
        Nature::Gentle,
        Nature::Sassy,
        Nature::Careful,
        Nature::Quirky,
    ];

    /// Nature for an index, reduced modulo 25
    #[inline]
    pub const fn from_index(index: u32) -> Nature {
        Self::ALL[(index % NATURE_COUNT) as usize]
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Nature::Hardy => "Hardy",
            Nature::Lonely => "Lonely",
            Nature::Brave => "Brave",
            Nature::Adamant => "Adamant",
            Nature::Naughty => "Naughty",
            Nature::Bold => "Bold",
            Nature::Docile => "Docile",
            Nature::Relaxed => "Relaxed",
            Nature::Impish => "Impish",
            Nature::Lax => "Lax",
            Nature::Timid => "Timid",
            Nature::Hasty => "Hasty",
            Nature::Serious => "Serious",
            Nature::Jolly => "Jolly",
            Nature::Naive => "Naive",
            Nature::Modest => "Modest",
            Nature::Mild => "Mild",
            Nature::Quiet => "Quiet",
            Nature::Bashful => "Bashful",
            Nature::Rash => "Rash",
            Nature::Calm => "Calm",
            Nature::Gentle => "Gentle",
            Nature::Sassy => "Sassy",
            Nature::Careful => "Careful",
            Nature::Quirky => "Quirky",
        }
    }
}

impl std::fmt::Display for Nature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Set of natures as a 25-bit mask
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NatureSet(u32);

impl NatureSet {
    const FULL_MASK: u32 = (1 << NATURE_COUNT) - 1;

    pub const fn all() -> Self {
        Self(Self::FULL_MASK)
    }

    pub const fn empty() -> Self {
        Self(0)
    }

    /// Build from a raw mask; bits above 24 are ignored
    pub const fn from_mask(mask: u32) -> Self {
        Self(mask & Self::FULL_MASK)
    }

    pub const fn mask(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn with(self, nature: Nature) -> Self {
        Self(self.0 | (1 << nature as u32))
    }

    #[inline]
    pub const fn contains(self, nature: Nature) -> bool {
        self.0 & (1 << nature as u32) != 0
    }

    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn is_all(self) -> bool {
        self.0 == Self::FULL_MASK
    }

    pub fn iter(self) -> impl Iterator<Item = Nature> {
        Nature::ALL.into_iter().filter(move |&n| self.contains(n))
    }
}

impl Default for NatureSet {
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<Nature> for NatureSet {
    fn from_iter<I: IntoIterator<Item = Nature>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), NatureSet::with)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_index_wraps() {
        assert_eq!(Nature::from_index(0), Nature::Hardy);
        assert_eq!(Nature::from_index(24), Nature::Quirky);
        assert_eq!(Nature::from_index(28), Nature::Adamant);
    }

    #[test]
    fn test_nature_set() {
        let set: NatureSet = [Nature::Adamant, Nature::Jolly].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(Nature::Jolly));
        assert!(!set.contains(Nature::Modest));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Nature::Adamant, Nature::Jolly]);

        assert_eq!(NatureSet::all().len(), 25);
        assert!(NatureSet::from_mask(u32::MAX).is_all());
    }
}
