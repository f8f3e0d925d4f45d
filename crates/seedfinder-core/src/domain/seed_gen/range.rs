//! Plain 32-bit seed ranges

use super::{SeedGenerator, shard_bounds};
use crate::domain::criteria::CriteriaError;

/// Every 32-bit seed in an inclusive range, ascending
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RangeSeedGenerator {
    next: u64,
    end: u64,
}

impl RangeSeedGenerator {
    pub fn new(min: u32, max: u32) -> Result<Self, CriteriaError> {
        if min > max {
            return Err(CriteriaError::InvalidSeedRange(format!(
                "{:08X} > {:08X}",
                min, max
            )));
        }
        Ok(Self {
            next: min as u64,
            end: max as u64 + 1,
        })
    }

    /// The full 32-bit space
    pub fn full() -> Self {
        Self {
            next: 0,
            end: 1 << 32,
        }
    }
}

impl SeedGenerator for RangeSeedGenerator {
    type Seed = u32;

    fn num_seeds(&self) -> u64 {
        self.end - self.next
    }

    #[inline]
    fn next_seed(&mut self) -> Option<u32> {
        if self.next >= self.end {
            return None;
        }
        let seed = self.next as u32;
        self.next += 1;
        Some(seed)
    }

    fn split(self, n: usize) -> Vec<Self> {
        shard_bounds(self.next, self.end, n)
            .into_iter()
            .map(|(next, end)| Self { next, end })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inclusive_range() {
        let mut generator = RangeSeedGenerator::new(0xFFFF_FFFE, 0xFFFF_FFFF).unwrap();
        assert_eq!(generator.num_seeds(), 2);
        assert_eq!(generator.next_seed(), Some(0xFFFF_FFFE));
        assert_eq!(generator.next_seed(), Some(0xFFFF_FFFF));
        assert_eq!(generator.next_seed(), None);
        assert_eq!(generator.num_seeds(), 0);
    }

    #[test]
    fn test_split_is_partition() {
        let shards = RangeSeedGenerator::new(100, 1099).unwrap().split(6);
        assert_eq!(shards.len(), 6);
        let mut seen = Vec::new();
        for mut shard in shards {
            while let Some(seed) = shard.next_seed() {
                seen.push(seed);
            }
        }
        assert_eq!(seen, (100..1100).collect::<Vec<u32>>());
    }

    #[test]
    fn test_full_space() {
        assert_eq!(RangeSeedGenerator::full().num_seeds(), 1 << 32);
        assert!(RangeSeedGenerator::new(2, 1).is_err());
    }
}
