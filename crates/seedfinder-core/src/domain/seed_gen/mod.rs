//! Seed generators
//!
//! A seed generator walks one seed space in a fixed order. Splitting cuts
//! that order into contiguous, disjoint shards whose union is the original
//! space, so each worker thread can own one shard.

pub mod buttons;
mod clock;
pub mod hashed;
pub mod iv_seed;
pub mod range;
pub mod time;

pub use buttons::ButtonComboSet;
pub use clock::ClockRange;
pub use hashed::{HashedSeedGenerator, HashedSeedRanges};
pub use iv_seed::IvSeedGenerator;
pub use range::RangeSeedGenerator;
pub use time::{CGearSeedGenerator, TimeSeedGenerator, Timed};

/// Common contract of every seed space
pub trait SeedGenerator: Send + Sized {
    type Seed: Send;

    /// Seeds this generator (or shard) will still produce
    fn num_seeds(&self) -> u64;

    /// Next seed in enumeration order, `None` once exhausted
    fn next_seed(&mut self) -> Option<Self::Seed>;

    /// Cut the remaining seeds into at most `n` contiguous shards
    ///
    /// Always returns at least one shard. An empty generator yields a single
    /// empty shard.
    fn split(self, n: usize) -> Vec<Self>;
}

/// Contiguous index bounds `[start, end)` for `n` shards of `start..end`
///
/// Shard sizes differ by at most one.
pub(crate) fn shard_bounds(start: u64, end: u64, n: usize) -> Vec<(u64, u64)> {
    let len = end.saturating_sub(start);
    let shards = (n.max(1) as u64).min(len.max(1));
    let base = len / shards;
    let extra = len % shards;

    let mut bounds = Vec::with_capacity(shards as usize);
    let mut lo = start;
    for i in 0..shards {
        let size = base + u64::from(i < extra);
        bounds.push((lo, lo + size));
        lo += size;
    }
    bounds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shard_bounds_cover_range() {
        let bounds = shard_bounds(10, 110, 7);
        assert_eq!(bounds.len(), 7);
        assert_eq!(bounds[0].0, 10);
        assert_eq!(bounds[6].1, 110);
        for pair in bounds.windows(2) {
            assert_eq!(pair[0].1, pair[1].0);
        }
        let sizes: Vec<u64> = bounds.iter().map(|(lo, hi)| hi - lo).collect();
        assert!(sizes.iter().all(|&s| s == 14 || s == 15));
    }

    #[test]
    fn test_shard_bounds_more_shards_than_items() {
        assert_eq!(shard_bounds(0, 3, 8), vec![(0, 1), (1, 2), (2, 3)]);
        assert_eq!(shard_bounds(5, 5, 4), vec![(5, 5)]);
        assert_eq!(shard_bounds(0, 10, 0), vec![(0, 10)]);
    }
}
