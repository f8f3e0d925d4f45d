//! Seed search related constants
//!
//! Note: PRNG parameters live next to their engines in domain/rng.

// =============================================================================
// Seed cache file format
// =============================================================================

/// Magic bytes at the start of every cache file
pub const CACHE_MAGIC: [u8; 8] = *b"SFCACHE\0";

/// Current cache file format version
pub const CACHE_FORMAT_VERSION: u32 = 1;

/// Header: magic (8) + version (4) + max frame (4) + kind (4)
pub const CACHE_HEADER_SIZE: usize = 20;

/// Trailer: seed count (4)
pub const CACHE_TRAILER_SIZE: usize = 4;

/// Longest varint a 32-bit delta can take
pub const MAX_VARINT_LEN: usize = 5;

// =============================================================================
// Seed cache windows
// =============================================================================

/// Largest frame window loaded into the hashed shape
pub const FAST_CACHE_WINDOW: u32 = 8;

/// Frame window of the standard caches
pub const DEFAULT_CACHE_WINDOW: u32 = 8;

/// Frame window of the extended caches
pub const EXTENDED_CACHE_WINDOW: u32 = 50;

/// Size of the 32-bit IV seed space
pub const SEED_SPACE: u64 = 1u64 << 32;

// =============================================================================
// Search runner
// =============================================================================

/// Progress reports per full search (one report per 1/500 of the seeds)
pub const PROGRESS_STEPS: u64 = 500;

/// Progress interval in seeds for a search over `num_seeds`
#[inline]
pub const fn progress_interval(num_seeds: u64) -> u64 {
    let interval = num_seeds / PROGRESS_STEPS;
    if interval == 0 { 1 } else { interval }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_interval() {
        assert_eq!(progress_interval(0), 1);
        assert_eq!(progress_interval(499), 1);
        assert_eq!(progress_interval(1000), 2);
        assert_eq!(progress_interval(SEED_SPACE), SEED_SPACE / 500);
    }

    #[test]
    fn test_header_layout() {
        assert_eq!(CACHE_HEADER_SIZE, CACHE_MAGIC.len() + 3 * 4);
    }
}
