//! Cache generation workflow
//!
//! This module scans the IV seed space for seeds whose IV frames hit a
//! cache pattern and writes them as a cache file.

use crate::constants::SEED_SPACE;
use crate::domain::cache_format::{self, CacheHeader, CacheKind};
use crate::domain::criteria::CriteriaError;
use crate::infra::cache_io::{self, CacheError};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::info;

/// Seeds scanned per progress report
const CHUNK_SIZE: u64 = 1 << 24;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheBuilder {
    kind: CacheKind,
    max_frame: u32,
}

impl CacheBuilder {
    pub fn new(kind: CacheKind, max_frame: u32) -> Result<Self, CriteriaError> {
        if max_frame == 0 {
            return Err(CriteriaError::InvalidFrameRange { min: 1, max: 0 });
        }
        Ok(Self { kind, max_frame })
    }

    pub fn header(&self) -> CacheHeader {
        CacheHeader::new(self.kind, self.max_frame)
    }

    /// Sorted IV seeds in `min..=max` with at least one hit
    pub fn scan_range(&self, min: u32, max: u32) -> Vec<u32> {
        (min..=max)
            .into_par_iter()
            .filter(|&seed| cache_format::hits(seed, self.kind, self.max_frame).next().is_some())
            .collect()
    }

    /// Scan the whole 32-bit space
    ///
    /// `on_progress` receives (seeds scanned, total) after every chunk.
    pub fn scan_all_with_progress<F>(&self, mut on_progress: F) -> Vec<u32>
    where
        F: FnMut(u64, u64),
    {
        let mut seeds = Vec::new();
        let mut start = 0u64;
        while start < SEED_SPACE {
            let end = (start + CHUNK_SIZE).min(SEED_SPACE);
            seeds.extend(self.scan_range(start as u32, (end - 1) as u32));
            on_progress(end, SEED_SPACE);
            start = end;
        }
        seeds
    }

    /// Scan the whole space and write the cache under `dir`
    pub fn build<F>(&self, dir: impl AsRef<Path>, on_progress: F) -> Result<PathBuf, CacheError>
    where
        F: FnMut(u64, u64),
    {
        let seeds = self.scan_all_with_progress(on_progress);
        let path = cache_io::cache_path(dir, self.kind, self.max_frame);
        self.write(&path, &seeds)?;
        Ok(path)
    }

    pub fn write(&self, path: impl AsRef<Path>, seeds: &[u32]) -> Result<(), CacheError> {
        let path = path.as_ref();
        cache_io::save_cache_file(path, &self.header(), seeds)?;
        info!(path = %path.display(), seeds = seeds.len(), kind = ?self.kind, "seed cache written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cache_format::IvPattern;
    use crate::domain::frame::{FrameGenerator, Gen5IvGenerator};

    const SPECIAL: CacheKind = CacheKind::new(IvPattern::SpecialFlawless, false);

    #[test]
    fn test_zero_window_rejected() {
        assert!(CacheBuilder::new(SPECIAL, 0).is_err());
    }

    #[test]
    fn test_scan_range_finds_known_seeds() {
        let builder = CacheBuilder::new(SPECIAL, 8).unwrap();
        assert_eq!(builder.scan_range(1_536_000, 1_762_000), vec![1_536_853, 1_761_952]);
    }

    #[test]
    fn test_scan_range_matches_brute_force() {
        let kind = CacheKind::new(IvPattern::SpecialFlawless, false);
        let builder = CacheBuilder::new(kind, 8).unwrap();
        let expected: Vec<u32> = (1_536_800..=1_536_900)
            .filter(|&seed| {
                let mut generator = Gen5IvGenerator::new(seed, kind.iv_kind());
                (0..8).any(|_| {
                    generator.advance();
                    IvPattern::SpecialFlawless.matches(generator.current().ivs)
                })
            })
            .collect();
        assert_eq!(builder.scan_range(1_536_800, 1_536_900), expected);
        assert_eq!(expected, vec![1_536_853]);
    }

    #[test]
    fn test_window_limits_hits() {
        // the hit sits at frame 7
        let builder = CacheBuilder::new(SPECIAL, 6).unwrap();
        assert!(builder.scan_range(1_536_850, 1_536_860).is_empty());
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let builder = CacheBuilder::new(SPECIAL, 8).unwrap();
        let path = cache_io::cache_path(dir.path(), SPECIAL, 8);
        builder.write(&path, &[1_536_853, 1_761_952]).unwrap();
        let (header, seeds) = cache_io::load_cache_file(&path).unwrap();
        assert_eq!(header, builder.header());
        assert_eq!(seeds, vec![1_536_853, 1_761_952]);
    }
}
