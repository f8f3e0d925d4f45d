use seedfinder_core::app::cache_builder::CacheBuilder;
use seedfinder_core::app::cache_manager::{CacheKey, CacheManager};
use seedfinder_core::domain::cache_format::{CacheFormatError, CacheKind, IvPattern};
use seedfinder_core::infra::cache_io::{CacheError, cache_path, load_cache_file, read_cache};
use std::fs::OpenOptions;
use tempfile::TempDir;

const SPECIAL: CacheKind = CacheKind::new(IvPattern::SpecialFlawless, false);

/// Special-flawless seeds between 1_536_000 and 1_762_000 (frames 1..=8)
const KNOWN_SEEDS: [u32; 2] = [1_536_853, 1_761_952];

fn write_known_cache(dir: &TempDir) -> std::path::PathBuf {
    let builder = CacheBuilder::new(SPECIAL, 8).unwrap();
    let seeds = builder.scan_range(1_536_000, 1_762_000);
    assert_eq!(seeds, KNOWN_SEEDS);
    let path = cache_path(dir.path(), SPECIAL, 8);
    builder.write(&path, &seeds).unwrap();
    path
}

#[test]
fn test_built_cache_loads_through_manager() {
    let dir = TempDir::new().unwrap();
    write_known_cache(&dir);

    let manager = CacheManager::new(dir.path());
    let handle = manager.acquire(CacheKey::new(SPECIAL, 8)).unwrap();
    let frames: Vec<u32> = handle.lookup(1_536_853).iter().map(|e| e.frame).collect();
    assert_eq!(frames, vec![7]);
    let frames: Vec<u32> = handle.lookup(1_761_952).iter().map(|e| e.frame).collect();
    assert_eq!(frames, vec![5]);
    assert!(handle.lookup(1_536_854).is_empty());
}

#[test]
fn test_buffered_and_mapped_reads_agree() {
    let dir = TempDir::new().unwrap();
    let path = write_known_cache(&dir);

    let (header, seeds) = load_cache_file(&path).unwrap();
    assert_eq!(header.kind, SPECIAL);
    assert_eq!(header.max_frame, 8);
    assert_eq!(seeds, KNOWN_SEEDS);
    assert_eq!(read_cache(&path).unwrap(), (header, seeds));
}

#[test]
fn test_truncated_cache_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_known_cache(&dir);
    let len = std::fs::metadata(&path).unwrap().len();

    for cut in [1, 4, len - 10] {
        let file = OpenOptions::new().write(true).open(&path).unwrap();
        file.set_len(len - cut).unwrap();
        drop(file);

        let err = read_cache(&path).unwrap_err();
        assert!(matches!(err, CacheError::BadCacheFile(_)), "cut {cut}: {err:?}");
        assert!(err.is_fallback());
        write_known_cache(&dir);
    }
}

#[test]
fn test_foreign_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = cache_path(dir.path(), SPECIAL, 8);
    std::fs::write(&path, b"this is not a seed cache, just some text").unwrap();

    let err = read_cache(&path).unwrap_err();
    assert_eq!(err, CacheError::BadCacheFile(CacheFormatError::InvalidMagic));

    let manager = CacheManager::new(dir.path());
    assert!(manager.acquire(CacheKey::new(SPECIAL, 8)).is_err());
    assert_eq!(manager.loaded_count(), 0);
}
