//! Seed cache file I/O operations
//!
//! This module provides functions for reading and writing seed cache files.
//! Every failure is a [`CacheError`]; callers treat all of them as "no cache"
//! and fall back to simulation.

use crate::domain::cache_format::{self, CacheFormatError, CacheHeader, CacheKind};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[cfg(feature = "mmap")]
use crate::constants::{CACHE_HEADER_SIZE, CACHE_TRAILER_SIZE};
#[cfg(feature = "mmap")]
use byteorder::{ByteOrder, LittleEndian};
#[cfg(feature = "mmap")]
use memmap2::Mmap;

/// Cache loading / saving errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    #[error("cache file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("bad cache file: {0}")]
    BadCacheFile(#[from] CacheFormatError),

    #[error("not enough memory to load the cache")]
    OutOfMemory,

    #[error("I/O error: {0}")]
    Io(String),
}

impl CacheError {
    /// Whether a search should continue without the cache
    pub fn is_fallback(&self) -> bool {
        match self {
            CacheError::NotFound(_)
            | CacheError::BadCacheFile(_)
            | CacheError::OutOfMemory
            | CacheError::Io(_) => true,
        }
    }

    fn from_io(e: io::Error, path: &Path) -> Self {
        match e.kind() {
            io::ErrorKind::NotFound => CacheError::NotFound(path.to_path_buf()),
            io::ErrorKind::OutOfMemory => CacheError::OutOfMemory,
            io::ErrorKind::UnexpectedEof => CacheError::BadCacheFile(CacheFormatError::Truncated),
            _ => CacheError::Io(e.to_string()),
        }
    }
}

/// Conventional location of a cache inside `dir`
pub fn cache_path(dir: impl AsRef<Path>, kind: CacheKind, max_frame: u32) -> PathBuf {
    dir.as_ref().join(kind.file_name(max_frame))
}

/// Load a cache file with buffered reads
pub fn load_cache_file(path: impl AsRef<Path>) -> Result<(CacheHeader, Vec<u32>), CacheError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| CacheError::from_io(e, path))?;
    let len = file.metadata().map_err(|e| CacheError::from_io(e, path))?.len() as usize;

    let mut bytes = Vec::new();
    bytes.try_reserve_exact(len).map_err(|_| CacheError::OutOfMemory)?;
    BufReader::new(file)
        .read_to_end(&mut bytes)
        .map_err(|e| CacheError::from_io(e, path))?;

    Ok(cache_format::decode(&bytes)?)
}

/// Save a cache file
///
/// `seeds` must be strictly increasing.
pub fn save_cache_file(
    path: impl AsRef<Path>,
    header: &CacheHeader,
    seeds: &[u32],
) -> Result<(), CacheError> {
    let path = path.as_ref();
    let bytes = cache_format::encode(header, seeds)?;
    let file = File::create(path).map_err(|e| CacheError::from_io(e, path))?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&bytes).map_err(|e| CacheError::from_io(e, path))?;
    writer.flush().map_err(|e| CacheError::from_io(e, path))
}

// =============================================================================
// Memory-mapped cache I/O (mmap feature)
// =============================================================================

/// Memory-mapped seed cache file
///
/// The header is validated on open; the seed list is decoded straight from
/// the mapping without copying the file.
#[cfg(feature = "mmap")]
pub struct MappedCacheFile {
    mmap: Mmap,
    header: CacheHeader,
}

#[cfg(feature = "mmap")]
impl MappedCacheFile {
    /// Open a cache file as memory-mapped
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CacheError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| CacheError::from_io(e, path))?;
        // SAFETY: the mapping is read-only and cache files are not modified
        // while a search holds them
        let mmap = unsafe { Mmap::map(&file) }.map_err(|e| CacheError::from_io(e, path))?;
        let header = CacheHeader::from_bytes(&mmap)?;
        if mmap.len() < CACHE_HEADER_SIZE + CACHE_TRAILER_SIZE {
            return Err(CacheFormatError::Truncated.into());
        }
        Ok(Self { mmap, header })
    }

    pub fn header(&self) -> &CacheHeader {
        &self.header
    }

    /// Seed count declared by the trailer
    pub fn declared_len(&self) -> u32 {
        LittleEndian::read_u32(&self.mmap[self.mmap.len() - CACHE_TRAILER_SIZE..])
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.mmap
    }

    /// Decode and validate the seed list
    pub fn seeds(&self) -> Result<Vec<u32>, CacheError> {
        let (_, seeds) = cache_format::decode(&self.mmap)?;
        Ok(seeds)
    }
}

/// Load a cache file, memory-mapped when the `mmap` feature is enabled
pub fn read_cache(path: impl AsRef<Path>) -> Result<(CacheHeader, Vec<u32>), CacheError> {
    #[cfg(feature = "mmap")]
    {
        let mapped = MappedCacheFile::open(path)?;
        Ok((*mapped.header(), mapped.seeds()?))
    }
    #[cfg(not(feature = "mmap"))]
    {
        load_cache_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cache_format::IvPattern;

    fn header() -> CacheHeader {
        CacheHeader::new(CacheKind::new(IvPattern::Flawless, false), 8)
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flawless.sfcache");
        let seeds = vec![3, 99, 1 << 20, 0xFFFF_0000];

        save_cache_file(&path, &header(), &seeds).unwrap();
        let (loaded_header, loaded) = load_cache_file(&path).unwrap();
        assert_eq!(loaded_header, header());
        assert_eq!(loaded, seeds);
        assert_eq!(read_cache(&path).unwrap().1, seeds);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.sfcache");
        let err = load_cache_file(&path).unwrap_err();
        assert_eq!(err, CacheError::NotFound(path.clone()));
        assert!(err.is_fallback());
        assert!(matches!(read_cache(&path), Err(CacheError::NotFound(_))));
    }

    #[test]
    fn test_garbage_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.sfcache");
        std::fs::write(&path, b"not a cache file at all").unwrap();
        let err = load_cache_file(&path).unwrap_err();
        assert_eq!(err, CacheError::BadCacheFile(CacheFormatError::InvalidMagic));
        assert!(err.is_fallback());
    }

    #[cfg(feature = "mmap")]
    #[test]
    fn test_mapped_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = cache_path(dir.path(), header().kind, 8);
        save_cache_file(&path, &header(), &[1, 2, 3]).unwrap();

        let mapped = MappedCacheFile::open(&path).unwrap();
        assert_eq!(*mapped.header(), header());
        assert_eq!(mapped.declared_len(), 3);
        assert_eq!(mapped.seeds().unwrap(), vec![1, 2, 3]);
        assert_eq!(&mapped.as_bytes()[..8], b"SFCACHE\0");
    }
}
