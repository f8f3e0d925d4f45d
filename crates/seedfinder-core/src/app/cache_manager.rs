//! Shared seed cache state
//!
//! A [`CacheManager`] owns every loaded cache together with a count of the
//! searches using it. [`CacheManager::acquire`] loads a cache on first use and
//! returns a [`CacheHandle`]; dropping the last handle for a cache unloads it.
//! Loads happen under the manager's mutex, so two searches asking for the same
//! cache never read the file twice.

use crate::constants::FAST_CACHE_WINDOW;
use crate::domain::cache_format::{self, CacheEntry, CacheFormatError, CacheKind};
use crate::infra::cache_io::{self, CacheError};
use rayon::prelude::*;
use std::collections::HashMap;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::info;

#[cfg(feature = "hashmap-cache")]
type EntryMap = rustc_hash::FxHashMap<u32, Vec<CacheEntry>>;
#[cfg(not(feature = "hashmap-cache"))]
type EntryMap = HashMap<u32, Vec<CacheEntry>>;

// =============================================================================
// Loaded caches
// =============================================================================

/// In-memory layout of a loaded cache
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CacheShape {
    /// Hash table keyed by IV seed, for short frame windows
    Hashed,
    /// Entries sorted by IV seed and frame, binary searched
    Sorted,
}

impl CacheShape {
    /// Shape a search over frames `1..=max_frame` should use
    pub const fn for_window(max_frame: u32) -> Self {
        if max_frame <= FAST_CACHE_WINDOW {
            CacheShape::Hashed
        } else {
            CacheShape::Sorted
        }
    }
}

/// IV seed -> matching frames lookup
#[derive(Debug)]
pub enum SeedCache {
    Sorted(Vec<CacheEntry>),
    Hashed(EntryMap),
}

impl SeedCache {
    /// Re-simulate `seeds` and keep every frame that hits `kind`'s pattern
    pub fn from_seeds(kind: CacheKind, max_frame: u32, seeds: &[u32], shape: CacheShape) -> Self {
        let entries: Vec<CacheEntry> = seeds
            .par_iter()
            .flat_map_iter(|&seed| cache_format::hits(seed, kind, max_frame))
            .collect();
        Self::from_entries(entries, shape)
    }

    pub fn from_entries(mut entries: Vec<CacheEntry>, shape: CacheShape) -> Self {
        match shape {
            CacheShape::Sorted => {
                entries.sort_unstable();
                SeedCache::Sorted(entries)
            }
            CacheShape::Hashed => {
                let mut map = EntryMap::default();
                for entry in entries {
                    map.entry(entry.iv_seed).or_default().push(entry);
                }
                SeedCache::Hashed(map)
            }
        }
    }

    /// Cached frames of `iv_seed`, in frame order
    pub fn lookup(&self, iv_seed: u32) -> &[CacheEntry] {
        match self {
            SeedCache::Sorted(entries) => {
                let start = entries.partition_point(|e| e.iv_seed < iv_seed);
                let end = start + entries[start..].partition_point(|e| e.iv_seed == iv_seed);
                &entries[start..end]
            }
            SeedCache::Hashed(map) => map.get(&iv_seed).map(Vec::as_slice).unwrap_or(&[]),
        }
    }

    /// Number of cached frames
    pub fn len(&self) -> usize {
        match self {
            SeedCache::Sorted(entries) => entries.len(),
            SeedCache::Hashed(map) => map.values().map(Vec::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// Manager
// =============================================================================

/// Identity of a loaded cache
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub kind: CacheKind,
    pub max_frame: u32,
    pub shape: CacheShape,
}

impl CacheKey {
    pub const fn new(kind: CacheKind, max_frame: u32) -> Self {
        Self {
            kind,
            max_frame,
            shape: CacheShape::for_window(max_frame),
        }
    }
}

struct Loaded {
    cache: Arc<SeedCache>,
    users: usize,
}

/// Reference-counted owner of loaded seed caches
pub struct CacheManager {
    dir: PathBuf,
    loaded: Mutex<HashMap<CacheKey, Loaded>>,
}

impl CacheManager {
    /// Manager reading cache files from `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Arc<Self> {
        Arc::new(Self {
            dir: dir.into(),
            loaded: Mutex::new(HashMap::new()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CacheKey, Loaded>> {
        self.loaded.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Borrow the cache for `key`, loading it on first use
    pub fn acquire(self: &Arc<Self>, key: CacheKey) -> Result<CacheHandle, CacheError> {
        let mut loaded = self.lock();
        if let Some(entry) = loaded.get_mut(&key) {
            entry.users += 1;
            return Ok(CacheHandle {
                manager: Arc::clone(self),
                key,
                cache: Arc::clone(&entry.cache),
            });
        }

        let path = cache_io::cache_path(&self.dir, key.kind, key.max_frame);
        let (header, seeds) = cache_io::read_cache(&path)?;
        if header.kind != key.kind || header.max_frame != key.max_frame {
            return Err(CacheFormatError::HeaderMismatch.into());
        }
        let cache = Arc::new(SeedCache::from_seeds(key.kind, key.max_frame, &seeds, key.shape));
        info!(
            path = %path.display(),
            seeds = seeds.len(),
            frames = cache.len(),
            shape = ?key.shape,
            "seed cache loaded"
        );

        loaded.insert(
            key,
            Loaded {
                cache: Arc::clone(&cache),
                users: 1,
            },
        );
        Ok(CacheHandle {
            manager: Arc::clone(self),
            key,
            cache,
        })
    }

    fn release(&self, key: CacheKey) {
        let mut loaded = self.lock();
        let Some(entry) = loaded.get_mut(&key) else {
            return;
        };
        entry.users -= 1;
        if entry.users == 0 {
            loaded.remove(&key);
            info!(kind = ?key.kind, max_frame = key.max_frame, "seed cache unloaded");
        }
    }

    /// Number of searches holding `key`
    pub fn users(&self, key: CacheKey) -> usize {
        self.lock().get(&key).map_or(0, |entry| entry.users)
    }

    pub fn loaded_count(&self) -> usize {
        self.lock().len()
    }
}

/// Scoped use of a loaded cache; releases it on drop
pub struct CacheHandle {
    manager: Arc<CacheManager>,
    key: CacheKey,
    cache: Arc<SeedCache>,
}

impl CacheHandle {
    pub fn key(&self) -> CacheKey {
        self.key
    }
}

impl Deref for CacheHandle {
    type Target = SeedCache;

    fn deref(&self) -> &SeedCache {
        &self.cache
    }
}

impl Drop for CacheHandle {
    fn drop(&mut self) {
        self.manager.release(self.key);
    }
}
