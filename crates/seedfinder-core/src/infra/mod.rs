//! Infrastructure layer - I/O and external dependencies
//!
//! This module handles seed cache files on disk.

pub mod cache_io;

pub use cache_io::{CacheError, cache_path, load_cache_file, read_cache, save_cache_file};
