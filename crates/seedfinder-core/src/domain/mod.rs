//! Domain layer - Pure computational logic
//!
//! This module contains PRNG replays, seed derivation and enumeration, and
//! search criteria without I/O dependencies.

pub mod cache_format;
pub mod criteria;
pub mod frame;
pub mod rng;
pub mod seed;
pub mod seed_gen;
pub mod types;
