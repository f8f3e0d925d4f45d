//! Application layer - Use case implementations
//!
//! This module coordinates domain and infrastructure layers to implement use cases.

pub mod cache_builder;
pub mod cache_manager;
pub mod search;
pub mod searchers;
