//! # Cache-Sensitive Skip List
//!
//! An in-memory ordered index over `u32` keys, built from flat,
//! level-partitioned key arrays ("fast lanes") laid out contiguously in
//! memory so upper-level traversal is a cache-friendly linear scan, plus a
//! singly linked "data lane" that holds the authoritative ordering.
//!
//! ## Core idea
//! Classical skip lists chase pointers through scattered heap allocations.
//! Here the upper levels are arrays, not chains, so a point lookup's
//! descent and a range query's scan touch a handful of cache lines instead
//! of a pointer per hop.

pub mod config;
pub mod error;
pub mod skiplist;
pub mod types;

mod data_lane;
mod descent;
mod fast_lane;
mod lookup;
mod range;

pub use config::Config;
pub use error::{Error, Result};
pub use skiplist::SkipList;
pub use types::{RangeResult, SENTINEL};
