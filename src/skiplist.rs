//! The public engine: ties the data lane (C1), fast lanes (C2/C3), insert
//! engine (C4), point lookup (C5), and range query (C6) together.

use crate::config::Config;
use crate::data_lane::DataLane;
use crate::error::{Error, Result};
use crate::fast_lane::{FastLanes, Inserted, LaneFull};
use crate::lookup::lookup;
use crate::range::range;
use crate::types::{Key, RangeResult, SENTINEL, TOP};

/// A cache-sensitive skip list over `u32` keys.
///
/// See the crate-level documentation for the layout this implements:
/// flat, level-partitioned fast lanes over a singly linked data lane.
pub struct SkipList {
    data: DataLane,
    lanes: FastLanes,
    num_elements: u64,
}

impl SkipList {
    /// Create an empty index with `max_level` fast lanes and down-sampling
    /// ratio `skip`. `skip <= 1` is silently promoted to `2`; callers who
    /// want a validation error instead should go through
    /// [`Self::with_config`].
    pub fn new(max_level: u8, skip: u8) -> Self {
        let skip = if skip < 2 { 2 } else { skip };
        let max_level = if max_level == 0 { 1 } else { max_level };
        log::debug!("creating skip list: max_level={max_level} skip={skip}");
        SkipList {
            data: DataLane::new(),
            lanes: FastLanes::new(max_level, skip),
            num_elements: 0,
        }
    }

    /// Create an index from a validated [`Config`].
    pub fn with_config(config: Config) -> Self {
        Self::new(config.max_level, config.skip)
    }

    /// Number of keys currently indexed.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Resolve a data-lane arena index (as returned in a [`RangeResult`])
    /// back to its key.
    pub fn key_at(&self, idx: usize) -> Key {
        self.data.key(idx)
    }

    /// Append `key`, which must be strictly greater than every key already
    /// inserted. `O(1)` amortized; use this for pre-sorted arrival.
    pub fn bulk_insert(&mut self, key: Key) -> Result<()> {
        if key >= SENTINEL {
            return Err(Error::KeyTooLarge(key));
        }
        if !self.data.is_empty() && key <= self.data.tail_key() {
            return Err(Error::UnsortedInsert {
                tail: self.data.tail_key(),
                got: key,
            });
        }

        let node_idx = self.data.append(key);
        let position = self.num_elements;
        self.promote(key, node_idx, position, false)?;
        self.num_elements += 1;
        self.maybe_resize();
        Ok(())
    }

    /// Insert `key` at its sorted position. `O(n)` — walks the data lane
    /// to find the insertion point. Use [`Self::bulk_insert`] when keys
    /// arrive pre-sorted.
    pub fn insert(&mut self, key: Key) -> Result<()> {
        if key >= SENTINEL {
            return Err(Error::KeyTooLarge(key));
        }

        let (pred, position) = self.data.find_predecessor(key);
        if let Some(next) = self.data.next(pred) {
            if self.data.key(next) == key {
                return Err(Error::DuplicateKey(key));
            }
        }

        let node_idx = self.data.insert_after(pred, key);
        self.promote(key, node_idx, position as u64, true)?;
        self.num_elements += 1;
        self.maybe_resize();
        Ok(())
    }

    /// Promote a freshly-inserted node into as many levels as its
    /// position warrants: level `k` receives the key whenever `position`
    /// is a multiple of `skip^(k+1)`, stopping at the first level that
    /// rejects it (duplicate). A lane-full signal should never happen
    /// here, since the resize trigger keeps every lane ahead of demand;
    /// if it ever does, it surfaces as [`Error::LaneOverflow`] rather
    /// than being swallowed.
    fn promote(&mut self, key: Key, node_idx: usize, position: u64, sorted: bool) -> Result<()> {
        let mut modulus: u64 = 1;
        let skip = self.lanes.skip() as u64;
        for level in 0..self.lanes.max_level() as usize {
            modulus = modulus.saturating_mul(skip);
            if position % modulus != 0 {
                break;
            }
            let outcome = if sorted {
                self.lanes.sorted_insert_into_level(level, key, node_idx)
            } else {
                self.lanes
                    .append_into_level(level, key, node_idx)
                    .map(Inserted::At)
            };
            match outcome {
                Ok(Inserted::At(_)) => {}
                Ok(Inserted::Duplicate) => return Err(Error::DuplicateKey(key)),
                Err(LaneFull) => {
                    log::trace!("lane {level} full while promoting key {key}, awaiting resize");
                    return Err(Error::LaneOverflow(level));
                }
            }
        }
        Ok(())
    }

    /// Grow the fast lanes once the top lane's slack runs out.
    fn maybe_resize(&mut self) {
        let skip = self.lanes.skip() as u64;
        let max_level = self.lanes.max_level() as u32;
        let divisor = (TOP as u64).saturating_mul(skip.saturating_pow(max_level));
        if self.num_elements % divisor == 0 {
            log::debug!("resizing fast lanes after {} elements", self.num_elements);
            self.lanes.resize(&self.data);
        }
    }

    /// Returns `key` if present, otherwise [`SENTINEL`].
    pub fn lookup(&self, key: Key) -> Key {
        lookup(&self.lanes, &self.data, key)
    }

    /// Inclusive range query. `lo` and `hi` must both be below `SENTINEL`
    /// and `lo <= hi`.
    pub fn range(&self, lo: Key, hi: Key) -> Result<RangeResult> {
        if lo > hi {
            return Err(Error::InvalidRange { lo, hi });
        }
        if hi >= SENTINEL {
            return Err(Error::KeyTooLarge(hi));
        }
        Ok(range(&self.lanes, &self.data, lo, hi))
    }
}
