//! Fast lanes (C2) and the bottom-lane pointer table (C3): a flat,
//! level-partitioned array of keys plus the parallel table mapping each
//! bottom-lane slot to a data-lane node.

use crate::data_lane::DataLane;
use crate::types::{Key, SENTINEL, TOP};

/// Outcome of a successful lane write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Inserted {
    /// Wrote a new key at this flat-array slot.
    At(u32),
    /// The key already occupied a slot in this level — a duplicate.
    Duplicate,
}

/// Signal that a level had no room for the key. Never escapes the crate:
/// the resize trigger in `SkipList` keeps this from happening in practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LaneFull;

fn compute_geometry(max_level: u8, skip: u8, top: u32) -> (Vec<u32>, Vec<u32>) {
    let max_level = max_level as usize;
    let mut items_per_level = vec![0u32; max_level];
    let mut starts_of_flanes = vec![0u32; max_level];
    items_per_level[max_level - 1] = top;
    starts_of_flanes[max_level - 1] = 0;
    for level in (0..max_level - 1).rev() {
        items_per_level[level] = items_per_level[level + 1] * skip as u32;
        starts_of_flanes[level] = starts_of_flanes[level + 1] + items_per_level[level + 1];
    }
    (items_per_level, starts_of_flanes)
}

/// The flat fast-lane array, its per-level geometry/occupancy, and the
/// bottom-lane pointer table, all owned together since a resize replaces
/// all four in lockstep.
pub(crate) struct FastLanes {
    max_level: u8,
    skip: u8,
    items_per_level: Vec<u32>,
    starts_of_flanes: Vec<u32>,
    flane_items: Vec<u32>,
    flanes: Vec<Key>,
    flane_pointers: Vec<Option<usize>>,
}

impl FastLanes {
    pub fn new(max_level: u8, skip: u8) -> Self {
        let (items_per_level, starts_of_flanes) = compute_geometry(max_level, skip, TOP);
        let total = starts_of_flanes[0] + items_per_level[0];
        FastLanes {
            max_level,
            skip,
            flane_items: vec![0; max_level as usize],
            flanes: vec![SENTINEL; total as usize],
            flane_pointers: vec![None; items_per_level[0] as usize],
            items_per_level,
            starts_of_flanes,
        }
    }

    pub fn max_level(&self) -> u8 {
        self.max_level
    }

    pub fn skip(&self) -> u8 {
        self.skip
    }

    pub fn top_level(&self) -> usize {
        self.max_level as usize - 1
    }

    pub fn items_per_level(&self, level: usize) -> u32 {
        self.items_per_level[level]
    }

    pub fn starts_of_flanes(&self, level: usize) -> u32 {
        self.starts_of_flanes[level]
    }

    pub fn flane_items(&self, level: usize) -> u32 {
        self.flane_items[level]
    }

    /// Total number of flat-array slots across all levels.
    pub fn capacity(&self) -> u32 {
        self.starts_of_flanes[0] + self.items_per_level[0]
    }

    pub fn key_at(&self, pos: u32) -> Key {
        self.flanes[pos as usize]
    }

    /// Like [`Self::key_at`], but treats any position at or past the end
    /// of the flat array as `SENTINEL` instead of panicking. The descent
    /// walk's forward probe can momentarily step one slot past the end of
    /// the bottom lane; reading `SENTINEL` there is exactly the value that
    /// would have been stored if the array were one slot larger.
    pub fn key_at_or_sentinel(&self, pos: u32) -> Key {
        self.flanes.get(pos as usize).copied().unwrap_or(SENTINEL)
    }

    pub fn pointer_at(&self, bottom_slot: u32) -> Option<usize> {
        self.flane_pointers[bottom_slot as usize]
    }

    /// Append `key` to the end of `level`'s populated prefix. Used by the
    /// bulk-insert path, which guarantees the key exceeds everything
    /// already in the level.
    pub fn append_into_level(
        &mut self,
        level: usize,
        key: Key,
        node_idx: usize,
    ) -> Result<u32, LaneFull> {
        let start = self.starts_of_flanes[level];
        let items = self.flane_items[level];
        if items >= self.items_per_level[level] {
            return Err(LaneFull);
        }
        let slot = start + items;
        self.flanes[slot as usize] = key;
        self.flane_items[level] += 1;
        if level == 0 {
            self.flane_pointers[(slot - start) as usize] = Some(node_idx);
        }
        Ok(slot)
    }

    /// Insert `key` into `level` at its sorted position, shifting the
    /// populated suffix right to make room. Scanning is bounded by the
    /// populated prefix (`flane_items[level]`), not the full level
    /// capacity, so a key smaller than everything currently in the level
    /// still lands in the right slot instead of shifting past unwritten
    /// sentinel entries.
    pub fn sorted_insert_into_level(
        &mut self,
        level: usize,
        key: Key,
        node_idx: usize,
    ) -> Result<Inserted, LaneFull> {
        let start = self.starts_of_flanes[level];
        let items = self.flane_items[level];
        let cap = self.items_per_level[level];
        let end = start + items;

        let mut slot = start;
        while slot < end && self.flanes[slot as usize] < key {
            slot += 1;
        }

        if slot < end && self.flanes[slot as usize] == key {
            return Ok(Inserted::Duplicate);
        }

        if items >= cap {
            return Err(LaneFull);
        }

        if slot < end && level == 0 {
            for i in (slot..end).rev() {
                self.flane_pointers[(i + 1 - start) as usize] =
                    self.flane_pointers[(i - start) as usize];
            }
        }
        for i in (slot..end).rev() {
            self.flanes[(i + 1) as usize] = self.flanes[i as usize];
        }

        self.flanes[slot as usize] = key;
        self.flane_items[level] += 1;
        if level == 0 {
            self.flane_pointers[(slot - start) as usize] = Some(node_idx);
        }
        Ok(Inserted::At(slot))
    }

    /// Grow the top lane by `TOP` and rebuild every level from scratch by
    /// walking `data_lane`. Always invariant-preserving regardless of the
    /// previous lane contents, since the data lane is authoritative.
    pub fn resize(&mut self, data_lane: &DataLane) {
        let new_top = self.items_per_level[self.top_level()] + TOP;
        let (new_items, new_starts) = compute_geometry(self.max_level, self.skip, new_top);
        let total = new_starts[0] + new_items[0];

        let mut new_flanes = vec![SENTINEL; total as usize];
        let mut new_pointers: Vec<Option<usize>> = vec![None; new_items[0] as usize];
        let mut new_flane_items = vec![0u32; self.max_level as usize];

        let skip = self.skip as u32;
        let mut level0_count = 0u32;
        let mut cur = data_lane.head();
        let mut i: u32 = 0;
        while let Some(next) = data_lane.next(cur) {
            cur = next;
            if i % skip == 0 {
                let slot = new_starts[0] + level0_count;
                new_flanes[slot as usize] = data_lane.key(cur);
                new_pointers[level0_count as usize] = Some(cur);
                level0_count += 1;
            }
            i += 1;
        }
        new_flane_items[0] = level0_count;

        for level in 1..self.max_level as usize {
            let lower_start = new_starts[level - 1];
            let lower_items = new_flane_items[level - 1];
            let this_start = new_starts[level];
            let mut count = 0u32;
            let mut j = 0u32;
            while j * skip < lower_items {
                let src = lower_start + j * skip;
                new_flanes[(this_start + count) as usize] = new_flanes[src as usize];
                count += 1;
                j += 1;
            }
            new_flane_items[level] = count;
        }

        self.items_per_level = new_items;
        self.starts_of_flanes = new_starts;
        self.flanes = new_flanes;
        self.flane_pointers = new_pointers;
        self.flane_items = new_flane_items;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_lane::DataLane;

    #[test]
    fn geometry_matches_spec_example() {
        // L=3, s=2, TOP=16: items_per_level = [64, 32, 16]
        let lanes = FastLanes::new(3, 2);
        assert_eq!(lanes.items_per_level(2), 16);
        assert_eq!(lanes.items_per_level(1), 32);
        assert_eq!(lanes.items_per_level(0), 64);
        assert_eq!(lanes.starts_of_flanes(2), 0);
        assert_eq!(lanes.starts_of_flanes(1), 16);
        assert_eq!(lanes.starts_of_flanes(0), 48);
        assert_eq!(lanes.capacity(), 112);
    }

    #[test]
    fn append_into_level_tracks_pointer_table() {
        let mut lanes = FastLanes::new(3, 2);
        let slot = lanes.append_into_level(0, 5, 7).unwrap();
        assert_eq!(lanes.key_at(slot), 5);
        assert_eq!(lanes.pointer_at(slot - lanes.starts_of_flanes(0)), Some(7));
        assert_eq!(lanes.flane_items(0), 1);
    }

    #[test]
    fn sorted_insert_shifts_suffix() {
        let mut lanes = FastLanes::new(2, 3);
        lanes.append_into_level(0, 10, 1).unwrap();
        lanes.append_into_level(0, 30, 3).unwrap();
        let outcome = lanes.sorted_insert_into_level(0, 20, 2).unwrap();
        assert_eq!(outcome, Inserted::At(lanes.starts_of_flanes(0) + 1));
        let start = lanes.starts_of_flanes(0);
        assert_eq!(lanes.key_at(start), 10);
        assert_eq!(lanes.key_at(start + 1), 20);
        assert_eq!(lanes.key_at(start + 2), 30);
        assert_eq!(lanes.pointer_at(1), Some(2));
        assert_eq!(lanes.pointer_at(2), Some(3));
    }

    #[test]
    fn sorted_insert_detects_duplicate() {
        let mut lanes = FastLanes::new(2, 3);
        lanes.append_into_level(0, 10, 1).unwrap();
        let outcome = lanes.sorted_insert_into_level(0, 10, 99).unwrap();
        assert_eq!(outcome, Inserted::Duplicate);
    }

    #[test]
    fn resize_rebuilds_from_data_lane() {
        let mut data = DataLane::new();
        let mut lanes = FastLanes::new(2, 2);
        for k in 1..=20u32 {
            data.append(k);
        }
        lanes.resize(&data);
        // skip=2: level 0 holds every 2nd real node -> 10 entries: 2,4,...,20
        assert_eq!(lanes.flane_items(0), 10);
        let start0 = lanes.starts_of_flanes(0);
        for j in 0..10u32 {
            assert_eq!(lanes.key_at(start0 + j), (j + 1) * 2);
        }
    }
}
