//! Shared top-lane binary search and per-level descent used by both point
//! lookup and range queries.

use crate::fast_lane::FastLanes;
use crate::types::Key;

/// Binary search the top lane for `key`.
///
/// Returns the exact slot if found; otherwise the rightmost populated slot
/// whose key is `<= key` (or the top lane's first slot if every key there
/// exceeds `key`). Callers pass this position into [`descend`] regardless
/// of whether the match was exact — an exact hit at the top still needs to
/// resolve a bottom-lane cursor.
pub(crate) fn binary_search_top(lanes: &FastLanes, key: Key) -> u32 {
    let top = lanes.top_level();
    let start = lanes.starts_of_flanes(top);
    let items = lanes.flane_items(top);
    debug_assert!(items > 0, "binary_search_top called on an empty index");

    let mut lo: i64 = 0;
    let mut hi: i64 = items as i64 - 1;
    let mut rightmost_le: i64 = -1;

    while lo <= hi {
        let mid = lo + (hi - lo) / 2;
        let mid_key = lanes.key_at(start + mid as u32);
        if mid_key == key {
            return start + mid as u32;
        } else if mid_key < key {
            rightmost_le = mid;
            lo = mid + 1;
        } else {
            hi = mid - 1;
        }
    }

    let rel = rightmost_le.max(0);
    start + rel as u32
}

/// Descend from the top lane to level 0, narrowing `cur_pos` at each level
/// to the rightmost slot whose key is `<= key`, then rescaling it into the
/// next level down by the skip factor.
pub(crate) fn descend(lanes: &FastLanes, key: Key, mut cur_pos: u32) -> u32 {
    let top = lanes.top_level();
    for level in (0..=top).rev() {
        let start = lanes.starts_of_flanes(level);
        let capacity = lanes.items_per_level(level);
        let mut r_pos = cur_pos - start;

        while r_pos < capacity {
            cur_pos += 1;
            if lanes.key_at_or_sentinel(cur_pos) > key {
                break;
            }
            r_pos += 1;
        }

        while cur_pos > start && lanes.key_at_or_sentinel(cur_pos) > key {
            cur_pos -= 1;
        }

        if level == 0 {
            break;
        }
        let r_pos = cur_pos - start;
        cur_pos = lanes.starts_of_flanes(level - 1) + r_pos * lanes.skip() as u32;
    }
    cur_pos
}
