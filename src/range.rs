//! Range query (C6): resolve the start cursor as in point lookup, then
//! scan the bottom lane in blocks against the upper bound.

use crate::data_lane::DataLane;
use crate::descent::{binary_search_top, descend};
use crate::fast_lane::FastLanes;
use crate::types::{Key, RangeResult, SIMD_SEGMENTS};

/// Returns whether every key in the 8-key block starting at `start_pos` is
/// `<= hi`. A portable stand-in for an architecture-specific SIMD
/// compare-and-mask.
fn block_all_le(lanes: &FastLanes, start_pos: u32, hi: Key) -> bool {
    (0..SIMD_SEGMENTS as u32).all(|i| lanes.key_at(start_pos + i) <= hi)
}

pub(crate) fn range(lanes: &FastLanes, data: &DataLane, lo: Key, hi: Key) -> RangeResult {
    let top = lanes.top_level();
    if lanes.flane_items(top) == 0 {
        return RangeResult {
            start: None,
            end: None,
            count: 0,
        };
    }

    let start0 = lanes.starts_of_flanes(0);
    let bottom_cap = lanes.items_per_level(0);

    // Step 1-2: resolve the start cursor exactly as point lookup does,
    // then back off while we've overshot `lo`.
    let top_pos = binary_search_top(lanes, lo);
    let mut cur_pos = descend(lanes, lo, top_pos);
    while cur_pos > start0 && lanes.key_at(cur_pos) > lo {
        cur_pos -= 1;
    }

    let start = match lanes.pointer_at(cur_pos - start0) {
        Some(node_idx) => {
            let resolved = data.advance_while(node_idx, |k| k < lo);
            if data.key(resolved) >= lo {
                Some(resolved)
            } else {
                None
            }
        }
        None => None,
    };

    // Step 3: whole-block scan while every key in the block is <= hi.
    let mut count = 0u32;
    let mut r_pos = cur_pos - start0;
    while r_pos + SIMD_SEGMENTS as u32 <= bottom_cap && block_all_le(lanes, start0 + r_pos, hi) {
        cur_pos += SIMD_SEGMENTS as u32;
        r_pos += SIMD_SEGMENTS as u32;
        count += SIMD_SEGMENTS as u32 * lanes.skip() as u32;
    }

    // Step 4: back off one slot, then creep forward one key at a time.
    if cur_pos > start0 {
        cur_pos -= 1;
    }
    let bottom_end = start0 + bottom_cap;
    while cur_pos + 1 < bottom_end && lanes.key_at(cur_pos + 1) <= hi {
        cur_pos += 1;
    }
    let r_pos = cur_pos - start0;

    // Step 5: refine the end cursor on the data lane.
    let end = match lanes.pointer_at(r_pos) {
        Some(node_idx) if data.key(node_idx) <= hi => {
            Some(data.advance_while_next(node_idx, |k| k <= hi))
        }
        _ => None,
    };

    RangeResult { start, end, count }
}
