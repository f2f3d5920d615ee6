//! Point lookup (C5): binary search the top lane, descend, then confirm
//! against the data lane.

use crate::data_lane::DataLane;
use crate::descent::{binary_search_top, descend};
use crate::fast_lane::FastLanes;
use crate::types::{Key, SENTINEL};

/// Returns `key` if present in the index, otherwise `SENTINEL`.
pub(crate) fn lookup(lanes: &FastLanes, data: &DataLane, key: Key) -> Key {
    let top = lanes.top_level();
    if lanes.flane_items(top) == 0 {
        return SENTINEL;
    }

    let top_pos = binary_search_top(lanes, key);
    let bottom_pos = descend(lanes, key, top_pos);
    if lanes.key_at(bottom_pos) == key {
        return key;
    }

    let start0 = lanes.starts_of_flanes(0);
    let bottom_slot = bottom_pos - start0;
    let Some(node_idx) = lanes.pointer_at(bottom_slot) else {
        return SENTINEL;
    };

    let found = data.advance_while(node_idx, |k| k < key);
    if data.key(found) == key { key } else { SENTINEL }
}
