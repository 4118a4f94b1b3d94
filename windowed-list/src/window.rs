use crate::{ObservationMargin, Overscan, WindowRange};

/// Maps a scroll position to the inclusive index window to display.
///
/// ```text
/// first = floor(scroll_offset / item_size)
/// last  = ceil((scroll_offset + viewport_height + (top + bottom) * item_size) / item_size)
/// ```
///
/// Pure and unclamped: negative offsets yield a negative `first`, and `last` is not bounded by
/// any item count. `item_size` of 0 is treated as 1.
pub fn compute_window(
    scroll_offset: i64,
    viewport_height: u32,
    item_size: u32,
    overscan: Overscan,
) -> WindowRange {
    let size = item_size.max(1) as i64;
    let overscan_px = (overscan.total() as i64).saturating_mul(size);
    let range_end = scroll_offset
        .saturating_add(viewport_height as i64)
        .saturating_add(overscan_px);
    WindowRange {
        first: scroll_offset.div_euclid(size),
        last: div_ceil(range_end, size),
    }
}

fn div_ceil(n: i64, d: i64) -> i64 {
    let q = n.div_euclid(d);
    if n.rem_euclid(d) == 0 { q } else { q + 1 }
}

/// Observation margin for a list: `overscan.top` items above, one item below.
pub fn observation_margin(item_size: u32, overscan: Overscan) -> ObservationMargin {
    let size = item_size.max(1) as u64;
    ObservationMargin {
        top: (overscan.top as u64).saturating_mul(size),
        bottom: size,
    }
}

/// Fraction of an item that overlaps the viewport extended by `margin`.
///
/// Returns a value in `0.0 ..= 1.0`. A host without a native boundary observer can use this to
/// decide when to deliver exit notifications (`ratio <= 0.0`).
pub fn intersection_ratio(
    item_top: u64,
    item_size: u32,
    scroll_offset: i64,
    viewport_height: u32,
    margin: ObservationMargin,
) -> f32 {
    if item_size == 0 {
        return 0.0;
    }
    let root_start = scroll_offset as i128 - margin.top as i128;
    let root_end = scroll_offset as i128 + viewport_height as i128 + margin.bottom as i128;
    let item_start = item_top as i128;
    let item_end = item_start + item_size as i128;

    let overlap = root_end.min(item_end) - root_start.max(item_start);
    if overlap <= 0 {
        return 0.0;
    }
    (overlap as f64 / item_size as f64).min(1.0) as f32
}
