use crate::window::observation_margin;
use crate::{ListOptions, ObservationMargin, Overscan};

/// A lightweight, serializable snapshot of the list geometry.
///
/// Owned by the [`crate::WindowedList`]; `scroll_offset` is written by recomputation passes and
/// `item_count` only by the [`crate::GrowthCoordinator`] (seeded on attach, then grown by
/// insertion batches). Offsets and the extent are always derived, never
/// stored.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportState {
    pub scroll_offset: i64,
    pub height: u32,
    pub width: u32,
    pub item_size: u32,
    pub item_count: usize,
    pub overscan: Overscan,
}

impl ViewportState {
    pub fn from_options(options: &ListOptions) -> Self {
        Self {
            scroll_offset: 0,
            height: options.height,
            width: options.width,
            item_size: options.item_size.max(1),
            item_count: 0,
            overscan: options.overscan,
        }
    }

    /// Top offset of the item at `index`.
    pub fn item_offset(&self, index: usize) -> u64 {
        (index as u64).saturating_mul(self.item_size as u64)
    }

    /// Where the end-of-list placeholder sits: right after the last known item.
    pub fn placeholder_offset(&self) -> u64 {
        self.item_offset(self.item_count)
    }

    /// Total scrollable length, including one item slot reserved for the placeholder.
    pub fn extent(&self) -> u64 {
        self.placeholder_offset()
            .saturating_add(self.item_size as u64)
    }

    pub fn observation_margin(&self) -> ObservationMargin {
        observation_margin(self.item_size, self.overscan)
    }
}
