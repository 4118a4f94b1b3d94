use core::ops::RangeInclusive;

/// Extra items rendered beyond the strict visible area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Overscan {
    pub top: u32,
    pub bottom: u32,
}

impl Overscan {
    pub fn new(top: u32, bottom: u32) -> Self {
        Self { top, bottom }
    }

    pub fn total(&self) -> u64 {
        self.top as u64 + self.bottom as u64
    }
}

impl Default for Overscan {
    fn default() -> Self {
        Self { top: 1, bottom: 1 }
    }
}

/// Inclusive index window produced by [`crate::compute_window`].
///
/// Bounds are signed and unclamped: `first` goes negative for negative scroll offsets and
/// `last` can run past the known item count. Callers clamp or request growth.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowRange {
    pub first: i64,
    pub last: i64, // inclusive
}

impl WindowRange {
    /// The window shown on attachment, before any scroll: `0 ..= floor(height / item_size)`.
    pub fn initial(viewport_height: u32, item_size: u32) -> Self {
        let item_size = item_size.max(1);
        Self {
            first: 0,
            last: (viewport_height / item_size) as i64,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.last < 0 || self.first > self.last
    }

    /// The part of the window backed by known items (`< count`), if any.
    pub fn known(&self, count: usize) -> Option<RangeInclusive<usize>> {
        if self.is_empty() || count == 0 {
            return None;
        }
        let start = self.first.max(0) as u64;
        let end = (self.last as u64).min(count as u64 - 1);
        if start > end {
            return None;
        }
        Some(start as usize..=end as usize)
    }

    /// The suffix of the window that is not backed by known items.
    ///
    /// Starts at `max(count, first)` so already-known indices are never requested again.
    pub fn missing(&self, count: usize) -> Option<GrowthRequest> {
        if self.is_empty() || (self.last as u64) < count as u64 {
            return None;
        }
        let start = (self.first.max(0) as u64).max(count as u64) as usize;
        Some(GrowthRequest {
            start,
            end: self.last as usize,
        })
    }
}

/// Reserved region around the viewport used for boundary observation.
///
/// Items are released only after they leave the viewport extended by this margin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObservationMargin {
    pub top: u64,
    pub bottom: u64,
}

/// A positioned item, as seen by a rendering adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListItem {
    pub index: usize,
    /// Top offset in the content (`index * item_size`).
    pub top: u64,
    pub size: u32,
    /// Whether the item is currently attached to the render surface.
    pub shown: bool,
}

impl ListItem {
    pub fn end(&self) -> u64 {
        self.top.saturating_add(self.size as u64)
    }
}

/// A request for the item source to append backing items.
///
/// Covers the contiguous, inclusive index range `start ..= end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GrowthRequest {
    pub start: usize,
    pub end: usize, // inclusive
}

impl GrowthRequest {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start).saturating_add(1)
    }

    pub fn indices(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }

    /// `true` once every requested index is known.
    pub fn is_satisfied_by(&self, count: usize) -> bool {
        self.end < count
    }
}

/// Summary of one processed insertion batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GrowthComplete {
    /// Number of items appended by this batch (0 for a stale or empty batch).
    pub appended: usize,
    pub item_count: usize,
    pub extent: u64,
}

/// Events dispatched to the application through [`crate::Host::emit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ListEvent {
    /// `handleAddItem`: please insert backing items for these indices, in order.
    AddItems(GrowthRequest),
    /// `addItemFinish`: an insertion batch has been registered.
    AddItemsFinished(GrowthComplete),
}
