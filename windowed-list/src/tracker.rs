use alloc::collections::BTreeSet;

use crate::Host;

/// The set of items currently shown and under boundary observation.
///
/// Each index moves `Untracked -> Tracked` when shown and back to `Untracked` when the boundary
/// observer reports a zero intersection ratio. Both transitions are idempotent. Leaving the set
/// never invalidates the item; it stays in the registry and can be shown again.
#[derive(Clone, Debug, Default)]
pub struct VisibilityTracker {
    tracked: BTreeSet<usize>,
}

impl VisibilityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tracked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }

    pub fn is_tracked(&self, index: usize) -> bool {
        self.tracked.contains(&index)
    }

    /// Tracked indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.tracked.iter().copied()
    }

    /// Attaches and starts observing `handle` unless `index` is already tracked.
    ///
    /// Returns `true` if the item was newly shown.
    pub fn show<H>(&mut self, index: usize, handle: &H, host: &mut impl Host<H>) -> bool {
        if !self.tracked.insert(index) {
            return false;
        }
        host.attach(index, handle);
        host.observe(index, handle);
        true
    }

    /// Handles a boundary notification for `index`.
    ///
    /// A ratio of zero (or below) for a tracked item detaches it, stops observing it and removes
    /// it from the set. Returns `true` if the item was released.
    pub fn on_intersection<H>(
        &mut self,
        index: usize,
        handle: &H,
        ratio: f32,
        host: &mut impl Host<H>,
    ) -> bool {
        if ratio > 0.0 {
            return false;
        }
        if !self.tracked.remove(&index) {
            return false;
        }
        host.detach(index, handle);
        host.unobserve(index, handle);
        true
    }

    pub(crate) fn clear(&mut self) {
        self.tracked.clear();
    }
}
