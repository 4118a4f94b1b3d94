use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;

use windowed_list::{GrowthRequest, Host, ListEvent, ViewportState, intersection_ratio};

use crate::ComponentRole;

/// Where the end-of-list placeholder currently sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placeholder {
    pub top: u64,
    pub extent: u64,
}

/// A deterministic, in-memory host.
///
/// Stands in for a real UI toolkit: it stores the scroll offset, remembers whether a frame was
/// requested, keeps the attached and observed sets, item positions and the placeholder, and
/// queues emitted events. Boundary exits are computed geometrically with
/// [`windowed_list::intersection_ratio`].
#[derive(Clone, Debug)]
pub struct SimHost<H> {
    scroll_offset: i64,
    frame_requested: bool,
    frames_requested: u64,
    attached: BTreeMap<usize, H>,
    observed: BTreeSet<usize>,
    positions: BTreeMap<usize, u64>,
    placeholder: Option<Placeholder>,
    events: Vec<ListEvent>,
    attach_calls: u64,
    disconnected: bool,
    placeholder_role: Option<ComponentRole>,
}

impl<H> Default for SimHost<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> SimHost<H> {
    pub fn new() -> Self {
        Self {
            scroll_offset: 0,
            frame_requested: false,
            frames_requested: 0,
            attached: BTreeMap::new(),
            observed: BTreeSet::new(),
            positions: BTreeMap::new(),
            placeholder: None,
            events: Vec::new(),
            attach_calls: 0,
            disconnected: false,
            placeholder_role: None,
        }
    }

    /// Renders the placeholder with a component defined under `role`.
    pub fn with_placeholder_role(mut self, role: ComponentRole) -> Self {
        self.placeholder_role = Some(role);
        self
    }

    /// The component the placeholder is rendered with, if one was resolved.
    pub fn placeholder_role(&self) -> Option<ComponentRole> {
        self.placeholder_role
    }

    pub fn set_scroll_offset(&mut self, offset: i64) {
        self.scroll_offset = offset;
    }

    /// Sets the scroll offset, clamped to `0 ..= extent - viewport_height` like a real scroll
    /// container. Returns the applied offset.
    pub fn set_scroll_offset_clamped(&mut self, offset: i64, viewport_height: u32) -> i64 {
        let extent = self.placeholder.map(|p| p.extent).unwrap_or(0);
        let max = extent.saturating_sub(viewport_height as u64) as i64;
        self.scroll_offset = offset.clamp(0, max.max(0));
        self.scroll_offset
    }

    /// Returns `true` (once) if a frame was requested since the last call.
    pub fn take_frame_request(&mut self) -> bool {
        core::mem::replace(&mut self.frame_requested, false)
    }

    pub fn frames_requested(&self) -> u64 {
        self.frames_requested
    }

    pub fn attach_calls(&self) -> u64 {
        self.attach_calls
    }

    pub fn is_disconnected(&self) -> bool {
        self.disconnected
    }

    pub fn is_attached(&self, index: usize) -> bool {
        self.attached.contains_key(&index)
    }

    pub fn attached_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.attached.keys().copied()
    }

    pub fn is_observed(&self, index: usize) -> bool {
        self.observed.contains(&index)
    }

    pub fn position(&self, index: usize) -> Option<u64> {
        self.positions.get(&index).copied()
    }

    pub fn placeholder(&self) -> Option<Placeholder> {
        self.placeholder
    }

    pub fn events(&self) -> &[ListEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<ListEvent> {
        core::mem::take(&mut self.events)
    }

    /// Removes queued `AddItems` events and returns their requests, keeping other events.
    pub fn take_growth_requests(&mut self) -> Vec<GrowthRequest> {
        let mut requests = Vec::new();
        self.events.retain(|e| match e {
            ListEvent::AddItems(req) => {
                requests.push(*req);
                false
            }
            ListEvent::AddItemsFinished(_) => true,
        });
        requests
    }

    /// Observed items whose overlap with the observation region has dropped to zero.
    ///
    /// Uses the geometry in `state` (height, item size, overscan) and this host's own scroll
    /// offset, the way a boundary observer rooted at the scroll container would.
    pub fn boundary_exits(&self, state: &ViewportState) -> Vec<usize> {
        let margin = state.observation_margin();
        self.observed
            .iter()
            .copied()
            .filter(|index| {
                let top = self
                    .positions
                    .get(index)
                    .copied()
                    .unwrap_or_else(|| state.item_offset(*index));
                intersection_ratio(
                    top,
                    state.item_size,
                    self.scroll_offset,
                    state.height,
                    margin,
                ) <= 0.0
            })
            .collect()
    }
}

impl<H: Clone> Host<H> for SimHost<H> {
    fn scroll_offset(&self) -> i64 {
        self.scroll_offset
    }

    fn request_frame(&mut self) {
        self.frame_requested = true;
        self.frames_requested += 1;
    }

    fn attach(&mut self, index: usize, handle: &H) {
        self.attach_calls += 1;
        self.attached.insert(index, handle.clone());
    }

    fn detach(&mut self, index: usize, _handle: &H) {
        self.attached.remove(&index);
    }

    fn observe(&mut self, index: usize, _handle: &H) {
        self.observed.insert(index);
    }

    fn unobserve(&mut self, index: usize, _handle: &H) {
        self.observed.remove(&index);
    }

    fn place(&mut self, index: usize, _handle: &H, top: u64) {
        self.positions.insert(index, top);
    }

    fn place_placeholder(&mut self, top: u64, extent: u64) {
        self.placeholder = Some(Placeholder { top, extent });
    }

    fn emit(&mut self, event: ListEvent) {
        self.events.push(event);
    }

    fn disconnect(&mut self) {
        // A frame that was already requested still fires; the list ignores it.
        self.observed.clear();
        self.disconnected = true;
    }
}
