use alloc::vec::Vec;

use windowed_list::{Error, GrowthComplete, ItemHandle, ListOptions, WindowedList};

use crate::SimHost;
use crate::components::{
    ComponentRegistry, ComponentRole, PLACEHOLDER_TAG, define_list_components,
};

/// What one [`Driver::tick`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Whether a pending recomputation ran in this frame.
    pub recomputed: bool,
    /// How many items were released by boundary exits after the frame.
    pub released: usize,
}

/// A framework-neutral driver that wraps a [`WindowedList`] and its [`SimHost`].
///
/// Adapters (and tests) drive it the way a UI event loop would:
/// - `on_scroll(offset)` for each scroll event
/// - `tick()` once per frame: runs the pending recomputation, then delivers boundary exits
/// - `insert(batch)` or `serve_growth(source)` when the application appends items
#[derive(Clone, Debug)]
pub struct Driver<H: ItemHandle> {
    list: WindowedList<H>,
    host: SimHost<H>,
}

impl<H: ItemHandle> Driver<H> {
    pub fn new(options: ListOptions) -> Self {
        Self {
            list: WindowedList::new(options),
            host: SimHost::new(),
        }
    }

    /// Same as `new`, defining the list components in `components` first if needed.
    ///
    /// The host renders the placeholder with whatever is defined under [`PLACEHOLDER_TAG`],
    /// which may be a definition made earlier by another component.
    pub fn with_components(
        options: ListOptions,
        components: &mut ComponentRegistry<ComponentRole>,
    ) -> Self {
        define_list_components(components);
        let mut host = SimHost::new();
        if let Some(role) = components.get(PLACEHOLDER_TAG).copied() {
            host = host.with_placeholder_role(role);
        }
        adebug!(placeholder = ?host.placeholder_role(), "Driver::with_components");
        Self {
            list: WindowedList::new(options),
            host,
        }
    }

    pub fn from_parts(list: WindowedList<H>, host: SimHost<H>) -> Self {
        Self { list, host }
    }

    pub fn list(&self) -> &WindowedList<H> {
        &self.list
    }

    pub fn host(&self) -> &SimHost<H> {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut SimHost<H> {
        &mut self.host
    }

    pub fn into_parts(self) -> (WindowedList<H>, SimHost<H>) {
        (self.list, self.host)
    }

    /// Attaches the list with its initial children and renders the first screen.
    pub fn attach(&mut self, children: impl IntoIterator<Item = H>) -> Result<(), Error> {
        self.list.attach(children, &mut self.host)
    }

    /// Call this when the UI reports a scroll (e.g. wheel/drag).
    ///
    /// The offset is clamped to the scrollable extent. Returns `false` if the event was
    /// coalesced into an already pending frame.
    pub fn on_scroll(&mut self, offset: i64) -> bool {
        let height = self.list.state().height;
        self.host.set_scroll_offset_clamped(offset, height);
        self.list.on_scroll(&mut self.host)
    }

    /// Advances one frame.
    pub fn tick(&mut self) -> FrameReport {
        let mut report = FrameReport::default();
        if self.host.take_frame_request() {
            let before = self.list.recompute_passes();
            self.list.run_frame(&mut self.host);
            report.recomputed = self.list.recompute_passes() > before;
        }

        let exits = self.host.boundary_exits(self.list.state());
        for index in exits {
            if self.list.on_intersection(index, 0.0, &mut self.host) {
                report.released += 1;
            }
        }
        if report.recomputed || report.released > 0 {
            adebug!(
                recomputed = report.recomputed,
                released = report.released,
                "Driver::tick"
            );
        }
        report
    }

    /// Delivers one insertion batch.
    pub fn insert(
        &mut self,
        batch: impl IntoIterator<Item = H>,
    ) -> Result<Option<GrowthComplete>, Error> {
        self.list.on_children_inserted(batch, &mut self.host)
    }

    /// Answers the queued growth requests from `source`, as one insertion batch.
    ///
    /// `source(i)` must return the handle for index `i`. Only indices past the current count
    /// are generated, so repeated requests for the same gap insert each item once. Returns
    /// `Ok(None)` if nothing was requested.
    pub fn serve_growth(
        &mut self,
        mut source: impl FnMut(usize) -> H,
    ) -> Result<Option<GrowthComplete>, Error> {
        let requests = self.host.take_growth_requests();
        let Some(end) = requests.iter().map(|r| r.end).max() else {
            return Ok(None);
        };
        let start = self.list.item_count();
        if requests.len() > 1 {
            adebug!(
                merged = requests.len(),
                start,
                end,
                "Driver::serve_growth: merging queued requests"
            );
        }
        if end < start {
            adebug!(start, end, "Driver::serve_growth: requests already satisfied");
        }
        let batch: Vec<H> = (start..=end).map(&mut source).collect();
        match self.insert(batch) {
            Ok(done) => Ok(done),
            Err(err) => {
                awarn!(%err, "Driver::serve_growth: item source produced a bad batch");
                Err(err)
            }
        }
    }

    pub fn teardown(&mut self) {
        self.list.teardown(&mut self.host);
    }
}
