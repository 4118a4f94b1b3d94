use crate::key::ItemHandle;
use crate::{
    Error, GrowthComplete, GrowthCoordinator, Host, IndexRegistry, ListItem, ListOptions,
    ViewportState, VisibilityTracker, WindowRange, compute_window,
};

/// A headless windowed list.
///
/// Shows only the items near the viewport, releases items once they are scrolled past, and
/// asks the application for more items when the window runs past the known count.
///
/// The list holds no UI objects. The host drives it:
/// - `attach` once with the initial children,
/// - `on_scroll` for every scroll event, then `run_frame` when the requested frame fires,
/// - `on_intersection` when the boundary observer reports an item,
/// - `on_children_inserted` when new backing items are inserted,
/// - `teardown` when the list is removed.
///
/// Scroll events are coalesced: at most one recomputation is pending at a time, and it reads
/// the scroll offset from the host when it runs.
#[derive(Clone, Debug)]
pub struct WindowedList<H: ItemHandle> {
    options: ListOptions,
    state: ViewportState,
    registry: IndexRegistry<H>,
    tracker: VisibilityTracker,
    growth: GrowthCoordinator,

    pending_recompute: bool,
    attached: bool,
    torn_down: bool,
    recompute_passes: u64,
}

impl<H: ItemHandle> WindowedList<H> {
    pub fn new(options: ListOptions) -> Self {
        ldebug!(
            height = options.height,
            item_size = options.item_size,
            item_count = options.item_count,
            "WindowedList::new"
        );
        Self {
            state: ViewportState::from_options(&options),
            options,
            registry: IndexRegistry::new(),
            tracker: VisibilityTracker::new(),
            growth: GrowthCoordinator::new(),
            pending_recompute: false,
            attached: false,
            torn_down: false,
            recompute_passes: 0,
        }
    }

    pub fn options(&self) -> &ListOptions {
        &self.options
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    pub fn registry(&self) -> &IndexRegistry<H> {
        &self.registry
    }

    pub fn item_count(&self) -> usize {
        self.state.item_count
    }

    pub fn extent(&self) -> u64 {
        self.state.extent()
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn has_pending_recompute(&self) -> bool {
        self.pending_recompute
    }

    /// Number of recomputation passes run so far, including the initial one.
    pub fn recompute_passes(&self) -> u64 {
        self.recompute_passes
    }

    pub fn is_tracked(&self, index: usize) -> bool {
        self.tracker.is_tracked(index)
    }

    /// Currently shown indices, ascending.
    pub fn tracked_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.tracker.iter()
    }

    pub fn item(&self, index: usize) -> Result<ListItem, Error> {
        self.registry.lookup(index)?;
        Ok(ListItem {
            index,
            top: self.state.item_offset(index),
            size: self.state.item_size,
            shown: self.tracker.is_tracked(index),
        })
    }

    /// The window for the current scroll offset, as of the last recomputation.
    pub fn window(&self) -> WindowRange {
        compute_window(
            self.state.scroll_offset,
            self.state.height,
            self.state.item_size,
            self.state.overscan,
        )
    }

    /// Registers the initial children as indices `0..n`, positions them and the placeholder,
    /// then shows the first screen.
    ///
    /// Calling this twice, or after teardown, is a no-op. A duplicate child is fatal: the list
    /// tears itself down and returns the error.
    pub fn attach(
        &mut self,
        children: impl IntoIterator<Item = H>,
        host: &mut impl Host<H>,
    ) -> Result<(), Error> {
        if self.attached || self.torn_down {
            lwarn!(
                attached = self.attached,
                torn_down = self.torn_down,
                "WindowedList::attach ignored"
            );
            return Ok(());
        }

        let count = match self
            .growth
            .seed(children, &mut self.state, &mut self.registry, host)
        {
            Ok(count) => count,
            Err(err) => {
                lwarn!(%err, "WindowedList::attach failed, tearing down");
                self.teardown(host);
                return Err(err);
            }
        };
        if count != self.options.item_count {
            lwarn!(
                configured = self.options.item_count,
                actual = count,
                "WindowedList::attach: child count differs from configured item count"
            );
        }
        self.attached = true;

        self.state.scroll_offset = 0;
        let window = WindowRange::initial(self.state.height, self.state.item_size);
        ldebug!(
            item_count = self.state.item_count,
            last = window.last,
            "WindowedList::attach"
        );
        self.show_window(window, host);
        self.recompute_passes += 1;
        Ok(())
    }

    /// Handles one scroll event.
    ///
    /// Returns `false` when the event is dropped because a recomputation is already pending
    /// (it will pick up the latest offset) or the list is not live.
    pub fn on_scroll(&mut self, host: &mut impl Host<H>) -> bool {
        if self.torn_down || !self.attached || self.pending_recompute {
            return false;
        }
        self.pending_recompute = true;
        host.request_frame();
        true
    }

    /// Runs the pending recomputation. Call from the frame scheduled by `on_scroll`.
    pub fn run_frame(&mut self, host: &mut impl Host<H>) {
        if self.torn_down {
            ltrace!("WindowedList::run_frame after teardown");
            self.pending_recompute = false;
            return;
        }
        if !self.pending_recompute {
            return;
        }

        let offset = host.scroll_offset();
        self.state.scroll_offset = offset;
        let window = self.window();
        ltrace!(
            offset,
            first = window.first,
            last = window.last,
            "WindowedList::run_frame"
        );
        self.show_window(window, host);
        self.recompute_passes += 1;
        self.pending_recompute = false;
    }

    fn show_window(&mut self, window: WindowRange, host: &mut impl Host<H>) {
        if window.is_empty() {
            return;
        }
        let mut index = window.first.max(0) as usize;
        loop {
            match self.registry.lookup(index) {
                Ok(handle) => {
                    self.tracker.show(index, handle, host);
                }
                Err(Error::OutOfRange { .. }) => {
                    if let Some(missing) = window.missing(self.state.item_count) {
                        self.growth.request(missing, &self.state, host);
                    }
                    return;
                }
                Err(_) => return,
            }
            if index as u64 >= window.last as u64 {
                return;
            }
            index += 1;
        }
    }

    /// Handles a boundary notification for the item at `index`.
    ///
    /// Returns `true` if the item was released.
    pub fn on_intersection(&mut self, index: usize, ratio: f32, host: &mut impl Host<H>) -> bool {
        if self.torn_down {
            ltrace!(index, "WindowedList::on_intersection after teardown");
            return false;
        }
        let Ok(handle) = self.registry.lookup(index) else {
            lwarn!(index, "WindowedList::on_intersection: unknown index");
            return false;
        };
        let released = self.tracker.on_intersection(index, handle, ratio, host);
        if released {
            ltrace!(index, "WindowedList: released item");
        }
        released
    }

    /// Same as `on_intersection`, keyed by handle.
    pub fn on_intersection_handle(
        &mut self,
        handle: &H,
        ratio: f32,
        host: &mut impl Host<H>,
    ) -> bool {
        match self.registry.index_of(handle) {
            Some(index) => self.on_intersection(index, ratio, host),
            None => false,
        }
    }

    /// Handles one structural-change notification carrying newly inserted backing items.
    ///
    /// Returns `Ok(None)` before attach and after teardown. A duplicate handle is fatal: the list tears itself
    /// down and returns the error.
    pub fn on_children_inserted(
        &mut self,
        batch: impl IntoIterator<Item = H>,
        host: &mut impl Host<H>,
    ) -> Result<Option<GrowthComplete>, Error> {
        if self.torn_down {
            ltrace!("WindowedList::on_children_inserted after teardown");
            return Ok(None);
        }
        if !self.attached {
            lwarn!("WindowedList::on_children_inserted before attach, ignored");
            return Ok(None);
        }
        match self
            .growth
            .on_inserted(batch, &mut self.state, &mut self.registry, host)
        {
            Ok(complete) => Ok(Some(complete)),
            Err(err) => {
                lwarn!(%err, "WindowedList: growth failed, tearing down");
                self.teardown(host);
                Err(err)
            }
        }
    }

    /// Releases all observation and clears the registry and the tracked set.
    ///
    /// Every later callback into the list is ignored.
    pub fn teardown(&mut self, host: &mut impl Host<H>) {
        if self.torn_down {
            return;
        }
        ldebug!(
            item_count = self.state.item_count,
            tracked = self.tracker.len(),
            "WindowedList::teardown"
        );
        for index in self.tracker.iter() {
            if let Ok(handle) = self.registry.lookup(index) {
                host.unobserve(index, handle);
            }
        }
        host.disconnect();
        self.tracker.clear();
        self.registry.clear();
        self.growth.clear();
        self.pending_recompute = false;
        self.torn_down = true;
    }
}
