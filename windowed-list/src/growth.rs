use crate::key::ItemHandle;
use crate::{
    Error, GrowthComplete, GrowthRequest, Host, IndexRegistry, ListEvent, ViewportState,
};

/// Sole writer of the item count and the extent.
///
/// The initial children are bound through [`GrowthCoordinator::seed`] when the list attaches.
/// After that, requests are issued by the scroll path; the item source answers by inserting
/// backing items, which arrive here as one batch per structural-change notification.
#[derive(Clone, Debug, Default)]
pub struct GrowthCoordinator {
    outstanding: Option<GrowthRequest>,
}

impl GrowthCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last request that has not been answered by an insertion batch yet.
    pub fn outstanding(&self) -> Option<GrowthRequest> {
        self.outstanding
    }

    /// Emits `AddItems` for the part of `request` that is not known yet.
    ///
    /// A request that is already satisfied does no work but still emits `AddItemsFinished`, so
    /// callers waiting for completion are not starved.
    pub fn request<H>(
        &mut self,
        request: GrowthRequest,
        state: &ViewportState,
        host: &mut impl Host<H>,
    ) {
        if request.is_satisfied_by(state.item_count) {
            ltrace!(
                start = request.start,
                end = request.end,
                count = state.item_count,
                "GrowthCoordinator: request already satisfied"
            );
            host.emit(ListEvent::AddItemsFinished(self.complete(0, state)));
            return;
        }

        let request = GrowthRequest {
            start: request.start.max(state.item_count),
            end: request.end,
        };
        ldebug!(
            start = request.start,
            end = request.end,
            "GrowthCoordinator: requesting items"
        );
        self.outstanding = Some(request);
        host.emit(ListEvent::AddItems(request));
    }

    /// Binds the initial children as indices `0..n` and positions them and the placeholder.
    ///
    /// Emits no event. Returns the resulting item count.
    pub fn seed<H: ItemHandle>(
        &mut self,
        children: impl IntoIterator<Item = H>,
        state: &mut ViewportState,
        registry: &mut IndexRegistry<H>,
        host: &mut impl Host<H>,
    ) -> Result<usize, Error> {
        for (index, handle) in children.into_iter().enumerate() {
            registry.register(index, handle)?;
            let handle = registry.lookup(index)?;
            host.place(index, handle, state.item_offset(index));
        }
        state.item_count = registry.len();
        host.place_placeholder(state.placeholder_offset(), state.extent());
        Ok(state.item_count)
    }

    /// Registers a batch of newly inserted backing items, in arrival order.
    ///
    /// Each item gets the next index and is placed at its offset; then the placeholder is moved
    /// to the new end and `AddItemsFinished` is emitted. An empty batch only emits completion.
    pub fn on_inserted<H: ItemHandle>(
        &mut self,
        batch: impl IntoIterator<Item = H>,
        state: &mut ViewportState,
        registry: &mut IndexRegistry<H>,
        host: &mut impl Host<H>,
    ) -> Result<GrowthComplete, Error> {
        let mut appended = 0usize;
        for handle in batch {
            let index = registry.append(handle)?;
            state.item_count = registry.len();
            let handle = registry.lookup(index)?;
            host.place(index, handle, state.item_offset(index));
            appended += 1;
        }

        // Empty batches (e.g. attribute-only mutations) leave the outstanding request alone.
        if appended > 0 {
            if let Some(req) = self.outstanding.take() {
                if appended != req.len() {
                    lwarn!(
                        requested = req.len(),
                        appended,
                        "GrowthCoordinator: insertion batch does not match the outstanding request"
                    );
                }
            }
        }

        host.place_placeholder(state.placeholder_offset(), state.extent());
        let complete = self.complete(appended, state);
        ldebug!(
            appended,
            item_count = complete.item_count,
            extent = complete.extent,
            "GrowthCoordinator: batch registered"
        );
        host.emit(ListEvent::AddItemsFinished(complete));
        Ok(complete)
    }

    fn complete(&self, appended: usize, state: &ViewportState) -> GrowthComplete {
        GrowthComplete {
            appended,
            item_count: state.item_count,
            extent: state.extent(),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.outstanding = None;
    }
}
