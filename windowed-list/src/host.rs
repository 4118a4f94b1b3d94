use crate::ListEvent;

/// The host environment a [`crate::WindowedList`] is attached to.
///
/// The engine holds no UI objects. Everything it needs from the outside world (the live scroll
/// offset, a pre-paint frame callback, a render surface and a boundary observer) is reached
/// through this trait. `H` is the opaque item handle the host uses for its nodes.
///
/// Callbacks that the host delivers back into the engine (`run_frame`, `on_intersection`,
/// `on_children_inserted`) may arrive after teardown; the engine ignores them.
pub trait Host<H> {
    /// The scroll offset at the moment of the call.
    fn scroll_offset(&self) -> i64;

    /// Schedules one call to [`crate::WindowedList::run_frame`] before the next paint.
    fn request_frame(&mut self);

    /// Attaches an item to the render surface.
    fn attach(&mut self, index: usize, handle: &H);

    /// Detaches an item from the render surface. The handle stays valid.
    fn detach(&mut self, index: usize, handle: &H);

    /// Starts boundary observation for an item.
    fn observe(&mut self, index: usize, handle: &H);

    /// Stops boundary observation for an item.
    fn unobserve(&mut self, index: usize, handle: &H);

    /// Positions an item at `top` in the content.
    fn place(&mut self, index: usize, handle: &H, top: u64);

    /// Positions the end-of-list placeholder at `top` and sizes the content to `extent`.
    fn place_placeholder(&mut self, top: u64, extent: u64);

    /// Dispatches an event to the application.
    fn emit(&mut self, event: ListEvent);

    /// Releases scroll listening, boundary observation and structural-change observation.
    fn disconnect(&mut self) {}
}
