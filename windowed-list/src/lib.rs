//! A headless windowed-list engine.
//!
//! Renders only the items of a large, ordered collection that are near the viewport, tracks
//! which of them are shown, and grows the collection lazily as the viewport approaches its end.
//!
//! The engine is split into small parts that the [`WindowedList`] orchestrates:
//! - [`compute_window`]: scroll offset → inclusive index window (with overscan)
//! - [`IndexRegistry`]: append-only index ↔ handle mapping
//! - [`VisibilityTracker`]: shown/observed set with idempotent show and release
//! - [`GrowthCoordinator`]: growth requests and insertion batches, sole writer of the extent
//!
//! It is UI-agnostic. A host layer is expected to provide (see [`Host`]):
//! - the live scroll offset and a pre-paint frame callback
//! - a render surface to attach/detach and position items on
//! - boundary (intersection) and structural-change (insertion) notifications
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod growth;
mod host;
mod key;
mod list;
mod options;
mod registry;
mod state;
mod tracker;
mod types;
mod window;

#[cfg(test)]
mod tests;

pub use error::Error;
pub use growth::GrowthCoordinator;
pub use host::Host;
pub use key::ItemHandle;
pub use list::WindowedList;
pub use options::ListOptions;
pub use registry::IndexRegistry;
pub use state::ViewportState;
pub use tracker::VisibilityTracker;
pub use types::{
    GrowthComplete, GrowthRequest, ListEvent, ListItem, ObservationMargin, Overscan, WindowRange,
};
pub use window::{compute_window, intersection_ratio, observation_margin};
