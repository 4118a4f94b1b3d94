//! Host utilities for the `windowed-list` crate.
//!
//! The `windowed-list` crate is UI-agnostic and only talks to its host through the
//! `windowed_list::Host` trait. This crate provides small, framework-neutral pieces an adapter
//! or a test usually needs:
//!
//! - [`SimHost`]: a deterministic in-memory host (frame queue, render surface, boundary
//!   observer, event queue)
//! - [`Driver`]: wraps one list and its host and exposes the UI-event entry points
//! - [`ComponentRegistry`]: register-if-absent component definitions shared by composing
//!   components
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod components;
mod driver;
mod sim;


pub use components::{
    ComponentRegistry, ComponentRole, LIST_TAG, PLACEHOLDER_TAG, define_list_components,
};
pub use driver::{Driver, FrameReport};
pub use sim::{Placeholder, SimHost};
