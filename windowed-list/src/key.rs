#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(feature = "std")]
pub(crate) type HandleIndexMap<H> = HashMap<H, usize>;
#[cfg(not(feature = "std"))]
pub(crate) type HandleIndexMap<H> = BTreeMap<H, usize>;

/// Bound for opaque item handles stored in the [`crate::IndexRegistry`].
///
/// Handles are usually cheap host references (node ids, `Rc`s, interned keys). The registry
/// keeps a reverse map from handle to index, so the handle must be hashable under `std` and
/// ordered without it.
#[cfg(feature = "std")]
pub trait ItemHandle: Clone + core::hash::Hash + Eq {}
#[cfg(feature = "std")]
impl<H: Clone + core::hash::Hash + Eq> ItemHandle for H {}

#[cfg(not(feature = "std"))]
pub trait ItemHandle: Clone + Ord {}
#[cfg(not(feature = "std"))]
impl<H: Clone + Ord> ItemHandle for H {}
