use alloc::vec::Vec;

use crate::key::{HandleIndexMap, ItemHandle};
use crate::Error;

/// Append-only, bidirectional mapping between logical indices and item handles.
///
/// Keys are always exactly `0..len()`: indices are only ever bound at the end, and nothing is
/// removed except by [`IndexRegistry::clear`] on teardown.
#[derive(Clone, Debug)]
pub struct IndexRegistry<H: ItemHandle> {
    handles: Vec<H>,
    indices: HandleIndexMap<H>,
}

impl<H: ItemHandle> Default for IndexRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ItemHandle> IndexRegistry<H> {
    pub fn new() -> Self {
        Self {
            handles: Vec::new(),
            indices: HandleIndexMap::<H>::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Binds `handle` to `index`.
    ///
    /// `index` must be the next free slot. Rebinding a known index, or binding a handle that is
    /// already registered, fails with [`Error::DuplicateIndex`].
    pub fn register(&mut self, index: usize, handle: H) -> Result<(), Error> {
        let expected = self.handles.len();
        if index < expected {
            return Err(Error::DuplicateIndex { index });
        }
        if index > expected {
            return Err(Error::NonContiguousIndex { index, expected });
        }
        if let Some(&bound) = self.indices.get(&handle) {
            return Err(Error::DuplicateIndex { index: bound });
        }
        self.indices.insert(handle.clone(), index);
        self.handles.push(handle);
        Ok(())
    }

    /// Binds `handle` to the next index and returns it.
    pub fn append(&mut self, handle: H) -> Result<usize, Error> {
        let index = self.handles.len();
        self.register(index, handle)?;
        Ok(index)
    }

    pub fn lookup(&self, index: usize) -> Result<&H, Error> {
        self.handles.get(index).ok_or(Error::OutOfRange {
            index,
            count: self.handles.len(),
        })
    }

    pub fn index_of(&self, handle: &H) -> Option<usize> {
        self.indices.get(handle).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &H)> {
        self.handles.iter().enumerate()
    }

    pub(crate) fn clear(&mut self) {
        self.handles.clear();
        self.indices.clear();
    }
}
