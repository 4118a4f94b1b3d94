use core::fmt;

/// Errors reported by the index registry and the growth path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// A lookup past the known item count.
    OutOfRange { index: usize, count: usize },
    /// An index, or the handle being bound, is already present in the registry.
    DuplicateIndex { index: usize },
    /// Registering `index` would leave a gap; the next free slot is `expected`.
    NonContiguousIndex { index: usize, expected: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { index, count } => {
                write!(f, "index {index} is out of range (item count {count})")
            }
            Self::DuplicateIndex { index } => write!(f, "index {index} is already bound"),
            Self::NonContiguousIndex { index, expected } => {
                write!(f, "index {index} would leave a gap (next index is {expected})")
            }
        }
    }
}

impl core::error::Error for Error {}
