use thiserror::Error;

/// A specialized [`Result`](core::result::Result) type for `listmap`
/// operations.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// An error returned by a [`ListMap`](crate::ListMap) operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// The requested key is not in the map.
    #[error("key not found")]
    KeyNotFound,

    /// A copy was asked to start past the end of its destination.
    #[error("offset {offset} is out of bounds for a destination of length {len}")]
    OffsetOutOfBounds {
        /// The requested starting offset.
        offset: usize,
        /// The length of the destination.
        len: usize,
    },

    /// A copy destination has fewer free slots than the map has entries.
    #[error("destination has room for {available} entries but {required} are needed")]
    InsufficientCapacity {
        /// The number of entries to copy.
        required: usize,
        /// The number of slots after the starting offset.
        available: usize,
    },
}

impl Error {
    /// Returns `true` if this error was caused by an invalid argument rather
    /// than by the state of the map.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Error::OffsetOutOfBounds { .. } | Error::InsufficientCapacity { .. }
        )
    }
}
