use thiserror::Error;

pub type Result<T> = std::result::Result<T, MutBufError>;

/// Error type for fallible buffer operations
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum MutBufError {
    /// The allocation strategy refused to provide the requested block
    #[error("Allocation failure: could not obtain {requested} bytes")]
    AllocationFailure {
        /// Total number of bytes requested from the allocator
        requested: usize,
    },
    /// A parameter is outside the domain of the operation
    #[error("Argument out of range")]
    OutOfRange,
}

impl MutBufError {
    /// The status code this error is recorded as.
    #[must_use]
    pub fn status(&self) -> Status {
        match self {
            MutBufError::AllocationFailure { .. } => Status::AllocationFailure,
            MutBufError::OutOfRange => Status::OutOfRange,
        }
    }
}

/// Result code of the most recent mutating operation on a buffer.
///
/// The set is closed: no status values other than these three exist.
/// The code is sticky, staying in place until the next mutating
/// operation overwrites it.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Status {
    /// The last operation completed
    Ok,
    /// The allocation strategy could not provide a block; the buffer
    /// content was left untouched
    AllocationFailure,
    /// A parameter was outside the domain of the operation; detected
    /// before any mutation
    OutOfRange,
}

impl Status {
    /// Human-readable message for the status code.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Status::Ok => "ok",
            Status::AllocationFailure => "allocation failure",
            Status::OutOfRange => "out of range",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}
