//! Error types for membuf.
//!
//! Two classes of failure are kept apart:
//!
//! - boundary conditions ([`BufferError::Underflow`], [`BufferError::Unterminated`],
//!   [`BufferError::ReadOnly`], [`BufferError::NoRoom`]) are ordinary control flow,
//!   and the buffer is left exactly as it was;
//! - [`BufferError::AllocationFailed`] means growable storage could not be
//!   obtained from the allocator.

use std::collections::TryReserveError;
use std::fmt;

/// Errors returned by [`Buffer`](crate::Buffer) operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// Fewer bytes are available for reading than were requested.
    Underflow {
        /// Bytes the caller asked for.
        requested: usize,
        /// Bytes left between the read and write cursors.
        available: usize,
    },

    /// No NUL terminator was found in the unread region.
    Unterminated {
        /// Bytes that were scanned.
        available: usize,
    },

    /// The buffer wraps existing data for reading only.
    ReadOnly,

    /// The write does not fit and the storage cannot grow far enough.
    NoRoom {
        /// Bytes the caller tried to write.
        requested: usize,
        /// Bytes that could still be written without growing.
        available: usize,
    },

    /// Growing the storage failed in the allocator.
    AllocationFailed {
        /// Total capacity that was requested.
        requested: usize,
        /// Why the reservation was refused.
        source: TryReserveError,
    },

    /// Invalid configuration parameter.
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },
}

impl BufferError {
    /// Returns true for resource exhaustion, which must not be treated as
    /// an ordinary "no room" result.
    pub fn is_fatal(&self) -> bool {
        matches!(self, BufferError::AllocationFailed { .. })
    }

    /// Returns true for expected, recoverable bounds failures.
    ///
    /// Disjoint from [`is_fatal`](Self::is_fatal) but not its complement:
    /// [`BufferError::InvalidConfig`] is neither.
    pub fn is_boundary(&self) -> bool {
        matches!(
            self,
            BufferError::Underflow { .. }
                | BufferError::Unterminated { .. }
                | BufferError::ReadOnly
                | BufferError::NoRoom { .. }
        )
    }
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::Underflow {
                requested,
                available,
            } => write!(
                f,
                "buffer underflow: requested {} bytes, {} available",
                requested, available
            ),
            BufferError::Unterminated { available } => {
                write!(f, "unterminated string in {} unread bytes", available)
            }
            BufferError::ReadOnly => write!(f, "buffer is read-only"),
            BufferError::NoRoom {
                requested,
                available,
            } => write!(
                f,
                "no room: requested {} bytes, {} available",
                requested, available
            ),
            BufferError::AllocationFailed { requested, source } => {
                write!(f, "allocation of {} bytes failed: {}", requested, source)
            }
            BufferError::InvalidConfig { message } => {
                write!(f, "invalid config: {}", message)
            }
        }
    }
}

impl std::error::Error for BufferError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BufferError::AllocationFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BufferError>;
