//! Growth configuration for dynamic buffers.
//!
//! Fixed buffers never grow, so this only affects buffers created with
//! [`Buffer::dynamic_with_config`](crate::Buffer::dynamic_with_config).
//!
//! # Example
//!
//! ```
//! use membuf::{Buffer, GrowthConfig};
//!
//! // Start at 1 KiB, never grow past 64 KiB
//! let config = GrowthConfig::new(1024, 64 * 1024)?;
//! let mut buf = Buffer::dynamic_with_config(config);
//!
//! buf.write(b"payload")?;
//! assert_eq!(buf.capacity(), 1024);
//! # Ok::<(), membuf::BufferError>(())
//! ```

use crate::error::BufferError;

/// Default capacity of the first allocation (128 bytes).
pub const DEFAULT_INITIAL_CAPACITY: usize = 128;

/// Default growth ceiling (unbounded).
pub const DEFAULT_MAX_CAPACITY: usize = usize::MAX;

/// Controls how a dynamic buffer allocates and grows its storage.
///
/// Storage is allocated lazily on the first write that needs it. The first
/// allocation is at least `initial_capacity` bytes; after that, capacity
/// doubles until the pending write fits. Growth never exceeds
/// `max_capacity`; a write that would need more fails with
/// [`BufferError::NoRoom`].
///
/// # Example
///
/// ```
/// use membuf::GrowthConfig;
///
/// let config = GrowthConfig::default()
///     .with_initial_capacity(256)
///     .with_max_capacity(4096);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GrowthConfig {
    /// Capacity of the first allocation in bytes.
    initial_capacity: usize,

    /// Upper bound on capacity in bytes.
    max_capacity: usize,
}

impl GrowthConfig {
    /// Creates a new configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidConfig`] if:
    /// - Either capacity is zero
    /// - `initial_capacity > max_capacity`
    pub fn new(initial_capacity: usize, max_capacity: usize) -> Result<Self, BufferError> {
        let config = Self {
            initial_capacity,
            max_capacity,
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the capacity of the first allocation.
    ///
    /// Note: This does not validate the configuration. Use
    /// [`GrowthConfig::validate`] to check it.
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Sets the growth ceiling.
    ///
    /// Note: This does not validate the configuration. Use
    /// [`GrowthConfig::validate`] to check it.
    pub fn with_max_capacity(mut self, capacity: usize) -> Self {
        self.max_capacity = capacity;
        self
    }

    /// Returns the capacity of the first allocation.
    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    /// Returns the growth ceiling.
    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidConfig`] if the configuration is invalid.
    pub fn validate(&self) -> Result<(), BufferError> {
        if self.initial_capacity == 0 || self.max_capacity == 0 {
            return Err(BufferError::InvalidConfig {
                message: "capacities must be non-zero",
            });
        }

        if self.initial_capacity > self.max_capacity {
            return Err(BufferError::InvalidConfig {
                message: "initial_capacity cannot be greater than max_capacity",
            });
        }

        Ok(())
    }

    /// Computes the capacity to grow to so that `needed` bytes fit.
    ///
    /// Returns `None` if `needed` exceeds `max_capacity`.
    pub(crate) fn next_capacity(&self, current: usize, needed: usize) -> Option<usize> {
        if needed > self.max_capacity {
            return None;
        }

        let mut capacity = current.max(self.initial_capacity).min(self.max_capacity);
        while capacity < needed {
            capacity = capacity.saturating_mul(2).min(self.max_capacity);
        }
        Some(capacity)
    }
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_capacity: DEFAULT_MAX_CAPACITY,
        }
    }
}
