//! Mode-tagged backing storage.

use tracing::{debug, trace, warn};

use crate::config::GrowthConfig;
use crate::error::BufferError;

/// Backing bytes of a [`Buffer`](super::Buffer), tagged with its mode.
///
/// The slice length (or the zero-filled vector length) is the allocated
/// capacity. Borrowed variants are never grown or freed.
pub(crate) enum Storage<'a> {
    /// Caller-owned bytes, read only.
    FixedReader(&'a [u8]),

    /// Caller-owned bytes, writable up to the slice length.
    FixedWriter(&'a mut [u8]),

    /// Owned, growable bytes.
    Dynamic {
        data: Vec<u8>,
        config: GrowthConfig,
    },
}

impl Storage<'_> {
    pub(crate) fn dynamic(config: GrowthConfig) -> Self {
        Storage::Dynamic {
            data: Vec::new(),
            config,
        }
    }

    #[inline]
    pub(crate) fn is_reader(&self) -> bool {
        matches!(self, Storage::FixedReader(_))
    }

    #[inline]
    pub(crate) fn is_fixed(&self) -> bool {
        !matches!(self, Storage::Dynamic { .. })
    }

    /// Allocated capacity in bytes.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.as_slice().len()
    }

    #[inline]
    pub(crate) fn as_slice(&self) -> &[u8] {
        match self {
            Storage::FixedReader(data) => *data,
            Storage::FixedWriter(data) => &**data,
            Storage::Dynamic { data, .. } => data.as_slice(),
        }
    }

    /// Mutable view of the whole capacity, `None` for readers.
    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> Option<&mut [u8]> {
        match self {
            Storage::FixedReader(_) => None,
            Storage::FixedWriter(data) => Some(&mut **data),
            Storage::Dynamic { data, .. } => Some(data.as_mut_slice()),
        }
    }

    /// Grows the storage so that at least `extra` bytes fit after `write_pos`.
    ///
    /// Fixed storage always refuses, whatever room is left. On failure
    /// nothing is changed.
    pub(crate) fn make_room(&mut self, write_pos: usize, extra: usize) -> Result<(), BufferError> {
        match self {
            Storage::FixedReader(_) => Err(BufferError::ReadOnly),
            Storage::FixedWriter(data) => Err(BufferError::NoRoom {
                requested: extra,
                available: data.len() - write_pos,
            }),
            Storage::Dynamic { data, config } => {
                let current = data.len();
                let Some(needed) = write_pos.checked_add(extra) else {
                    debug!(write_pos, extra, "growth request overflows usize");
                    return Err(BufferError::NoRoom {
                        requested: extra,
                        available: current - write_pos,
                    });
                };
                if needed <= current {
                    return Ok(());
                }

                let Some(new_capacity) = config.next_capacity(current, needed) else {
                    debug!(
                        needed,
                        max_capacity = config.max_capacity(),
                        "growth refused by capacity limit"
                    );
                    return Err(BufferError::NoRoom {
                        requested: extra,
                        available: current - write_pos,
                    });
                };

                if let Err(source) = data.try_reserve_exact(new_capacity - current) {
                    warn!(new_capacity, error = %source, "buffer allocation failed");
                    return Err(BufferError::AllocationFailed {
                        requested: new_capacity,
                        source,
                    });
                }
                data.resize(new_capacity, 0);

                trace!(
                    old_capacity = current,
                    new_capacity,
                    write_pos,
                    "buffer grown"
                );
                Ok(())
            }
        }
    }

    /// Frees owned storage. Returns true if anything was released.
    pub(crate) fn release(&mut self) -> bool {
        match self {
            Storage::Dynamic { data, .. } if data.capacity() > 0 => {
                debug!(capacity = data.len(), "releasing buffer storage");
                *data = Vec::new();
                true
            }
            _ => false,
        }
    }

    pub(crate) fn mode_name(&self) -> &'static str {
        match self {
            Storage::FixedReader(_) => "FixedReader",
            Storage::FixedWriter(_) => "FixedWriter",
            Storage::Dynamic { .. } => "Dynamic",
        }
    }
}
