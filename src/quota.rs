//! Resource ceilings for untrusted input.
//!
//! A length field in a hostile document must never drive an allocation
//! before the requested size is checked, or a few bytes of crafted input
//! become a memory-exhaustion attack. Every allocation whose size comes
//! from the document (a chunk payload, a buffer payload) and the buffer
//! collection itself are gated through a [`ReadQuotas`] value.

use crate::error::{Error, Result};

/// Explicit "no limit" sentinel for a quota bound.
///
/// A bound of zero authorizes nothing; it is not a disabled check. Use
/// this sentinel to disable a bound instead.
pub const UNLIMITED: usize = usize::MAX;

/// Upper bounds applied while decoding.
///
/// Both bounds are absolute ceilings, fixed at construction. A bound of
/// zero authorizes zero bytes or zero buffers, rejecting effectively all
/// input; [`UNLIMITED`] is the distinct sentinel for "no bound".
///
/// The value is `Copy` and holds no mutable state, so one configuration
/// may back any number of concurrent decode operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadQuotas {
    /// Largest single allocation, in bytes, that a declared size may
    /// drive.
    pub max_single_allocation: usize,
    /// Largest number of buffers a document may declare.
    pub max_buffer_count: usize,
}

impl Default for ReadQuotas {
    fn default() -> Self {
        ReadQuotas {
            max_single_allocation: 1 << 25, // 32 MiB
            max_buffer_count: 8,
        }
    }
}

impl ReadQuotas {
    /// Check a declared size before allocating storage for it. On failure
    /// no allocation has been attempted.
    pub fn check_allocation(&self, step: &'static str, requested: usize) -> Result<()> {
        if requested > self.max_single_allocation {
            return Err(Error::QuotaExceeded {
                step,
                requested,
                max: self.max_single_allocation,
            });
        }
        Ok(())
    }

    /// Check the buffer collection's length before iterating it.
    pub fn check_buffer_count(&self, count: usize) -> Result<()> {
        if count > self.max_buffer_count {
            return Err(Error::QuotaExceeded {
                step: "buffer count",
                requested: count,
                max: self.max_buffer_count,
            });
        }
        Ok(())
    }
}
