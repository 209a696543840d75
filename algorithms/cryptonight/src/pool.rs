//! Working buffers and the free-list pool that recycles them.
//!
//! Each digest needs a shade over 2 MiB of working memory; allocating that
//! per call is legal but wasteful, so buffers are pooled. A buffer is
//! exclusively owned between `acquire` and `release`, its contents are
//! undefined on acquire, and the pipeline never reads a word it has not
//! written first, so reuse does not re-zero.

use std::alloc::{alloc_zeroed, handle_alloc_error, Layout};
use std::sync::{Mutex, OnceLock};

use crate::kernels::constants::{
    INIT_BLOCK_WORDS, ROUND_KEY_COLUMNS, SCRATCHPAD_WORDS, STATE_WORDS,
};

// =============================================================================
// WORKING BUFFER
// =============================================================================

/// The per-call working memory: 2 MiB scratchpad, Keccak state, the
/// 128-byte init/fold register and the expanded AES key schedule.
///
/// Scratchpad addressing masks register values down to 16-byte-aligned
/// offsets, so the buffer itself is kept 16-byte aligned.
#[repr(C, align(16))]
pub struct WorkingBuffer {
    pub(crate) scratchpad: [u64; SCRATCHPAD_WORDS],
    pub(crate) final_state: [u64; STATE_WORDS],
    pub(crate) blocks: [u64; INIT_BLOCK_WORDS],
    pub(crate) round_keys: [u32; ROUND_KEY_COLUMNS],
}

impl WorkingBuffer {
    /// Allocate a zeroed buffer directly on the heap. Going through
    /// `Box::new` would materialize the 2 MiB value on the stack first.
    #[allow(unsafe_code)]
    pub(crate) fn new_boxed() -> Box<Self> {
        let layout = Layout::new::<Self>();
        // SAFETY: `WorkingBuffer` is a plain aggregate of integers, so the
        // all-zero bit pattern is a valid value; `alloc_zeroed` hands us
        // exactly `layout` bytes (or null, which aborts), and `Box::from_raw`
        // takes ownership of that allocation.
        unsafe {
            let ptr = alloc_zeroed(layout).cast::<Self>();
            if ptr.is_null() {
                handle_alloc_error(layout);
            }
            Box::from_raw(ptr)
        }
    }
}

// =============================================================================
// BUFFER POOL
// =============================================================================

/// Thread-safe free-list of [`WorkingBuffer`]s.
///
/// `acquire` hands out an idle buffer or allocates a fresh one; `release`
/// returns it, dropping the buffer instead when the idle list is at
/// capacity. No ordering is established between callers: two concurrent
/// digests of the same input yield the same output regardless of which
/// buffer each one drew.
pub struct BufferPool {
    idle: Mutex<Vec<Box<WorkingBuffer>>>,
    max_idle: usize,
}

impl BufferPool {
    /// Pool whose idle list grows without bound (up to peak concurrency).
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_idle(usize::MAX)
    }

    /// Pool that keeps at most `max_idle` buffers around; buffers released
    /// beyond that are freed immediately.
    #[must_use]
    pub fn with_max_idle(max_idle: usize) -> Self {
        Self {
            idle: Mutex::new(Vec::new()),
            max_idle,
        }
    }

    /// Take a buffer out of the pool, allocating if none is idle. The
    /// contents are undefined.
    #[must_use]
    pub fn acquire(&self) -> Box<WorkingBuffer> {
        let recycled = match self.idle.lock() {
            Ok(mut idle) => idle.pop(),
            Err(poisoned) => poisoned.into_inner().pop(),
        };
        recycled.unwrap_or_else(WorkingBuffer::new_boxed)
    }

    /// Return a buffer to the pool.
    pub fn release(&self, buf: Box<WorkingBuffer>) {
        let mut idle = match self.idle.lock() {
            Ok(idle) => idle,
            Err(poisoned) => poisoned.into_inner(),
        };
        if idle.len() < self.max_idle {
            idle.push(buf);
        }
    }

    #[cfg(test)]
    fn idle_count(&self) -> usize {
        self.idle.lock().map(|idle| idle.len()).unwrap_or(0)
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide pool backing [`crate::sum`].
pub(crate) fn shared() -> &'static BufferPool {
    static SHARED: OnceLock<BufferPool> = OnceLock::new();
    SHARED.get_or_init(BufferPool::new)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_buffers_are_zeroed() {
        let buf = WorkingBuffer::new_boxed();
        assert!(buf.scratchpad.iter().all(|&w| w == 0));
        assert!(buf.final_state.iter().all(|&w| w == 0));
        assert!(buf.blocks.iter().all(|&w| w == 0));
        assert!(buf.round_keys.iter().all(|&w| w == 0));
    }

    #[test]
    fn release_recycles() {
        let pool = BufferPool::new();
        assert_eq!(pool.idle_count(), 0);

        let buf = pool.acquire();
        pool.release(buf);
        assert_eq!(pool.idle_count(), 1);

        let _buf = pool.acquire();
        assert_eq!(pool.idle_count(), 0);
    }

    #[test]
    fn bounded_pool_drops_excess() {
        let pool = BufferPool::with_max_idle(1);
        let a = pool.acquire();
        let b = pool.acquire();
        pool.release(a);
        pool.release(b);
        assert_eq!(pool.idle_count(), 1);
    }

    #[test]
    fn zero_capacity_pool_never_retains() {
        let pool = BufferPool::with_max_idle(0);
        pool.release(pool.acquire());
        assert_eq!(pool.idle_count(), 0);
    }
}
