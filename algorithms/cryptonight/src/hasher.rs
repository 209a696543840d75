//! Reusable hashing handle.
//!
//! A [`Hasher`] pins a variant and owns its buffer pool, so repeated
//! digests recycle the same 2 MiB allocations instead of going through the
//! process-wide pool. The handle is `&self` throughout and safe to share
//! across threads.

use crate::kernels::constants::DIGEST_SIZE;
use crate::oneshot;
use crate::pool::BufferPool;
use crate::types::{Error, Variant};

// =============================================================================
// HASHER
// =============================================================================

/// A CryptoNight hasher bound to one variant, backed by its own pool.
///
/// # Example
/// ```rust
/// use cryptonight::{Hasher, Variant};
///
/// let hasher = Hasher::new(Variant::Zero);
/// let digest = hasher.sum(b"This is a test")?;
/// assert_eq!(digest.len(), 32);
/// # Ok::<(), cryptonight::Error>(())
/// ```
pub struct Hasher {
    pool: BufferPool,
    variant: Variant,
}

impl Hasher {
    /// Create a hasher with an unbounded private pool.
    #[must_use]
    pub fn new(variant: Variant) -> Self {
        Self::with_pool(variant, BufferPool::new())
    }

    /// Create a hasher around an existing pool, e.g. one with a bounded
    /// idle list.
    #[must_use]
    pub fn with_pool(variant: Variant, pool: BufferPool) -> Self {
        Self { pool, variant }
    }

    /// The variant this hasher applies.
    #[must_use]
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    /// Compute the digest of `data`.
    ///
    /// # Errors
    /// [`Error::InvalidInputLength`] under the same conditions as
    /// [`crate::sum`].
    pub fn sum(&self, data: &[u8]) -> Result<[u8; DIGEST_SIZE], Error> {
        oneshot::sum_with(&self.pool, data, self.variant)
    }
}

// =============================================================================
// DIGEST TRAIT ADAPTER
// =============================================================================

#[cfg(feature = "digest-trait")]
mod digest_impl {
    use digest::consts::U32;
    use digest::{
        FixedOutput, FixedOutputReset, HashMarker, Output, OutputSizeUser, Reset, Update,
    };

    use crate::oneshot;
    use crate::types::Variant;

    /// [`digest`]-compatible CryptoNight (variant 0).
    ///
    /// The core consumes its input whole, so this adapter buffers updates
    /// and runs the pipeline at finalize. It is fixed to variant 0, the
    /// only variant without a minimum input length; the trait has no
    /// channel for reporting one.
    ///
    /// # Example
    /// ```rust
    /// use cryptonight::digest::Digest;
    /// use cryptonight::CryptoNight;
    ///
    /// let mut hasher = CryptoNight::new();
    /// hasher.update(b"This is ");
    /// hasher.update(b"a test");
    /// let digest = hasher.finalize();
    /// assert_eq!(
    ///     hex::encode(digest),
    ///     "a084f01d1437a09c6985401b60d43554ae105802c5f5d8a9b3253649c0be6605",
    /// );
    /// ```
    #[derive(Clone, Debug, Default)]
    pub struct CryptoNight {
        buffer: Vec<u8>,
    }

    impl CryptoNight {
        fn digest_buffered(&self) -> [u8; 32] {
            #[allow(clippy::expect_used)] // variant 0 accepts any input length
            let digest = oneshot::sum(&self.buffer, Variant::Zero)
                .expect("variant 0 has no minimum input length");
            digest
        }
    }

    impl HashMarker for CryptoNight {}

    impl Update for CryptoNight {
        fn update(&mut self, data: &[u8]) {
            self.buffer.extend_from_slice(data);
        }
    }

    impl OutputSizeUser for CryptoNight {
        type OutputSize = U32;
    }

    impl FixedOutput for CryptoNight {
        fn finalize_into(self, out: &mut Output<Self>) {
            out.copy_from_slice(&self.digest_buffered());
        }
    }

    impl Reset for CryptoNight {
        fn reset(&mut self) {
            self.buffer.clear();
        }
    }

    impl FixedOutputReset for CryptoNight {
        fn finalize_into_reset(&mut self, out: &mut Output<Self>) {
            out.copy_from_slice(&self.digest_buffered());
            self.buffer.clear();
        }
    }
}

#[cfg(feature = "digest-trait")]
pub use digest_impl::CryptoNight;
