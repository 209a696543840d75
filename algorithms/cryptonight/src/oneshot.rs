//! Public API Layer
//!
use subtle::ConstantTimeEq;

use crate::kernels::constants::DIGEST_SIZE;
use crate::kernels::portable;
use crate::pool::{self, BufferPool};
use crate::types::{Error, Variant};

// =============================================================================
// ONE-SHOT HASHING
// =============================================================================

/// Compute the CryptoNight digest of `data`.
///
/// The working buffer is drawn from a process-wide pool; use [`sum_with`]
/// or a [`crate::Hasher`] to control pooling explicitly. The call runs to
/// completion on the calling thread and touches the full 2 MiB scratchpad.
///
/// # Errors
/// [`Error::InvalidInputLength`] if `variant` is [`Variant::One`] and
/// `data` is shorter than 43 bytes.
///
/// # Example
/// ```rust
/// use cryptonight::{sum, Variant};
///
/// let digest = sum(b"This is a test", Variant::Zero)?;
/// assert_eq!(
///     hex::encode(digest),
///     "a084f01d1437a09c6985401b60d43554ae105802c5f5d8a9b3253649c0be6605",
/// );
/// # Ok::<(), cryptonight::Error>(())
/// ```
pub fn sum(data: &[u8], variant: Variant) -> Result<[u8; DIGEST_SIZE], Error> {
    sum_with(pool::shared(), data, variant)
}

/// Compute the CryptoNight digest of `data`, drawing the working buffer
/// from a caller-owned pool.
///
/// # Errors
/// [`Error::InvalidInputLength`] under the same conditions as [`sum`].
pub fn sum_with(
    pool: &BufferPool,
    data: &[u8],
    variant: Variant,
) -> Result<[u8; DIGEST_SIZE], Error> {
    let mut buf = pool.acquire();
    let result = portable::hash(&mut buf, data, variant);
    pool.release(buf);
    result
}

// =============================================================================
// VERIFICATION
// =============================================================================

/// Recompute the digest of `data` and compare it against `expected` in
/// constant time.
///
/// Use for: share validation, block verification.
///
/// # Errors
/// [`Error::InvalidInputLength`] under the same conditions as [`sum`].
pub fn verify(
    data: &[u8],
    variant: Variant,
    expected: &[u8; DIGEST_SIZE],
) -> Result<bool, Error> {
    let computed = sum(data, variant)?;
    Ok(computed.ct_eq(expected).into())
}
