//! # CryptoNight
//!
//! Pure-Rust implementation of the CryptoNight memory-hard proof-of-work
//! digest ([CNS008]), covering variants 0, 1 (the Monero v7 tweak) and
//! 2 (the v8 shuffle and integer-math hardening).
//!
//! Every call derives a 2 MiB scratchpad from the Keccak-1600 state of the
//! input, churns it through 2^19 iterations of an AES-based mixing loop,
//! folds it back into the state and hands the result to one of four
//! auxiliary hashes (BLAKE-256, Groestl-256, JH-256, Skein-512-256)
//! selected by two state bits. Working buffers are pooled and recycled
//! across calls.
//!
//! # Usage
//! ```rust
//! use cryptonight::{sum, verify, Hasher, Variant};
//!
//! // 1. One-shot hashing
//! let digest = sum(b"This is a test", Variant::Zero)?;
//!
//! // 2. Digest verification (constant-time)
//! assert!(verify(b"This is a test", Variant::Zero, &digest)?);
//!
//! // 3. Repeated hashing over a private buffer pool
//! let hasher = Hasher::new(Variant::Two);
//! let first = hasher.sum(b"payload one")?;
//! let second = hasher.sum(b"payload two")?;
//! assert_ne!(first, second);
//! # Ok::<(), cryptonight::Error>(())
//! ```
//!
//! [CNS008]: https://cryptonote.org/cns/cns008.txt

// =============================================================================
// MODULES
// =============================================================================

mod final_hash;
mod hasher;
// Re-export internal kernels for benchmarking/testing if needed, but hide from docs
#[doc(hidden)]
pub mod kernels; // Public for test/bench use only
mod oneshot;
mod pool;
mod types;

// =============================================================================
// EXPORTS
// =============================================================================

#[cfg(feature = "digest-trait")]
pub use digest;
#[cfg(feature = "digest-trait")]
pub use hasher::CryptoNight;
pub use hasher::Hasher;
pub use kernels::constants::DIGEST_SIZE;
pub use oneshot::{sum, sum_with, verify};
pub use pool::{BufferPool, WorkingBuffer};
pub use types::{Error, Variant};
