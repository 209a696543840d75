//! CryptoNight Kernel Constants
//!
//! Geometry of the working buffer and the fixed parameters of the
//! memory-hard loop, as laid down by CNS008 and the Monero variants.

// =============================================================================
// WORKING BUFFER GEOMETRY
// =============================================================================

/// Scratchpad size in bytes (2 MiB).
pub const SCRATCHPAD_SIZE: usize = 2 * 1024 * 1024;

/// Scratchpad size in 64-bit words.
pub const SCRATCHPAD_WORDS: usize = SCRATCHPAD_SIZE / 8;

/// Keccak-1600 state, in 64-bit lanes.
pub const STATE_WORDS: usize = 25;

/// Keccak-1600 state, in bytes.
pub const STATE_BYTES: usize = 200;

/// The 128-byte register carried through scratchpad init and fold-back,
/// in 64-bit words (eight 16-byte blocks).
pub const INIT_BLOCK_WORDS: usize = 16;

/// Expanded AES key schedule: 10 round keys of four 32-bit columns each.
pub const ROUND_KEY_COLUMNS: usize = 40;

// =============================================================================
// MEMORY-HARD LOOP
// =============================================================================

/// Iteration count of the memory-hard loop (2^19).
pub const MEMHARD_ITERATIONS: usize = 524_288;

/// Mask extracting a 16-byte-aligned scratchpad byte offset from a
/// 64-bit register. Shifting the masked value right by 3 yields a word
/// index whose block (two words) always lies inside the scratchpad.
pub const BLOCK_ADDR_MASK: u64 = 0x1f_fff0;

// =============================================================================
// AES
// =============================================================================

/// CryptoNight applies 10 full AES rounds, with no initial AddRoundKey
/// and no reduced final round.
pub const AES_ROUNDS: usize = 10;

/// AES GF(2^8) reduction polynomial: x^8 + x^4 + x^3 + x + 1
pub const GF_POLY: u8 = 0x1b;

// =============================================================================
// INPUT / OUTPUT
// =============================================================================

/// Digest size in bytes (256-bit output).
pub const DIGEST_SIZE: usize = 32;

/// Variant 1 folds input bytes 35..43 into its tweak, so it rejects
/// anything shorter than this.
pub const VARIANT1_MIN_INPUT: usize = 43;
