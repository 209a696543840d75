//! Auxiliary hash dispatch.
//!
//! The two low bits of the finalized Keccak state pick one of four 256-bit
//! hashes; the message is the full 200-byte state in little-endian lane
//! order. The table order (BLAKE, Groestl, JH, Skein) is fixed by the
//! CryptoNote protocol and must never be reordered.

use crate::kernels::constants::{DIGEST_SIZE, STATE_BYTES, STATE_WORDS};

pub(crate) fn final_hash(state: &[u64; STATE_WORDS]) -> [u8; DIGEST_SIZE] {
    let bytes = state_bytes(state);
    match state[0] & 0x03 {
        0 => blake256(&bytes),
        1 => groestl256(&bytes),
        2 => jh256(&bytes),
        _ => skein256(&bytes),
    }
}

/// Serialize the Keccak state for absorption into an auxiliary hash.
fn state_bytes(state: &[u64; STATE_WORDS]) -> [u8; STATE_BYTES] {
    let mut out = [0u8; STATE_BYTES];
    for (chunk, lane) in out.chunks_exact_mut(8).zip(state) {
        chunk.copy_from_slice(&lane.to_le_bytes());
    }
    out
}

// Each adapter funnels through `copy_out`, whose slice copy dies loudly if
// a backend ever produces anything other than 32 bytes.
fn copy_out(digest: &[u8]) -> [u8; DIGEST_SIZE] {
    let mut out = [0u8; DIGEST_SIZE];
    out.copy_from_slice(digest);
    out
}

fn blake256(bytes: &[u8; STATE_BYTES]) -> [u8; DIGEST_SIZE] {
    use blake_hash::digest::Digest;
    copy_out(blake_hash::Blake256::digest(bytes).as_slice())
}

fn groestl256(bytes: &[u8; STATE_BYTES]) -> [u8; DIGEST_SIZE] {
    use digest::Digest;
    copy_out(groestl::Groestl256::digest(bytes).as_slice())
}

fn jh256(bytes: &[u8; STATE_BYTES]) -> [u8; DIGEST_SIZE] {
    use digest::Digest;
    copy_out(jh::Jh256::digest(bytes).as_slice())
}

// CryptoNight's "Skein-256" is Skein-512 truncated to a 256-bit output.
fn skein256(bytes: &[u8; STATE_BYTES]) -> [u8; DIGEST_SIZE] {
    use digest::consts::U32;
    use digest::Digest;
    copy_out(skein::Skein512::<U32>::digest(bytes).as_slice())
}
