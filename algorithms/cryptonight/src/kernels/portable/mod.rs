//! Portable CryptoNight core.
//!
//! The whole pipeline lives here: the Keccak front-end, scratchpad
//! initialization ("explode"), the 2^19-iteration memory-hard loop ("mix")
//! and the scratchpad fold-back ("implode"), following the traditional
//! CryptoNight naming for the three phases. Variant differences are
//! confined to branches inside `mix`; everything else is shared.

use crate::final_hash;
use crate::kernels::constants::{
    BLOCK_ADDR_MASK, DIGEST_SIZE, MEMHARD_ITERATIONS, STATE_WORDS, VARIANT1_MIN_INPUT,
};
use crate::pool::WorkingBuffer;
use crate::types::{Error, Variant};

use self::utils::{aes_rounds, expand_key, mul128, single_round, v2_sqrt};

pub mod utils;

// =============================================================================
// PIPELINE
// =============================================================================

/// Run the full digest pipeline inside `buf`, which may hold garbage from a
/// previous run; every word read is written first.
pub(crate) fn hash(
    buf: &mut WorkingBuffer,
    data: &[u8],
    variant: Variant,
) -> Result<[u8; DIGEST_SIZE], Error> {
    keccak_absorb(&mut buf.final_state, data);

    let v1_tweak = if variant == Variant::One {
        if data.len() < VARIANT1_MIN_INPUT {
            return Err(Error::InvalidInputLength { len: data.len() });
        }
        let mut nonce = [0u8; 8];
        nonce.copy_from_slice(&data[35..43]);
        buf.final_state[24] ^ u64::from_le_bytes(nonce)
    } else {
        0
    };

    explode(buf);
    mix(buf, variant, v1_tweak);
    implode(buf);

    keccak::f1600(&mut buf.final_state);
    Ok(final_hash::final_hash(&buf.final_state))
}

/// Absorb `data` into a fresh Keccak-1600 state with the CryptoNote domain
/// separation, stored as 25 little-endian lanes.
pub(crate) fn keccak_absorb(state: &mut [u64; STATE_WORDS], data: &[u8]) {
    use digest::Digest;

    let full = sha3::Keccak256Full::digest(data);
    for (lane, bytes) in state.iter_mut().zip(full.chunks_exact(8)) {
        let mut word = [0u8; 8];
        word.copy_from_slice(bytes);
        *lane = u64::from_le_bytes(word);
    }
}

// =============================================================================
// EXPLODE: SCRATCHPAD INITIALIZATION
// =============================================================================

/// Fill the 2 MiB scratchpad by iterating AES-10 over a 128-byte register
/// seeded from the Keccak state, writing each iteration out as one
/// 128-byte stride.
pub(crate) fn explode(buf: &mut WorkingBuffer) {
    let WorkingBuffer {
        scratchpad,
        final_state,
        blocks,
        round_keys,
    } = buf;

    let seed = [final_state[0], final_state[1], final_state[2], final_state[3]];
    expand_key(&seed, round_keys);
    blocks.copy_from_slice(&final_state[8..24]);

    for stride in scratchpad.chunks_exact_mut(blocks.len()) {
        for pair in blocks.chunks_exact_mut(2) {
            let mut block = [pair[0], pair[1]];
            aes_rounds(&mut block, round_keys);
            pair.copy_from_slice(&block);
        }
        stride.copy_from_slice(blocks);
    }
}

// =============================================================================
// MIX: THE MEMORY-HARD LOOP
// =============================================================================

/// 524,288 iterations of read/mix/write over the scratchpad.
///
/// Registers `a`, `b`, `c`, `d` are 128-bit values as two little-endian
/// 64-bit words; all additions are independent wrapping adds on the two
/// halves. Variant 2 carries the previous round's `b` in `e` and threads
/// division/sqrt results from one iteration into the next.
#[allow(clippy::too_many_lines)]
pub(crate) fn mix(buf: &mut WorkingBuffer, variant: Variant, v1_tweak: u64) {
    let WorkingBuffer {
        scratchpad: pad,
        final_state: state,
        ..
    } = buf;

    let mut a = [state[0] ^ state[4], state[1] ^ state[5]];
    let mut b = [state[2] ^ state[6], state[3] ^ state[7]];
    let mut e = [0u64; 2];
    let mut div_result = 0u64;
    let mut sqrt_result = 0u64;
    if variant == Variant::Two {
        e = [state[8] ^ state[10], state[9] ^ state[11]];
        div_result = state[12];
        sqrt_result = state[13];
    }

    for _ in 0..MEMHARD_ITERATIONS {
        let addr = ((a[0] & BLOCK_ADDR_MASK) >> 3) as usize;
        let c = single_round([pad[addr], pad[addr + 1]], a);

        if variant == Variant::Two {
            // Scatter-add over the three XOR-neighbour blocks; all chunks
            // are read before the first store.
            let o0 = addr ^ 0x02;
            let o1 = addr ^ 0x04;
            let o2 = addr ^ 0x06;

            let chunk0 = [pad[o0], pad[o0 + 1]];
            let chunk1 = [pad[o1], pad[o1 + 1]];
            let chunk2 = [pad[o2], pad[o2 + 1]];

            pad[o0] = chunk2[0].wrapping_add(e[0]);
            pad[o0 + 1] = chunk2[1].wrapping_add(e[1]);
            pad[o2] = chunk1[0].wrapping_add(a[0]);
            pad[o2 + 1] = chunk1[1].wrapping_add(a[1]);
            pad[o1] = chunk0[0].wrapping_add(b[0]);
            pad[o1 + 1] = chunk0[1].wrapping_add(b[1]);
        }

        pad[addr] = b[0] ^ c[0];
        pad[addr + 1] = b[1] ^ c[1];

        if variant == Variant::One {
            // The table-free two-bit tweak; the bit expression is canonical
            // and deliberately not simplified.
            let t = pad[addr + 1] >> 24;
            let t = (((!t) & 1) << 4) | (((((!t) & 1) << 4) & t) << 1) | ((t & 32) >> 1);
            pad[addr + 1] ^= t << 24;
        }

        let addr = ((c[0] & BLOCK_ADDR_MASK) >> 3) as usize;
        let mut d = [pad[addr], pad[addr + 1]];

        if variant == Variant::Two {
            // Division step: the divisor is forced odd and >= 2^31 so the
            // quotient fits and division by zero cannot happen.
            d[0] ^= div_result ^ (sqrt_result << 32);
            let divisor = (c[0].wrapping_add(sqrt_result << 1) & 0xffff_ffff) | 0x8000_0001;
            div_result = ((c[1] / divisor) & 0xffff_ffff) | ((c[1] % divisor) << 32);
            let sqrt_input = c[0].wrapping_add(div_result);
            sqrt_result = v2_sqrt(sqrt_input);
        }

        let (mut lo, mut hi) = mul128(c[0], d[0]);

        if variant == Variant::Two {
            // Same scatter-add as above, around the second address, with the
            // multiply result folded through the first two chunks.
            let o0 = addr ^ 0x02;
            let o1 = addr ^ 0x04;
            let o2 = addr ^ 0x06;

            let mut chunk0 = [pad[o0], pad[o0 + 1]];
            let chunk1 = [pad[o1], pad[o1 + 1]];
            let chunk2 = [pad[o2], pad[o2 + 1]];

            chunk0[0] ^= hi;
            chunk0[1] ^= lo;
            hi ^= chunk1[0];
            lo ^= chunk1[1];

            pad[o0] = chunk2[0].wrapping_add(e[0]);
            pad[o0 + 1] = chunk2[1].wrapping_add(e[1]);
            pad[o2] = chunk1[0].wrapping_add(a[0]);
            pad[o2 + 1] = chunk1[1].wrapping_add(a[1]);
            pad[o1] = chunk0[0].wrapping_add(b[0]);
            pad[o1 + 1] = chunk0[1].wrapping_add(b[1]);
        }

        a[0] = a[0].wrapping_add(hi);
        a[1] = a[1].wrapping_add(lo);

        pad[addr] = a[0];
        pad[addr + 1] = a[1];

        if variant == Variant::One {
            pad[addr + 1] ^= v1_tweak;
        }

        a[0] ^= d[0];
        a[1] ^= d[1];

        if variant == Variant::Two {
            e = b;
        }
        b = c;
    }
}

// =============================================================================
// IMPLODE: SCRATCHPAD FOLD-BACK
// =============================================================================

/// Collapse the scratchpad back into the Keccak state: a rolling 128-byte
/// register is XORed into each stride, the stride is AES-10'd in place and
/// becomes the next register; the last stride replaces state words 8..24.
pub(crate) fn implode(buf: &mut WorkingBuffer) {
    let WorkingBuffer {
        scratchpad,
        final_state,
        blocks,
        round_keys,
    } = buf;

    let seed = [final_state[4], final_state[5], final_state[6], final_state[7]];
    expand_key(&seed, round_keys);

    let tmp = blocks;
    tmp.copy_from_slice(&final_state[8..24]);

    for stride in scratchpad.chunks_exact_mut(tmp.len()) {
        for (pair, prev) in stride.chunks_exact_mut(2).zip(tmp.chunks_exact(2)) {
            let mut block = [pair[0] ^ prev[0], pair[1] ^ prev[1]];
            aes_rounds(&mut block, round_keys);
            pair.copy_from_slice(&block);
        }
        tmp.copy_from_slice(stride);
    }

    final_state[8..24].copy_from_slice(tmp);
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernels::constants::SCRATCHPAD_WORDS;
    use crate::pool::WorkingBuffer;

    #[test]
    fn block_addresses_stay_in_bounds() {
        // The mask admits no address whose block, or any XOR-neighbour
        // block, could reach past the scratchpad.
        for reg in [0u64, u64::MAX, BLOCK_ADDR_MASK, !BLOCK_ADDR_MASK] {
            let addr = ((reg & BLOCK_ADDR_MASK) >> 3) as usize;
            assert!(addr + 1 < SCRATCHPAD_WORDS);
            for off in [0x02, 0x04, 0x06] {
                assert!((addr ^ off) + 1 < SCRATCHPAD_WORDS);
            }
        }
    }

    // Keccak-1600 state for the CNS008 input "de omnibus dubitandum",
    // as recorded in monero's slow-hash test data.
    const DE_OMNIBUS: &str = "6465206f6d6e69627573206475626974616e64756d";
    const DE_OMNIBUS_STATE: &str = "628ec2906870ea008e81ad1901ba731e06d4a94d5eacfef0276dbc9d91cd28602fedfb134e5a4c956bc7782b36cb71f46624ddad5b1ab6eae1e129a07bb4bdf901dbd2d1c2a23f9bfd40265df32464142eda9689364a943779b57b6b20017b14895643218b52a2ed4e18f80e0e6415900c91246951eca6049504bf275e5ce0d23dea3749ba397f6e394b7e0475c701d184b1339e7e14a5e923053cea50c49981ede41ea861bf53fb4fbd72a922ce8b57becad7cc8dc1d17f8c4555b275e27e50b840e6b8a7b4e74f";

    #[test]
    fn keccak_absorb_matches_reference_state() {
        let input = hex::decode(DE_OMNIBUS).unwrap();
        let expected = hex::decode(DE_OMNIBUS_STATE).unwrap();

        let mut state = [0u64; STATE_WORDS];
        keccak_absorb(&mut state, &input);

        let mut bytes = Vec::with_capacity(200);
        for lane in state {
            bytes.extend_from_slice(&lane.to_le_bytes());
        }
        assert_eq!(bytes, expected);
    }

    #[test]
    fn keccak_absorb_overwrites_stale_state() {
        let mut fresh = [0u64; STATE_WORDS];
        let mut stale = [u64::MAX; STATE_WORDS];
        keccak_absorb(&mut fresh, b"input");
        keccak_absorb(&mut stale, b"input");
        assert_eq!(fresh, stale);
    }

    // Four 76-byte mining blobs whose finalized states exercise all four
    // auxiliary hashes, for every variant.
    const SELECTOR_BLOBS: [&str; 4] = [
        "a8abb60b87a3492672bf9d18d4d52c4c7b3f5add25dd8cd5e5d785cd30de5f10b732ce45b8745df52a8793cb512bf777c2a7ccc0b4963e438f3fbf1678f7a8b45d0b4ddfc510beaad1f3ef29",
        "0ea37446bf6553b4abc0113e2b5b0926b859f6b9bf5a0b4395458a0a5fedb99c79ce6cbc7f0a4ae36f67b989e6042fe9e0d68a509f447d963feec27127fcf143cde83634298e0de989b4aefd",
        "c5f06fd5080e1d60b26be0d77e0a56ef6cfb3bc72dc57b08b6540165e12022f2265e4be2496c101b8c43cbd5bd1e7c61d86ee2478c4644c31a05b75f858b2a6855b05fe4c8c3ac521e3fe318",
        "fc11569faee899d362b81af6d3dc296934d3983c7f2793033ff42842cbe99d5ec6ad8936618772303cd55791c6ca547aa9e35e83d08a58a190e55d7e3f31c3d8ad1203ddd636f1525d5d4a36",
    ];

    #[test]
    fn selector_reaches_all_four_hashes() {
        let mut buf = WorkingBuffer::new_boxed();
        let mut seen = [false; 4];

        for blob in SELECTOR_BLOBS {
            let data = hex::decode(blob).unwrap();
            keccak_absorb(&mut buf.final_state, &data);
            explode(&mut buf);
            mix(&mut buf, Variant::Zero, 0);
            implode(&mut buf);
            keccak::f1600(&mut buf.final_state);
            seen[(buf.final_state[0] & 0x03) as usize] = true;
        }

        assert_eq!(seen, [true; 4], "blobs must cover every selector value");
    }
}
