//! CryptoNight kernels.
//!
//! A single portable implementation; the scratchpad access pattern is the
//! whole point of the algorithm, so there is no fast path to dispatch to.

pub mod constants;
pub mod portable;
