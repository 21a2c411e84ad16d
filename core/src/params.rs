//! SFMT-19937 parameter set
//!
//! Compile-time constants of the generator: state geometry, recurrence
//! shifts and masks, and the parity vector used by period certification.
//! Pure data, no behavior. The period of the generator is 2^MEXP - 1.

/// Mersenne exponent. The generator period is 2^19937 - 1.
pub(crate) const MEXP: usize = 19937;

/// Number of 128-bit words in the internal state array.
pub(crate) const N: usize = MEXP / 128 + 1;

/// Number of 32-bit words in the internal state array.
pub(crate) const N32: usize = N * 4;

/// Number of 64-bit words in the internal state array.
pub(crate) const N64: usize = N * 2;

/// Pick-up position of the recurrence (in 128-bit words).
pub(crate) const POS1: usize = 122;

/// Per-lane left shift applied to operand `d` (bits).
pub(crate) const SL1: u32 = 18;

/// Whole-word left shift applied to operand `a` (bytes).
pub(crate) const SL2: usize = 1;

/// Per-lane right shift applied to operand `b` (bits).
pub(crate) const SR1: u32 = 11;

/// Whole-word right shift applied to operand `c` (bytes).
pub(crate) const SR2: usize = 1;

/// Per-lane AND mask applied to the shifted `b` operand.
pub(crate) const MSK: [u32; 4] = [0xdfffffef, 0xddfecb7f, 0xbffaffff, 0xbffffff6];

/// Parity check vector for period certification.
pub(crate) const PARITY: [u32; 4] = [0x00000001, 0x00000000, 0x00000000, 0x13c9e684];

/// Identification string: word size, exponent, and recurrence parameters.
pub(crate) const IDSTR: &str = "SFMT-19937:122-18-1-11-1:dfffffef-ddfecb7f-bffaffff-bffffff6";
