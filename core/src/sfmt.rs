//! SFMT-19937 deterministic pseudorandom number generator
//!
//! SIMD-oriented Fast Mersenne Twister with period 2^19937 - 1. This is the
//! generator behind all simulation randomness: same seed → same sequence of
//! random numbers, bit-identical across runs and platforms.
//!
//! # Determinism
//!
//! Reproducibility is CRITICAL for:
//! - Debugging (reproduce exact simulation)
//! - Testing (verify behavior against golden vectors)
//! - Research (validate results)
//!
//! Identical seed input and identical call sequence (choice and order of
//! scalar vs. bulk draws) yield identical output words regardless of whether
//! the recurrence runs on the SSE2 or the portable scalar path.
//!
//! # Contract violations
//!
//! Wrong draw position before a bulk fill, a buffer length that is not a
//! multiple of the required granularity, or a buffer below the published
//! minimum are caller bugs, not runtime conditions. They fail fast with a
//! panic and are never reported as recoverable errors.

use crate::params::{IDSTR, N, N32, N64, PARITY, POS1};
use crate::recursion::recursion;
use crate::w128::{idxof, BlockBuffer, W128};

/// Diffusion function used by the first phase of key seeding.
#[inline]
fn func1(x: u32) -> u32 {
    (x ^ (x >> 27)).wrapping_mul(1664525)
}

/// Diffusion function used by the second phase of key seeding.
#[inline]
fn func2(x: u32) -> u32 {
    (x ^ (x >> 27)).wrapping_mul(1566083941)
}

/// Deterministic pseudorandom number generator (SFMT-19937)
///
/// A generator instance is a plain value: the fixed-size state array plus a
/// draw position. It is freely clonable and comparable, and any number of
/// instances may run on independent threads without coordination.
///
/// # Example
/// ```
/// use sfmt_core_rs::SfmtRng;
///
/// let mut rng = SfmtRng::new(12345);
/// let wide = rng.next_u64();
/// let word = rng.next_u32();
/// # let _ = (wide, word);
/// ```
#[derive(Debug, Clone)]
pub struct SfmtRng {
    /// Internal state: N words of 128 bits each.
    state: [W128; N],
    /// How many 32-bit words of the current state have been consumed by
    /// scalar draws. Always in [0, N32]; N32 means "awaiting regeneration".
    idx: usize,
}

impl SfmtRng {
    /// Create a generator from a 32-bit scalar seed.
    ///
    /// The state is expanded from the seed with the standard Mersenne
    /// Twister diffusion recurrence `s[i] = 1812433253 * (s[i-1] ^
    /// (s[i-1] >> 30)) + i` and then period-certified, so the full
    /// 2^19937 - 1 period is guaranteed for every seed.
    ///
    /// # Example
    /// ```
    /// use sfmt_core_rs::SfmtRng;
    ///
    /// let a = SfmtRng::new(1234);
    /// let b = SfmtRng::new(1234);
    /// assert_eq!(a, b);
    /// ```
    pub fn new(seed: u32) -> Self {
        let mut words = [0u32; N32];

        words[idxof(0)] = seed;
        for i in 1..N32 {
            let prev = words[idxof(i - 1)];
            words[idxof(i)] = 1812433253u32
                .wrapping_mul(prev ^ (prev >> 30))
                .wrapping_add(i as u32);
        }

        Self::finish_seed(words)
    }

    /// Create a generator from a key of 32-bit words (length may be 0).
    ///
    /// Uses the reference two-phase diffusion schedule: the state is filled
    /// with the byte pattern 0x8b, then mixed with `func1` while key words
    /// (and afterwards running indices) are injected, then mixed with a full
    /// `func2` pass. The exact write order matters; reordering the same
    /// operations would produce a different state.
    ///
    /// # Example
    /// ```
    /// use sfmt_core_rs::SfmtRng;
    ///
    /// let mut rng = SfmtRng::from_key(&[0x1234, 0x5678, 0x9abc, 0xdef0]);
    /// let _ = rng.next_u32();
    /// ```
    pub fn from_key(key: &[u32]) -> Self {
        let mut words = [0x8b8b_8b8bu32; N32];

        let lag = if N32 >= 623 {
            11
        } else if N32 >= 68 {
            7
        } else if N32 >= 39 {
            5
        } else {
            3
        };
        let mid = (N32 - lag) / 2;

        let count = usize::max(key.len() + 1, N32) - 1;

        let mut r = func1(words[idxof(0)] ^ words[idxof(mid)] ^ words[idxof(N32 - 1)]);
        words[idxof(mid)] = words[idxof(mid)].wrapping_add(r);
        r = r.wrapping_add(key.len() as u32);
        words[idxof(mid + lag)] = words[idxof(mid + lag)].wrapping_add(r);
        words[idxof(0)] = r;

        let mut i = 1usize;
        let mut j = 0usize;

        // Phase 1a: inject one key word per step while key words remain.
        while j < count && j < key.len() {
            let mut r = func1(
                words[idxof(i)]
                    ^ words[idxof((i + mid) % N32)]
                    ^ words[idxof((i + N32 - 1) % N32)],
            );
            words[idxof((i + mid) % N32)] = words[idxof((i + mid) % N32)].wrapping_add(r);
            r = r.wrapping_add(key[j]).wrapping_add(i as u32);
            words[idxof((i + mid + lag) % N32)] =
                words[idxof((i + mid + lag) % N32)].wrapping_add(r);
            words[idxof(i)] = r;
            i = (i + 1) % N32;
            j += 1;
        }

        // Phase 1b: key exhausted, inject the running index instead.
        while j < count {
            let mut r = func1(
                words[idxof(i)]
                    ^ words[idxof((i + mid) % N32)]
                    ^ words[idxof((i + N32 - 1) % N32)],
            );
            words[idxof((i + mid) % N32)] = words[idxof((i + mid) % N32)].wrapping_add(r);
            r = r.wrapping_add(i as u32);
            words[idxof((i + mid + lag) % N32)] =
                words[idxof((i + mid + lag) % N32)].wrapping_add(r);
            words[idxof(i)] = r;
            i = (i + 1) % N32;
            j += 1;
        }

        // Phase 2: one full func2 pass, XOR-combining into the state.
        for _ in 0..N32 {
            let mut r = func2(
                words[idxof(i)]
                    .wrapping_add(words[idxof((i + mid) % N32)])
                    .wrapping_add(words[idxof((i + N32 - 1) % N32)]),
            );
            words[idxof((i + mid) % N32)] ^= r;
            r = r.wrapping_sub(i as u32);
            words[idxof((i + mid + lag) % N32)] ^= r;
            words[idxof(i)] = r;
            i = (i + 1) % N32;
        }

        Self::finish_seed(words)
    }

    /// Certify the flat seeded words, pack them into 128-bit state words,
    /// and mark the state fully consumed (next draw regenerates).
    fn finish_seed(mut words: [u32; N32]) -> Self {
        period_certification(&mut words);

        let state = core::array::from_fn(|i| {
            let base = i * 4;
            W128::from_lanes([
                words[base],
                words[base + 1],
                words[base + 2],
                words[base + 3],
            ])
        });

        Self { state, idx: N32 }
    }

    /// Identification string of the parameter set (word size, exponent,
    /// recurrence constants). For diagnostics and snapshot validation.
    pub fn idstring() -> &'static str {
        IDSTR
    }

    /// Minimum length (and granularity unit ×4) for [`fill_array32`].
    ///
    /// [`fill_array32`]: SfmtRng::fill_array32
    pub fn min_array_size32() -> usize {
        N32
    }

    /// Minimum length (and granularity unit ×2) for [`fill_array64`].
    ///
    /// [`fill_array64`]: SfmtRng::fill_array64
    pub fn min_array_size64() -> usize {
        N64
    }

    /// Generate the next pseudorandom 32-bit word.
    ///
    /// # Example
    /// ```
    /// use sfmt_core_rs::SfmtRng;
    ///
    /// let mut rng = SfmtRng::new(42);
    /// let a = rng.next_u32();
    /// let b = rng.next_u32();
    /// assert_ne!(a, b);
    /// ```
    pub fn next_u32(&mut self) -> u32 {
        if self.idx >= N32 {
            self.gen_rand_all();
            self.idx = 0;
        }
        let value = self.word32(idxof(self.idx));
        self.idx += 1;
        value
    }

    /// Generate the next pseudorandom 64-bit word.
    ///
    /// Consumes two consecutive 32-bit positions of the internal state.
    ///
    /// # Panics
    /// Panics if the draw position is odd, i.e. after an odd number of
    /// [`next_u32`] calls since the last regeneration. Mixing draw widths is
    /// allowed only at 64-bit aligned positions, as in the reference
    /// implementation.
    ///
    /// [`next_u32`]: SfmtRng::next_u32
    pub fn next_u64(&mut self) -> u64 {
        assert!(
            self.idx % 2 == 0,
            "next_u64 requires a 64-bit aligned draw position (idx = {})",
            self.idx
        );
        if self.idx >= N32 {
            self.gen_rand_all();
            self.idx = 0;
        }
        let value = self.word64(self.idx / 2);
        self.idx += 2;
        value
    }

    /// Generate a random f64 in [0.0, 1.0) with 53-bit resolution.
    ///
    /// Useful for sampling from probability distributions.
    ///
    /// # Example
    /// ```
    /// use sfmt_core_rs::SfmtRng;
    ///
    /// let mut rng = SfmtRng::new(7);
    /// let p = rng.next_f64();
    /// assert!(p >= 0.0 && p < 1.0);
    /// ```
    pub fn next_f64(&mut self) -> f64 {
        let value = self.next_u64();
        (value >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Generate a random value in range [min, max).
    ///
    /// # Panics
    /// Panics if min >= max.
    ///
    /// # Example
    /// ```
    /// use sfmt_core_rs::SfmtRng;
    ///
    /// let mut rng = SfmtRng::new(12345);
    /// let v = rng.range(10, 20);
    /// assert!(v >= 10 && v < 20);
    /// ```
    pub fn range(&mut self, min: i64, max: i64) -> i64 {
        assert!(min < max, "min must be less than max");

        let value = self.next_u64();
        let range_size = (max - min) as u64;
        min + (value % range_size) as i64
    }

    /// Fill `array` with pseudorandom 32-bit words in one call.
    ///
    /// Much faster than drawing one word at a time: the recurrence runs
    /// directly into the caller buffer, using the buffer itself as a virtual
    /// extension of the state array. On return the draw position is left at
    /// "fully consumed", so scalar draws continue seamlessly from the
    /// correct point in the period.
    ///
    /// # Panics
    /// Fails fast if the generator has pending scalar draws (the state must
    /// be fully consumed, as right after seeding or a previous bulk fill),
    /// if `array.len()` is not a multiple of 4, or if it is below
    /// [`min_array_size32`].
    ///
    /// # Example
    /// ```
    /// use sfmt_core_rs::SfmtRng;
    ///
    /// let mut rng = SfmtRng::new(1234);
    /// let mut buf = vec![0u32; SfmtRng::min_array_size32()];
    /// rng.fill_array32(&mut buf);
    /// ```
    ///
    /// [`min_array_size32`]: SfmtRng::min_array_size32
    pub fn fill_array32(&mut self, array: &mut [u32]) {
        assert!(
            self.idx == N32,
            "fill_array32 requires a fully consumed state (idx = {}, expected {})",
            self.idx,
            N32
        );
        assert!(
            array.len() % 4 == 0,
            "fill_array32 buffer length must be a multiple of 4 (got {})",
            array.len()
        );
        assert!(
            array.len() >= N32,
            "fill_array32 buffer length must be at least {} (got {})",
            N32,
            array.len()
        );

        let blocks = array.len() / 4;
        self.gen_rand_array(array, blocks);
        self.idx = N32;
    }

    /// Fill `array` with pseudorandom 64-bit words in one call.
    ///
    /// Same bit stream as [`fill_array32`]: each 64-bit word is the
    /// little-endian combination of two consecutive 32-bit words.
    ///
    /// # Panics
    /// Fails fast if the generator has pending scalar draws, if
    /// `array.len()` is not a multiple of 2, or if it is below
    /// [`min_array_size64`].
    ///
    /// [`fill_array32`]: SfmtRng::fill_array32
    /// [`min_array_size64`]: SfmtRng::min_array_size64
    pub fn fill_array64(&mut self, array: &mut [u64]) {
        assert!(
            self.idx == N32,
            "fill_array64 requires a fully consumed state (idx = {}, expected {})",
            self.idx,
            N32
        );
        assert!(
            array.len() % 2 == 0,
            "fill_array64 buffer length must be a multiple of 2 (got {})",
            array.len()
        );
        assert!(
            array.len() >= N64,
            "fill_array64 buffer length must be at least {} (got {})",
            N64,
            array.len()
        );

        let blocks = array.len() / 2;
        self.gen_rand_array(array, blocks);
        self.idx = N32;
    }

    /// Advance the whole state array by one full pass, in place.
    fn gen_rand_all(&mut self) {
        let mut r1 = self.state[N - 2];
        let mut r2 = self.state[N - 1];

        for i in 0..N {
            // For i >= N - POS1 the pick-up word has already been updated in
            // this pass, which is exactly what the recurrence requires.
            let b = self.state[(i + POS1) % N];
            let r = recursion(self.state[i], b, r1, r2);
            self.state[i] = r;
            r1 = r2;
            r2 = r;
        }
    }

    /// Produce `size` 128-bit blocks of output directly into `array`.
    ///
    /// The first N blocks are computed from the state; beyond that the
    /// output buffer itself serves as the virtual state extension. The last
    /// N produced blocks are copied back into the state array so subsequent
    /// draws continue from the correct point in the period. Requires
    /// size >= N (guaranteed by the public entry points).
    fn gen_rand_array<B: BlockBuffer + ?Sized>(&mut self, array: &mut B, size: usize) {
        let mut r1 = self.state[N - 2];
        let mut r2 = self.state[N - 1];
        let mut i = 0;

        while i < N - POS1 {
            let r = recursion(self.state[i], self.state[i + POS1], r1, r2);
            array.store_block(i, r);
            r1 = r2;
            r2 = r;
            i += 1;
        }
        while i < N {
            let r = recursion(self.state[i], array.load_block(i + POS1 - N), r1, r2);
            array.store_block(i, r);
            r1 = r2;
            r2 = r;
            i += 1;
        }
        while i < size - N {
            let r = recursion(
                array.load_block(i - N),
                array.load_block(i + POS1 - N),
                r1,
                r2,
            );
            array.store_block(i, r);
            r1 = r2;
            r2 = r;
            i += 1;
        }

        let mut j = 0;
        while j < (2 * N).saturating_sub(size) {
            self.state[j] = array.load_block(j + size - N);
            j += 1;
        }
        while i < size {
            let r = recursion(
                array.load_block(i - N),
                array.load_block(i + POS1 - N),
                r1,
                r2,
            );
            array.store_block(i, r);
            r1 = r2;
            r2 = r;
            self.state[j] = r;
            j += 1;
            i += 1;
        }
    }

    /// Flat 32-bit view of the state at word index `i` (0..N32).
    #[inline]
    fn word32(&self, i: usize) -> u32 {
        self.state[i / 4].u32_lane(i % 4)
    }

    /// Flat 64-bit view of the state at word index `i` (0..N64).
    #[inline]
    fn word64(&self, i: usize) -> u64 {
        self.state[i / 2].u64_lane(i % 2)
    }

    /// Current draw position (for snapshots).
    pub(crate) fn draw_index(&self) -> usize {
        self.idx
    }

    /// Flat copy of the state as 32-bit words (for snapshots).
    pub(crate) fn state_words(&self) -> Vec<u32> {
        let mut words = Vec::with_capacity(N32);
        for block in &self.state {
            for lane in 0..4 {
                words.push(block.u32_lane(lane));
            }
        }
        words
    }

    /// Rebuild a generator from a flat state copy and draw position.
    /// Callers must have validated both (see the snapshot module).
    pub(crate) fn from_parts(words: &[u32], idx: usize) -> Self {
        debug_assert_eq!(words.len(), N32);
        debug_assert!(idx <= N32);

        let state = core::array::from_fn(|i| {
            let base = i * 4;
            W128::from_lanes([
                words[base],
                words[base + 1],
                words[base + 2],
                words[base + 3],
            ])
        });

        Self { state, idx }
    }
}

/// Two generators are equal iff their draw positions are equal and every
/// state word compares equal bit-for-bit. Short-circuits on the first
/// mismatching word. Used for reproducibility verification, not for any
/// production control flow.
impl PartialEq for SfmtRng {
    fn eq(&self, other: &Self) -> bool {
        if self.idx != other.idx {
            return false;
        }
        self.state
            .iter()
            .zip(other.state.iter())
            .all(|(a, b)| a == b)
    }
}

impl Eq for SfmtRng {}

/// Guarantee the seeded state yields the full 2^19937 - 1 period.
///
/// Computes the parity fold of the first four 32-bit words against the
/// parity vector; if it is even, flips exactly one bit — the first set bit
/// of the parity vector, scanning constants in index order and bits from
/// the least significant. The scan order is part of the contract.
fn period_certification(words: &mut [u32; N32]) {
    let mut inner: u32 = 0;
    for i in 0..4 {
        inner ^= words[idxof(i)] & PARITY[i];
    }
    let mut shift = 16;
    while shift > 0 {
        inner ^= inner >> shift;
        shift >>= 1;
    }
    inner &= 1;

    if inner == 1 {
        return;
    }

    for i in 0..4 {
        let mut work: u32 = 1;
        for _ in 0..32 {
            if work & PARITY[i] != 0 {
                words[idxof(i)] ^= work;
                return;
            }
            work <<= 1;
        }
    }
}

/// Recompute the period-certification parity fold of a seeded generator.
/// Test-only: a certified state always folds to 1.
#[cfg(test)]
fn parity_fold(rng: &SfmtRng) -> u32 {
    let mut inner: u32 = 0;
    for i in 0..4 {
        inner ^= rng.word32(idxof(i)) & PARITY[i];
    }
    let mut shift = 16;
    while shift > 0 {
        inner ^= inner >> shift;
        shift >>= 1;
    }
    inner & 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_seeding_is_period_certified() {
        for seed in [0u32, 1, 1234, 0xffff_ffff] {
            let rng = SfmtRng::new(seed);
            assert_eq!(parity_fold(&rng), 1, "seed {} failed certification", seed);
        }
    }

    #[test]
    fn test_key_seeding_is_period_certified() {
        let keys: [&[u32]; 4] = [
            &[],
            &[0],
            &[0x1234, 0x5678, 0x9abc, 0xdef0],
            &[7; 1000],
        ];
        for key in keys {
            let rng = SfmtRng::from_key(key);
            assert_eq!(
                parity_fold(&rng),
                1,
                "key of length {} failed certification",
                key.len()
            );
        }
    }

    #[test]
    fn test_empty_key_seeding_does_not_fault() {
        let mut rng = SfmtRng::from_key(&[]);
        let _ = rng.next_u32();
    }

    #[test]
    fn test_certification_corrects_even_parity() {
        // An all-zero word set folds to 0; the correction must flip exactly
        // bit 0 of word 0 (the first set bit of PARITY[0]).
        let mut words = [0u32; N32];
        period_certification(&mut words);
        assert_eq!(words[0], 1);
        assert!(words[1..].iter().all(|&w| w == 0));
    }

    #[test]
    fn test_certification_keeps_odd_parity_untouched() {
        let mut words = [0u32; N32];
        words[0] = 1; // folds to 1 already
        let before = words;
        period_certification(&mut words);
        assert_eq!(words, before);
    }

    #[test]
    fn test_seeding_marks_state_fully_consumed() {
        assert_eq!(SfmtRng::new(9).draw_index(), N32);
        assert_eq!(SfmtRng::from_key(&[9]).draw_index(), N32);
    }

    #[test]
    fn test_scalar_draws_match_bulk_fill() {
        let mut bulk = SfmtRng::new(1234);
        let mut scalar = SfmtRng::new(1234);

        let mut buf = vec![0u32; N32];
        bulk.fill_array32(&mut buf);

        for (i, &expected) in buf.iter().enumerate() {
            assert_eq!(scalar.next_u32(), expected, "mismatch at position {}", i);
        }
    }

    #[test]
    fn test_next_u64_matches_u32_pairs() {
        let mut a = SfmtRng::new(5150);
        let mut b = SfmtRng::new(5150);

        for _ in 0..N64 + 10 {
            let lo = a.next_u32() as u64;
            let hi = a.next_u32() as u64;
            assert_eq!(b.next_u64(), (hi << 32) | lo);
        }
    }

    #[test]
    #[should_panic(expected = "64-bit aligned draw position")]
    fn test_next_u64_rejects_odd_position() {
        let mut rng = SfmtRng::new(3);
        let _ = rng.next_u32();
        let _ = rng.next_u64();
    }

    #[test]
    fn test_idstring_names_parameter_set() {
        assert!(SfmtRng::idstring().starts_with("SFMT-19937:"));
    }

    #[test]
    fn test_min_array_sizes() {
        assert_eq!(SfmtRng::min_array_size32(), 624);
        assert_eq!(SfmtRng::min_array_size64(), 312);
    }

    #[test]
    fn test_range_bounds() {
        let mut rng = SfmtRng::new(12345);
        for _ in 0..1000 {
            let v = rng.range(10, 20);
            assert!(v >= 10 && v < 20);
        }
    }

    #[test]
    #[should_panic(expected = "min must be less than max")]
    fn test_range_invalid_bounds() {
        let mut rng = SfmtRng::new(12345);
        rng.range(100, 50);
    }

    #[test]
    fn test_next_f64_in_unit_interval() {
        let mut rng = SfmtRng::new(12345);
        for _ in 0..1000 {
            let v = rng.next_f64();
            assert!(v >= 0.0 && v < 1.0, "next_f64 produced {}", v);
        }
    }
}
