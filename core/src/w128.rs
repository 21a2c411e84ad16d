//! 128-bit state word
//!
//! One unit of generator state, stored as four explicit 32-bit lanes and
//! viewable as two 64-bit lanes (same bits, different access width). All
//! access goes through bounds-checked lane methods rather than pointer
//! reinterpretation, so the layout is identical on every platform.

/// One 128-bit word of generator state.
///
/// Lane 0 holds the least significant 32 bits of the 128-bit value; the
/// whole-word byte shifts below treat the word as a single little-endian
/// 128-bit integer, matching the reference recurrence.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct W128([u32; 4]);

impl W128 {
    /// Build a word from four 32-bit lanes, lane 0 first.
    #[inline]
    pub(crate) const fn from_lanes(lanes: [u32; 4]) -> Self {
        Self(lanes)
    }

    /// Read 32-bit lane `lane` (0..4).
    #[inline]
    pub(crate) fn u32_lane(&self, lane: usize) -> u32 {
        self.0[lane]
    }

    /// Write 32-bit lane `lane` (0..4).
    #[inline]
    pub(crate) fn set_u32_lane(&mut self, lane: usize, value: u32) {
        self.0[lane] = value;
    }

    /// Read 64-bit lane `lane` (0..2). Lane 0 is composed of 32-bit
    /// lanes 0 (low) and 1 (high).
    #[inline]
    pub(crate) fn u64_lane(&self, lane: usize) -> u64 {
        let lo = self.0[lane * 2] as u64;
        let hi = self.0[lane * 2 + 1] as u64;
        (hi << 32) | lo
    }

    /// Write 64-bit lane `lane` (0..2).
    #[inline]
    pub(crate) fn set_u64_lane(&mut self, lane: usize, value: u64) {
        self.0[lane * 2] = value as u32;
        self.0[lane * 2 + 1] = (value >> 32) as u32;
    }

    /// Borrow the raw lanes (used by the SSE2 recursion path).
    #[cfg(all(target_arch = "x86_64", target_feature = "sse2"))]
    #[inline]
    pub(crate) fn lanes(&self) -> &[u32; 4] {
        &self.0
    }

    /// View the word as a single little-endian 128-bit integer
    /// (lane 0 = least significant 32 bits).
    #[inline]
    pub(crate) fn to_u128(self) -> u128 {
        (self.0[3] as u128) << 96
            | (self.0[2] as u128) << 64
            | (self.0[1] as u128) << 32
            | self.0[0] as u128
    }

    /// Inverse of [`to_u128`](W128::to_u128).
    #[inline]
    pub(crate) fn from_u128(value: u128) -> Self {
        Self([
            value as u32,
            (value >> 32) as u32,
            (value >> 64) as u32,
            (value >> 96) as u32,
        ])
    }
}

/// Byte-order index helper for flat 32-bit state access.
///
/// On little-endian targets this is the identity mapping. The reference
/// implementation leaves the big-endian mapping as a pass-through as well,
/// so big-endian targets must independently verify this function before
/// relying on cross-platform bit-identical output.
#[inline]
pub(crate) const fn idxof(i: usize) -> usize {
    i
}

/// Caller-buffer view used by the bulk array generator.
///
/// Maps a flat output slice to/from whole 128-bit blocks so the recurrence
/// can treat the output buffer as a virtual extension of the state array
/// without reinterpreting memory.
pub(crate) trait BlockBuffer {
    /// Read block `i` as a 128-bit word.
    fn load_block(&self, i: usize) -> W128;
    /// Write a 128-bit word into block `i`.
    fn store_block(&mut self, i: usize, w: W128);
}

impl BlockBuffer for [u32] {
    #[inline]
    fn load_block(&self, i: usize) -> W128 {
        let base = i * 4;
        W128::from_lanes([self[base], self[base + 1], self[base + 2], self[base + 3]])
    }

    #[inline]
    fn store_block(&mut self, i: usize, w: W128) {
        let base = i * 4;
        for lane in 0..4 {
            self[base + lane] = w.u32_lane(lane);
        }
    }
}

impl BlockBuffer for [u64] {
    #[inline]
    fn load_block(&self, i: usize) -> W128 {
        let base = i * 2;
        let mut w = W128::default();
        w.set_u64_lane(0, self[base]);
        w.set_u64_lane(1, self[base + 1]);
        w
    }

    #[inline]
    fn store_block(&mut self, i: usize, w: W128) {
        let base = i * 2;
        self[base] = w.u64_lane(0);
        self[base + 1] = w.u64_lane(1);
    }
}
