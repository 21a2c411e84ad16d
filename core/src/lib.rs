//! SFMT Core - Deterministic Simulation RNG
//!
//! SIMD-oriented Fast Mersenne Twister (SFMT-19937) for host simulations
//! that require perfectly reproducible random sequences: same seed produces
//! bit-identical output across runs, builds, and platforms.
//!
//! # Architecture
//!
//! - **params**: compile-time parameter set (state geometry, shifts, masks,
//!   parity vector)
//! - **w128**: 128-bit state word with explicit 32/64-bit lane views
//! - **recursion**: the GF(2) state-advance recurrence (SSE2 and portable
//!   scalar, bit-identical)
//! - **sfmt**: the generator — seeding, period certification, scalar draws,
//!   bulk array fills, equality
//! - **snapshot**: serializable state capture for pause/resume
//!
//! # Critical Invariants
//!
//! 1. Identical seed + identical call sequence ⇒ identical output words
//! 2. Every seeded state is period-certified (full 2^19937 - 1 period)
//! 3. Contract violations fail fast; there are no recoverable errors in the
//!    draw path

// Module declarations
mod params;
mod recursion;
mod w128;

pub mod sfmt;
pub mod snapshot;

// Re-exports for convenience
pub use sfmt::SfmtRng;
pub use snapshot::{RngSnapshot, SnapshotError};
