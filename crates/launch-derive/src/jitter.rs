//! Random sources for scatter jitter
//!
//! Jitter is a display-only offset that keeps points with the same binary
//! outcome from stacking on one line. It must be drawn fresh on every call,
//! so sources are created per derivation and never shared between redraws.

use crate::error::DeriveError;
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Half-width of the jitter band around each outcome value
pub const JITTER_AMPLITUDE: f64 = 0.1;

/// Accept a jitter half-width that is finite and not negative
///
/// # Errors
/// [`DeriveError::InvalidAmplitude`] otherwise.
pub fn check_amplitude(amplitude: f64) -> Result<f64, DeriveError> {
    if amplitude.is_finite() && amplitude >= 0.0 {
        Ok(amplitude)
    } else {
        Err(DeriveError::InvalidAmplitude(amplitude))
    }
}

/// Band half-width a source may draw from; a non-finite amplitude collapses to 0
#[inline]
fn band(amplitude: f64) -> f64 {
    if amplitude.is_finite() {
        amplitude.abs()
    } else {
        0.0
    }
}

/// Supplier of per-point jitter offsets
///
/// Implementations must return a value in `[-amplitude, amplitude]` and must
/// not panic on a NaN or infinite amplitude.
pub trait JitterSource {
    /// Next offset for one point
    fn next_offset(&mut self, amplitude: f64) -> f64;
}

impl<J: JitterSource + ?Sized> JitterSource for &mut J {
    fn next_offset(&mut self, amplitude: f64) -> f64 {
        (**self).next_offset(amplitude)
    }
}

impl<J: JitterSource + ?Sized> JitterSource for Box<J> {
    fn next_offset(&mut self, amplitude: f64) -> f64 {
        (**self).next_offset(amplitude)
    }
}

/// Independent uniform draws over `[-amplitude, amplitude]`
#[derive(Debug, Clone)]
pub struct UniformJitter<R = ThreadRng> {
    rng: R,
}

impl UniformJitter<ThreadRng> {
    /// Backed by the thread-local generator
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl Default for UniformJitter<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl UniformJitter<StdRng> {
    /// Reproducible sequence for a given seed
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> UniformJitter<R> {
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> JitterSource for UniformJitter<R> {
    fn next_offset(&mut self, amplitude: f64) -> f64 {
        let a = band(amplitude);
        self.rng.gen_range(-a..=a)
    }
}

/// Constant offset, clamped to the band
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedJitter(pub f64);

impl JitterSource for FixedJitter {
    fn next_offset(&mut self, amplitude: f64) -> f64 {
        let a = band(amplitude);
        self.0.clamp(-a, a)
    }
}

/// Replays a fixed list of offsets in order, wrapping at the end
#[derive(Debug, Clone, PartialEq)]
pub struct CyclingJitter {
    offsets: Vec<f64>,
    pos: usize,
}

impl CyclingJitter {
    #[must_use]
    pub fn new(offsets: Vec<f64>) -> Self {
        Self { offsets, pos: 0 }
    }

    /// Offsets handed out so far
    #[inline]
    #[must_use]
    pub fn draws(&self) -> usize {
        self.pos
    }
}

impl JitterSource for CyclingJitter {
    fn next_offset(&mut self, amplitude: f64) -> f64 {
        if self.offsets.is_empty() {
            return 0.0;
        }
        let a = band(amplitude);
        let value = self.offsets[self.pos % self.offsets.len()];
        self.pos += 1;
        value.clamp(-a, a)
    }
}
