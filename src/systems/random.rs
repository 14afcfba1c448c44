//! Random sources
//!
//! The update pass is deterministic; only the brush (and the color jitter it
//! drives) draws random numbers. Everything goes through `RandomSource` so tests
//! and replays can inject their own sequence.

/// Seed used when none is supplied (xorshift must never hold zero)
pub const DEFAULT_SEED: u32 = 12345;

pub trait RandomSource {
    fn next_u32(&mut self) -> u32;

    /// Uniform sample in [0, 1) with 24 bits of precision
    #[inline]
    fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform integer in [0, n); returns 0 when n == 0
    #[inline]
    fn next_below(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        ((self.next_u32() as u64 * n as u64) >> 32) as u32
    }
}

/// Xorshift32 random number generator
#[inline]
pub fn xorshift32(state: &mut u32) -> u32 {
    let mut x = *state;
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    *state = x;
    x
}

#[derive(Clone, Debug)]
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    pub fn new(seed: u32) -> Self {
        Self { state: if seed == 0 { DEFAULT_SEED } else { seed } }
    }

    /// Seed from the clock in the browser, fixed seed elsewhere
    pub fn from_entropy() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            let seed = (js_sys::Math::random() * u32::MAX as f64) as u32;
            Self::new(seed)
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            Self::new(DEFAULT_SEED)
        }
    }
}

impl Default for XorShift32 {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl RandomSource for XorShift32 {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        xorshift32(&mut self.state)
    }
}
