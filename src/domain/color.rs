//! Colors - value types for particle colors
//!
//! Colors are computed once when a particle is created and stored packed in the
//! cell (see `domain::cell`). HSL only exists at the boundary: the UI picks a base
//! hue/saturation/lightness and `ColorJitter` turns it into per-particle RGB.

use serde::{Deserialize, Serialize};

use crate::systems::random::RandomSource;

/// Default sand color: hsl(50, 80%, 50%)
pub const SAND_HSL: Hsl = Hsl { h: 50, s: 80, l: 50 };

/// Default canvas background: rgb(240, 240, 240)
pub const BACKGROUND_RGB: Rgb = Rgb { r: 240, g: 240, b: 240 };

/// Saturation moves by an integer in [-SATURATION_DROP, 0]
const SATURATION_DROP: u32 = 20;
/// Lightness moves by an integer in [-LIGHTNESS_SPREAD, +LIGHTNESS_SPREAD]
const LIGHTNESS_SPREAD: u32 = 10;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Opaque ABGR (little-endian bytes [R, G, B, A]) for direct canvas copy
    #[inline]
    pub const fn to_abgr(self) -> u32 {
        0xFF00_0000 | ((self.b as u32) << 16) | ((self.g as u32) << 8) | (self.r as u32)
    }

    /// From a CSS-style `0xRRGGBB` number
    #[inline]
    pub const fn from_rgb24(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    /// Inverse of `to_abgr`; alpha is ignored
    #[inline]
    pub const fn from_abgr(packed: u32) -> Self {
        Self {
            r: (packed & 0xFF) as u8,
            g: ((packed >> 8) & 0xFF) as u8,
            b: ((packed >> 16) & 0xFF) as u8,
        }
    }
}

/// Hue in degrees [0, 360), saturation and lightness in percent [0, 100]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hsl {
    pub h: u16,
    pub s: u8,
    pub l: u8,
}

impl Hsl {
    /// Build a color, wrapping hue and clamping the percentages
    pub fn new(h: u16, s: u8, l: u8) -> Self {
        Self { h: h % 360, s: s.min(100), l: l.min(100) }
    }

    pub fn to_rgb(self) -> Rgb {
        let h = (self.h % 360) as f64 / 360.0;
        let s = self.s.min(100) as f64 / 100.0;
        let l = self.l.min(100) as f64 / 100.0;

        if s == 0.0 {
            let v = channel(l);
            return Rgb::new(v, v, v);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        Rgb::new(
            channel(hue_to_rgb(p, q, h + 1.0 / 3.0)),
            channel(hue_to_rgb(p, q, h)),
            channel(hue_to_rgb(p, q, h - 1.0 / 3.0)),
        )
    }
}

impl Default for Hsl {
    fn default() -> Self {
        SAND_HSL
    }
}

#[inline]
fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 0.5 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

#[inline]
fn channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Capability: produce the color for one freshly stamped particle.
///
/// The brush asks once per accepted cell, so sources are free to return a
/// different color every call. `rng` is the world's random source.
pub trait ColorSource {
    fn next_color(&mut self, rng: &mut dyn RandomSource) -> Rgb;
}

impl<F> ColorSource for F
where
    F: FnMut() -> Rgb,
{
    #[inline]
    fn next_color(&mut self, _rng: &mut dyn RandomSource) -> Rgb {
        self()
    }
}

/// Perturbs a base HSL color per particle (slightly duller, lighter or darker)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorJitter {
    base: Hsl,
}

impl ColorJitter {
    pub fn new(base: Hsl) -> Self {
        Self { base }
    }

    pub fn base(&self) -> Hsl {
        self.base
    }

    /// Jittered HSL before conversion, exposed for tests and UI previews
    pub fn vary(&self, rng: &mut dyn RandomSource) -> Hsl {
        let ds = rng.next_below(SATURATION_DROP + 1) as i32 - SATURATION_DROP as i32;
        let dl = rng.next_below(2 * LIGHTNESS_SPREAD + 1) as i32 - LIGHTNESS_SPREAD as i32;

        Hsl {
            h: self.base.h,
            s: (self.base.s as i32 + ds).clamp(0, 100) as u8,
            l: (self.base.l as i32 + dl).clamp(0, 100) as u8,
        }
    }
}

impl ColorSource for ColorJitter {
    fn next_color(&mut self, rng: &mut dyn RandomSource) -> Rgb {
        self.vary(rng).to_rgb()
    }
}
