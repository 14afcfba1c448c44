//! Brush - stochastic circular stamping
//!
//! Every lattice offset inside the disk `dx² + dy² ≤ r²` is a candidate; each one
//! independently survives with `probability`, which gives the spray look instead
//! of a hard filled circle. Off-grid candidates are dropped by `Grid::set`.

use crate::domain::ColorSource;
use crate::grid::Grid;
use crate::systems::random::RandomSource;

/// Upper bound on brush radius in cells
pub const MAX_BRUSH_RADIUS: i32 = 128;

/// Clamp a raw probability into [0, 1]; NaN means "never"
#[inline]
pub fn sanitize_probability(probability: f32) -> f32 {
    if probability.is_nan() {
        0.0
    } else {
        probability.clamp(0.0, 1.0)
    }
}

/// Clamp a raw radius into [0, MAX_BRUSH_RADIUS]
#[inline]
pub fn sanitize_radius(radius: i32) -> i32 {
    radius.clamp(0, MAX_BRUSH_RADIUS)
}

/// Stamp particles around canvas pixel (px, py).
///
/// Returns how many candidates passed the probability test (some of which may
/// have landed off-grid and been dropped).
pub fn stamp<C>(
    grid: &mut Grid,
    px: i32,
    py: i32,
    colors: &mut C,
    radius: i32,
    probability: f32,
    rng: &mut dyn RandomSource,
) -> u32
where
    C: ColorSource + ?Sized,
{
    let radius = sanitize_radius(radius);
    let probability = sanitize_probability(probability);
    let step = i32::try_from(grid.particle_size()).unwrap_or(i32::MAX);
    let r2 = radius * radius;

    let mut accepted = 0u32;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy > r2 {
                continue;
            }
            if rng.next_f32() >= probability {
                continue;
            }
            let color = colors.next_color(rng);
            let x = px.saturating_add(dx.saturating_mul(step));
            let y = py.saturating_add(dy.saturating_mul(step));
            grid.set(x, y, color);
            accepted += 1;
        }
    }
    accepted
}
