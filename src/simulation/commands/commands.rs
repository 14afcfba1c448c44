use crate::brush;
use crate::domain::{ColorJitter, ColorSource};

use super::WorldCore;

pub(super) fn stamp<C>(world: &mut WorldCore, x: i32, y: i32, colors: &mut C, radius: i32, probability: f32) -> u32
where
    C: ColorSource + ?Sized,
{
    brush::stamp(&mut world.grid, x, y, colors, radius, probability, world.rng.as_mut())
}

/// Stamp with the configured brush: jittered base color, configured radius and density
pub(super) fn stamp_brush(world: &mut WorldCore, x: i32, y: i32) -> u32 {
    let settings = world.brush;
    let mut colors = ColorJitter::new(settings.color);
    stamp(world, x, y, &mut colors, settings.radius, settings.probability)
}

pub(super) fn clear(world: &mut WorldCore) {
    world.grid.clear();
    world.frame = 0;
    log::debug!("cleared {}x{} grid", world.grid.width(), world.grid.height());
}
