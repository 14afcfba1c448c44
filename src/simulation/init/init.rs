use crate::behaviors::PowderBehavior;
use crate::grid::{Grid, MIN_EXTENT};
use crate::random::XorShift32;

use super::perf_stats::PerfStats;
use super::settings::{BrushSettings, SimulationSettings, MAX_CANVAS_EXTENT, MAX_PARTICLE_SIZE};
use super::{RenderBuffers, WorldCore};

pub(super) fn create_world_core(pixel_width: u32, pixel_height: u32, particle_size: u32) -> WorldCore {
    let defaults = SimulationSettings::default();
    let (pixel_width, pixel_height, particle_size) = clamp_geometry(pixel_width, pixel_height, particle_size);

    WorldCore {
        grid: Grid::new(pixel_width, pixel_height, particle_size),
        powder: PowderBehavior::new(),
        pixel_width,
        pixel_height,
        brush: BrushSettings::default(),
        background: defaults.background,
        rng: Box::new(XorShift32::from_entropy()),
        seed: None,
        frame: 0,
        generation: 0,
        render: RenderBuffers {
            // Sized on first `render_pixels`
            pixels: Vec::new(),
        },
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    }
}

/// Non-positive values become 1; oversized ones are capped
pub(super) fn clamp_geometry(pixel_width: u32, pixel_height: u32, particle_size: u32) -> (u32, u32, u32) {
    (
        pixel_width.clamp(MIN_EXTENT, MAX_CANVAS_EXTENT),
        pixel_height.clamp(MIN_EXTENT, MAX_CANVAS_EXTENT),
        particle_size.clamp(MIN_EXTENT, MAX_PARTICLE_SIZE),
    )
}

/// Start a new grid generation. Resizing is destructive: nothing carries over.
pub(super) fn configure(world: &mut WorldCore, pixel_width: u32, pixel_height: u32, particle_size: u32) {
    let (pixel_width, pixel_height, particle_size) = clamp_geometry(pixel_width, pixel_height, particle_size);

    world.pixel_width = pixel_width;
    world.pixel_height = pixel_height;
    world.grid.initialize(pixel_width, pixel_height, particle_size);
    world.frame = 0;
    world.generation += 1;

    log::debug!(
        "configured generation {}: {}x{}px / {}px cells -> {}x{} grid",
        world.generation,
        pixel_width,
        pixel_height,
        particle_size,
        world.grid.width(),
        world.grid.height()
    );
}

pub(super) fn resize(world: &mut WorldCore, pixel_width: u32, pixel_height: u32) {
    let particle_size = world.grid.particle_size();
    configure(world, pixel_width, pixel_height, particle_size);
}

pub(super) fn set_particle_size(world: &mut WorldCore, particle_size: u32) {
    let (w, h) = (world.pixel_width, world.pixel_height);
    configure(world, w, h, particle_size);
}
