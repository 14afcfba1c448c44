//! World - the falling sand simulation
//!
//! `WorldCore` owns everything the simulation touches: the grid, brush and
//! render settings, the random source and counters. There is no ambient state;
//! the facade (`World`) is a thin `wasm-bindgen` wrapper around it.
//!
//! Ordering is the caller's job: `tick()` runs to completion synchronously and
//! every stamp lands strictly before or after a tick, never inside one.

use crate::behaviors::PowderBehavior;
use crate::domain::{Cell, ColorSource, Rgb};
use crate::grid::Grid;
use crate::random::RandomSource;

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "step/scan.rs"]
mod scan;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "render/render_extract.rs"]
mod render_extract;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
pub mod settings;
mod facade;

pub use facade::World;
pub use perf_stats::PerfStats;
pub use settings::{BrushSettings, SimulationSettings};

use perf_timer::PerfTimer;

pub(crate) struct RenderBuffers {
    pub(crate) pixels: Vec<u8>,
}

/// The simulation world
pub struct WorldCore {
    grid: Grid,
    powder: PowderBehavior,

    // Requested canvas extent (the grid covers the largest whole-cell part of it)
    pixel_width: u32,
    pixel_height: u32,

    // Settings
    brush: BrushSettings,
    background: Rgb,
    rng: Box<dyn RandomSource>,
    seed: Option<u32>,

    // State
    frame: u64,
    generation: u64,

    render: RenderBuffers,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl WorldCore {
    /// Create a world covering a `pixel_width × pixel_height` canvas
    pub fn new(pixel_width: u32, pixel_height: u32, particle_size: u32) -> Self {
        init::create_world_core(pixel_width, pixel_height, particle_size)
    }

    /// Create a world from a settings document
    pub fn from_settings(settings: &SimulationSettings) -> Result<Self, String> {
        settings.validate()?;
        let mut world = Self::new(settings.pixel_width, settings.pixel_height, settings.particle_size);
        settings::set_brush(&mut world, settings.brush);
        settings::set_background(&mut world, settings.background);
        if let Some(seed) = settings.seed {
            settings::set_seed(&mut world, seed);
        }
        Ok(world)
    }

    // === Read access ===

    pub fn width(&self) -> u32 { self.grid.width() }

    pub fn height(&self) -> u32 { self.grid.height() }

    pub fn particle_size(&self) -> u32 { self.grid.particle_size() }

    pub fn pixel_width(&self) -> u32 { self.pixel_width }

    pub fn pixel_height(&self) -> u32 { self.pixel_height }

    pub fn particle_count(&self) -> u32 { self.grid.occupied() as u32 }

    pub fn frame(&self) -> u64 { self.frame }

    /// Bumped by every `configure`
    pub fn generation(&self) -> u64 { self.generation }

    pub fn grid(&self) -> &Grid { &self.grid }

    /// Cell at cell coordinates; EMPTY outside the grid
    pub fn cell_at(&self, x: u32, y: u32) -> Cell {
        self.grid.cell_at(x, y)
    }

    // === Simulation ===

    /// Advance the simulation by one tick
    pub fn tick(&mut self) {
        step::step(self);
    }

    // === Brush ===

    /// Stamp particles around canvas pixel (x, y) with an explicit color source
    pub fn stamp<C>(&mut self, x: i32, y: i32, colors: &mut C, radius: i32, probability: f32) -> u32
    where
        C: ColorSource + ?Sized,
    {
        commands::stamp(self, x, y, colors, radius, probability)
    }

    /// Stamp with the configured brush
    pub fn stamp_brush(&mut self, x: i32, y: i32) -> u32 {
        commands::stamp_brush(self, x, y)
    }

    pub fn brush(&self) -> BrushSettings {
        self.brush
    }

    pub fn set_brush(&mut self, brush: BrushSettings) {
        settings::set_brush(self, brush);
    }

    pub fn set_random_source(&mut self, rng: Box<dyn RandomSource>) {
        self.seed = None;
        self.rng = rng;
    }

    pub fn set_seed(&mut self, seed: u32) {
        settings::set_seed(self, seed);
    }

    // === Lifecycle ===

    /// Rebuild the grid for a new canvas / cell size. Discards every particle.
    pub fn configure(&mut self, pixel_width: u32, pixel_height: u32, particle_size: u32) {
        init::configure(self, pixel_width, pixel_height, particle_size);
    }

    pub fn resize(&mut self, pixel_width: u32, pixel_height: u32) {
        init::resize(self, pixel_width, pixel_height);
    }

    pub fn set_particle_size(&mut self, particle_size: u32) {
        init::set_particle_size(self, particle_size);
    }

    /// Empty the grid without resizing
    pub fn clear(&mut self) {
        commands::clear(self);
    }

    // === Settings ===

    pub fn settings(&self) -> SimulationSettings {
        settings::settings(self)
    }

    pub fn apply_settings_json(&mut self, json: &str) -> Result<(), String> {
        settings::apply_settings_json(self, json)
    }

    pub fn settings_json(&self) -> Result<String, String> {
        settings::settings(self).to_json()
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    pub fn set_background(&mut self, color: Rgb) {
        settings::set_background(self, color);
    }

    // === Perf ===

    /// Enable or disable per-tick perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Last tick perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    // === Rendering ===

    /// Pointer to the raw cell buffer (u32 ABGR, 0 = empty)
    pub fn cells_ptr(&self) -> *const u32 {
        self.grid.cells_ptr()
    }

    pub fn cells_len(&self) -> usize {
        self.grid.size()
    }

    /// Rasterize into the RGBA pixel buffer and return a pointer to it
    pub fn render_pixels(&mut self) -> *const u8 {
        render_extract::render_pixels(self)
    }

    /// Bytes in the pixel buffer after the last `render_pixels`
    pub fn pixels_len(&self) -> usize {
        render_extract::pixels_len(self)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.render.pixels
    }

    /// Width in pixels of the rendered image
    pub fn render_width(&self) -> u32 {
        render_extract::pixel_width(self)
    }

    pub fn render_height(&self) -> u32 {
        render_extract::pixel_height(self)
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
