use wasm_bindgen::prelude::*;

use crate::domain::{ColorSource, Hsl, Rgb};
use crate::random::RandomSource;

use super::perf_stats::PerfStats;
use super::WorldCore;

/// Adapts a JS callback (`() => 0xRRGGBB`) to `ColorSource`.
/// Throwing callbacks or non-numeric results fall back to `fallback`.
struct JsColorSource<'a> {
    callback: &'a js_sys::Function,
    fallback: Rgb,
    failures: u32,
}

impl ColorSource for JsColorSource<'_> {
    fn next_color(&mut self, _rng: &mut dyn RandomSource) -> Rgb {
        match self.callback.call0(&JsValue::NULL).ok().and_then(|v| v.as_f64()) {
            Some(n) if n >= 0.0 && n <= 0xFF_FFFF as f64 => Rgb::from_rgb24(n as u32),
            _ => {
                self.failures += 1;
                self.fallback
            }
        }
    }
}

#[wasm_bindgen]
pub struct World {
    core: WorldCore,
}

#[wasm_bindgen]
impl World {
    /// Create a new world for a canvas of the given pixel size
    #[wasm_bindgen(constructor)]
    pub fn new(pixel_width: u32, pixel_height: u32, particle_size: u32) -> Self {
        Self {
            core: WorldCore::new(pixel_width, pixel_height, particle_size),
        }
    }

    /// Create a world from a settings JSON document
    #[wasm_bindgen(js_name = fromSettings)]
    pub fn from_settings(json: String) -> Result<World, JsValue> {
        let settings = super::SimulationSettings::from_json(&json).map_err(|e| JsValue::from_str(&e))?;
        let core = WorldCore::from_settings(&settings).map_err(|e| JsValue::from_str(&e))?;
        Ok(Self { core })
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 { self.core.width() }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 { self.core.height() }

    #[wasm_bindgen(getter)]
    pub fn particle_size(&self) -> u32 { self.core.particle_size() }

    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> u32 { self.core.particle_count() }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.core.frame() }

    #[wasm_bindgen(getter)]
    pub fn generation(&self) -> u64 { self.core.generation() }

    /// Advance the simulation by one tick
    pub fn tick(&mut self) {
        self.core.tick();
    }

    /// Stamp the configured brush at canvas pixel (x, y)
    pub fn stamp(&mut self, x: i32, y: i32) -> u32 {
        self.core.stamp_brush(x, y)
    }

    /// Stamp with the configured color but an explicit radius and density
    pub fn stamp_with(&mut self, x: i32, y: i32, radius: i32, probability: f32) -> u32 {
        let mut colors = crate::domain::ColorJitter::new(self.core.brush().color);
        self.core.stamp(x, y, &mut colors, radius, probability)
    }

    /// Stamp using a JS color callback returning `0xRRGGBB` per particle
    pub fn stamp_with_color_fn(
        &mut self,
        x: i32,
        y: i32,
        color_fn: &js_sys::Function,
        radius: i32,
        probability: f32,
    ) -> u32 {
        let mut colors = JsColorSource {
            callback: color_fn,
            fallback: self.core.brush().color.to_rgb(),
            failures: 0,
        };
        let accepted = self.core.stamp(x, y, &mut colors, radius, probability);
        if colors.failures > 0 {
            log::warn!("color callback failed {} of {} times", colors.failures, accepted);
        }
        accepted
    }

    /// Rebuild the grid (discards all particles)
    pub fn configure(&mut self, pixel_width: u32, pixel_height: u32, particle_size: u32) {
        self.core.configure(pixel_width, pixel_height, particle_size);
    }

    /// Canvas resized; keeps the particle size (discards all particles)
    pub fn resize(&mut self, pixel_width: u32, pixel_height: u32) {
        self.core.resize(pixel_width, pixel_height);
    }

    /// Particle size slider (discards all particles)
    pub fn set_particle_size(&mut self, particle_size: u32) {
        self.core.set_particle_size(particle_size);
    }

    /// Clear all particles
    pub fn clear(&mut self) {
        self.core.clear();
    }

    pub fn set_brush_radius(&mut self, radius: i32) {
        let mut brush = self.core.brush();
        brush.radius = radius;
        self.core.set_brush(brush);
    }

    pub fn set_brush_probability(&mut self, probability: f32) {
        let mut brush = self.core.brush();
        brush.probability = probability;
        self.core.set_brush(brush);
    }

    /// Base brush color as hsl(h, s%, l%)
    pub fn set_brush_color(&mut self, h: u16, s: u8, l: u8) {
        let mut brush = self.core.brush();
        brush.color = Hsl::new(h, s, l);
        self.core.set_brush(brush);
    }

    pub fn set_background_color(&mut self, r: u8, g: u8, b: u8) {
        self.core.set_background(Rgb::new(r, g, b));
    }

    pub fn set_seed(&mut self, seed: u32) {
        self.core.set_seed(seed);
    }

    pub fn apply_settings_json(&mut self, json: String) -> Result<(), JsValue> {
        self.core
            .apply_settings_json(&json)
            .map_err(|e| JsValue::from_str(&e))?;
        Ok(())
    }

    pub fn settings_json(&self) -> Result<String, JsValue> {
        self.core.settings_json().map_err(|e| JsValue::from_str(&e))
    }

    /// Packed ABGR cell value at cell (x, y); 0 = empty
    pub fn cell_at(&self, x: u32, y: u32) -> u32 {
        self.core.cell_at(x, y).packed()
    }

    /// Get pointer to the cell buffer (for JS rendering)
    pub fn cells_ptr(&self) -> *const u32 {
        self.core.cells_ptr()
    }

    pub fn cells_len(&self) -> usize {
        self.core.cells_len()
    }

    /// Rasterize the grid; returns a pointer to RGBA bytes
    pub fn render_pixels(&mut self) -> *const u8 {
        self.core.render_pixels()
    }

    pub fn pixels_len(&self) -> usize {
        self.core.pixels_len()
    }

    /// Width of the rendered image (whole cells only)
    #[wasm_bindgen(getter)]
    pub fn pixel_width(&self) -> u32 {
        self.core.render_width()
    }

    #[wasm_bindgen(getter)]
    pub fn pixel_height(&self) -> u32 {
        self.core.render_height()
    }

    /// Enable or disable per-tick perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last tick perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }
}
