use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::brush::{sanitize_probability, sanitize_radius};
use crate::domain::{Hsl, Rgb, BACKGROUND_RGB, SAND_HSL};
use crate::random::XorShift32;

use super::init::clamp_geometry;
use super::perf_stats::PerfStats;
use super::WorldCore;

pub const DEFAULT_PIXEL_WIDTH: u32 = 400;
pub const DEFAULT_PIXEL_HEIGHT: u32 = 400;
pub const DEFAULT_PARTICLE_SIZE: u32 = 4;
pub const DEFAULT_BRUSH_RADIUS: i32 = 5;
pub const DEFAULT_BRUSH_PROBABILITY: f32 = 0.5;

/// Largest accepted canvas edge in pixels
pub const MAX_CANVAS_EXTENT: u32 = 16_384;
/// Largest accepted particle edge in pixels
pub const MAX_PARTICLE_SIZE: u32 = 256;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BrushSettings {
    /// Radius in cells
    pub radius: i32,
    /// Chance that each cell in the disk receives a particle
    pub probability: f32,
    /// Base color; every particle gets a jittered variant
    pub color: Hsl,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            radius: DEFAULT_BRUSH_RADIUS,
            probability: DEFAULT_BRUSH_PROBABILITY,
            color: SAND_HSL,
        }
    }
}

impl BrushSettings {
    fn sanitized(self) -> Self {
        Self {
            radius: sanitize_radius(self.radius),
            probability: sanitize_probability(self.probability),
            color: Hsl::new(self.color.h, self.color.s, self.color.l),
        }
    }
}

/// Everything the UI can tweak, as one JSON document
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimulationSettings {
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub particle_size: u32,
    pub brush: BrushSettings,
    pub background: Rgb,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            pixel_width: DEFAULT_PIXEL_WIDTH,
            pixel_height: DEFAULT_PIXEL_HEIGHT,
            particle_size: DEFAULT_PARTICLE_SIZE,
            brush: BrushSettings::default(),
            background: BACKGROUND_RGB,
            seed: None,
        }
    }
}

impl SimulationSettings {
    pub fn from_json(json: &str) -> Result<Self, String> {
        let settings: SimulationSettings = serde_json::from_str(json).map_err(|e| e.to_string())?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| e.to_string())
    }

    /// Reject values that would allocate absurd grids; everything else is clamped later
    pub fn validate(&self) -> Result<(), String> {
        if self.pixel_width > MAX_CANVAS_EXTENT || self.pixel_height > MAX_CANVAS_EXTENT {
            return Err(format!(
                "canvas {}x{} exceeds the {}px limit",
                self.pixel_width, self.pixel_height, MAX_CANVAS_EXTENT
            ));
        }
        if self.particle_size > MAX_PARTICLE_SIZE {
            return Err(format!(
                "particleSize {} exceeds the {}px limit",
                self.particle_size, MAX_PARTICLE_SIZE
            ));
        }
        Ok(())
    }
}

pub(super) fn enable_perf_metrics(world: &mut WorldCore, enabled: bool) {
    world.perf_enabled = enabled;
    if !enabled {
        world.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(world: &WorldCore) -> PerfStats {
    world.perf_stats.clone()
}

pub(super) fn set_brush(world: &mut WorldCore, brush: BrushSettings) {
    world.brush = brush.sanitized();
}

pub(super) fn set_background(world: &mut WorldCore, color: Rgb) {
    world.background = color;
}

pub(super) fn set_seed(world: &mut WorldCore, seed: u32) {
    world.seed = Some(seed);
    world.rng = Box::new(XorShift32::new(seed));
}

pub(super) fn settings(world: &WorldCore) -> SimulationSettings {
    SimulationSettings {
        pixel_width: world.pixel_width,
        pixel_height: world.pixel_height,
        particle_size: world.grid.particle_size(),
        brush: world.brush,
        background: world.background,
        seed: world.seed,
    }
}

/// Apply a settings document on top of the current settings. Fields the
/// document leaves out keep their values; geometry changes rebuild the grid.
/// A parse or validation failure leaves the world untouched.
pub(super) fn apply_settings_json(world: &mut WorldCore, json: &str) -> Result<(), String> {
    let current = settings(world);
    let next = match merged_settings(&current, json) {
        Ok(s) => s,
        Err(e) => {
            log::warn!("rejected settings: {}", e);
            return Err(e);
        }
    };

    let geometry = clamp_geometry(next.pixel_width, next.pixel_height, next.particle_size);
    if geometry != (current.pixel_width, current.pixel_height, current.particle_size) {
        world.configure(geometry.0, geometry.1, geometry.2);
    }

    set_brush(world, next.brush);
    set_background(world, next.background);
    if let Some(seed) = next.seed {
        if current.seed != Some(seed) {
            set_seed(world, seed);
        }
    }

    log::info!(
        "settings applied: {}x{} cells, brush r={} p={:.2}",
        world.grid.width(),
        world.grid.height(),
        world.brush.radius,
        world.brush.probability
    );
    Ok(())
}

/// Overlay a (possibly partial) JSON document onto `base` and validate the result
fn merged_settings(base: &SimulationSettings, json: &str) -> Result<SimulationSettings, String> {
    let patch: Value = serde_json::from_str(json).map_err(|e| e.to_string())?;
    let mut merged = serde_json::to_value(base).map_err(|e| e.to_string())?;
    merge_json(&mut merged, patch);

    let settings: SimulationSettings = serde_json::from_value(merged).map_err(|e| e.to_string())?;
    settings.validate()?;
    Ok(settings)
}

/// Objects merge key by key; anything else replaces the target
fn merge_json(target: &mut Value, patch: Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                match target.get_mut(&key) {
                    Some(slot) => merge_json(slot, value),
                    None => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (target, patch) => *target = patch,
    }
}
