//! Dune Engine - falling sand cellular automaton in WASM
//!
//! Architecture:
//! - core/        - Logging plumbing
//! - domain/      - Cell encoding and colors
//! - spatial/     - Grid storage
//! - systems/     - Behaviors, brush, random sources
//! - simulation/  - World orchestration and the JS facade

pub mod core;
pub mod spatial;
pub mod domain;
pub mod systems;
pub mod simulation;

// Compatibility re-exports (short paths used across the crate)
pub use spatial::grid;
pub use systems::behaviors;
pub use systems::brush;
pub use systems::random;

use wasm_bindgen::prelude::*;

// Re-export wasm-bindgen-rayon for thread pool initialization
#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    crate::core::logging::init_console_logger(crate::core::logging::default_level());
    log::info!("Dune WASM engine {} initialized", env!("CARGO_PKG_VERSION"));
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use domain::{Cell, ColorJitter, ColorSource, Hsl, Rgb};
pub use grid::Grid;
pub use random::{RandomSource, XorShift32};
pub use simulation::{BrushSettings, PerfStats, SimulationSettings, World, WorldCore};

// Export defaults for JS
#[wasm_bindgen]
pub fn empty_cell() -> u32 { Cell::EMPTY.packed() }
#[wasm_bindgen]
pub fn default_particle_size() -> u32 { simulation::settings::DEFAULT_PARTICLE_SIZE }
#[wasm_bindgen]
pub fn max_brush_radius() -> i32 { brush::MAX_BRUSH_RADIUS }
