//! Behaviors - per-particle movement rules
//!
//! A behavior looks at one cell and may swap it with a neighbor. The scan
//! order (bottom-up, see `simulation::step`) is what keeps every particle to
//! a single move per tick; behaviors only ever look one row down.

mod powder;

pub use powder::PowderBehavior;

use crate::grid::Grid;

/// Update context passed to behaviors
pub struct UpdateContext<'a> {
    pub grid: &'a mut Grid,
    pub index: usize,
}

/// Behavior trait - returns true when the particle moved
pub trait Behavior {
    fn update(&self, ctx: &mut UpdateContext) -> bool;
}
