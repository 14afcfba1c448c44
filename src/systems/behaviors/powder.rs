//! PowderBehavior - the sand rule
//!
//! Fall straight down if the cell below is free, otherwise roll diagonally:
//! below-left first, then below-right. Particles on the bottom row rest on the
//! floor. Left-before-right is a fixed priority, not a coin flip.

use super::{Behavior, UpdateContext};

pub struct PowderBehavior;

impl PowderBehavior {
    pub fn new() -> Self {
        Self
    }

    /// Destination for the particle at `idx`, or `None` when it stays put
    #[inline]
    fn target(&self, ctx: &UpdateContext) -> Option<usize> {
        let grid = &*ctx.grid;
        let i = ctx.index;
        let width = grid.width() as usize;

        let below = i + width;
        if below >= grid.size() {
            // Bottom row
            return None;
        }

        if grid.is_empty(below) {
            return Some(below);
        }

        let x = i % width;
        if x > 0 && grid.is_empty(below - 1) {
            return Some(below - 1);
        }
        if x + 1 < width && grid.is_empty(below + 1) {
            return Some(below + 1);
        }

        None
    }
}

impl Default for PowderBehavior {
    fn default() -> Self {
        Self::new()
    }
}

impl Behavior for PowderBehavior {
    fn update(&self, ctx: &mut UpdateContext) -> bool {
        if ctx.grid.is_empty(ctx.index) {
            return false;
        }

        match self.target(ctx) {
            Some(dest) => {
                ctx.grid.swap(ctx.index, dest);
                true
            }
            None => false,
        }
    }
}
