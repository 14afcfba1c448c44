//! Grid - flat cell storage for the sand automaton
//!
//! One `Cell` per slot, row-major (`index = y * width + x`). Each cell covers a
//! `particle_size × particle_size` block of canvas pixels; the grid owns that
//! size because it converts pixel coordinates to cells on every write.
//!
//! Alongside the cells we keep per-row occupancy counts so the update pass can
//! skip empty rows without touching them.

use crate::domain::Cell;

mod indexing;
mod accessors;
mod moves;
mod sparse;

/// Dimensions never collapse below one pixel / one pixel per cell
pub(crate) const MIN_EXTENT: u32 = 1;

pub struct Grid {
    width: u32,
    height: u32,
    size: usize,
    particle_size: u32,

    cells: Vec<Cell>,

    // Occupied cells per row, and their total
    row_counts: Vec<u32>,
    occupied: usize,
}

impl Grid {
    /// Build a grid covering a `pixel_width × pixel_height` canvas
    pub fn new(pixel_width: u32, pixel_height: u32, particle_size: u32) -> Self {
        let particle_size = particle_size.max(MIN_EXTENT);
        Self::with_dimensions(pixel_width / particle_size, pixel_height / particle_size, particle_size)
    }

    /// Build a grid directly from cell dimensions
    pub fn with_dimensions(width: u32, height: u32, particle_size: u32) -> Self {
        let size = (width as usize) * (height as usize);
        Self {
            width,
            height,
            size,
            particle_size: particle_size.max(MIN_EXTENT),
            cells: vec![Cell::EMPTY; size],
            row_counts: vec![0; height as usize],
            occupied: 0,
        }
    }

    /// Replace this grid with a fresh, empty generation
    pub fn initialize(&mut self, pixel_width: u32, pixel_height: u32, particle_size: u32) {
        *self = Grid::new(pixel_width, pixel_height, particle_size);
    }

    /// Empty every cell, keeping the dimensions
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
        self.row_counts.fill(0);
        self.occupied = 0;
    }
}
