use super::super::*;
use crate::domain::Rgb;

impl Grid {
    #[inline]
    pub fn is_empty(&self, idx: usize) -> bool {
        self.cells[idx].is_empty()
    }

    #[inline]
    pub fn cell(&self, idx: usize) -> Cell {
        self.cells[idx]
    }

    /// Cell at cell coordinates; EMPTY when out of bounds
    #[inline]
    pub fn cell_at(&self, x: u32, y: u32) -> Cell {
        if !self.in_bounds(x as i64, y as i64) {
            return Cell::EMPTY;
        }
        self.cells[self.index(x, y)]
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Total occupied cells
    #[inline]
    pub fn occupied(&self) -> usize {
        self.occupied
    }

    #[inline]
    pub fn row_occupied(&self, y: u32) -> u32 {
        self.row_counts.get(y as usize).copied().unwrap_or(0)
    }

    // === Writes ===

    /// Write `color` into the cell under canvas pixel (px, py).
    /// Off-grid pixels are dropped; returns whether a cell was written.
    #[inline]
    pub fn set(&mut self, px: i32, py: i32, color: Rgb) -> bool {
        let (cx, cy) = self.pixel_to_cell(px, py);
        if !self.in_bounds(cx, cy) {
            return false;
        }
        self.write(self.index(cx as u32, cy as u32), Cell::occupied(color));
        true
    }

    /// Write a cell by cell coordinates; out-of-bounds writes are dropped
    pub fn set_cell(&mut self, x: u32, y: u32, cell: Cell) -> bool {
        if !self.in_bounds(x as i64, y as i64) {
            return false;
        }
        self.write(self.index(x, y), cell);
        true
    }

    fn write(&mut self, idx: usize, cell: Cell) {
        let was_empty = self.cells[idx].is_empty();
        self.cells[idx] = cell;

        let y = idx / self.width as usize;
        match (was_empty, cell.is_empty()) {
            (true, false) => self.mark_row_filled(y),
            (false, true) => self.mark_row_emptied(y),
            _ => {}
        }
    }
}
