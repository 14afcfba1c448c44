use super::*;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

impl Grid {
    #[inline]
    pub(super) fn mark_row_filled(&mut self, y: usize) {
        self.row_counts[y] += 1;
        self.occupied += 1;
    }

    #[inline]
    pub(super) fn mark_row_emptied(&mut self, y: usize) {
        self.row_counts[y] = self.row_counts[y].saturating_sub(1);
        self.occupied = self.occupied.saturating_sub(1);
    }

    /// Occupied cells per row, counted from the cells themselves
    pub fn recount_rows(&self) -> Vec<u32> {
        let width = self.width as usize;
        if width == 0 {
            return vec![0; self.height as usize];
        }

        let count_row = |row: &[Cell]| row.iter().filter(|c| !c.is_empty()).count() as u32;

        #[cfg(feature = "parallel")]
        {
            self.cells.par_chunks(width).map(count_row).collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            self.cells.chunks(width).map(count_row).collect()
        }
    }

    /// True when the incremental row counters agree with a full recount
    pub fn counters_consistent(&self) -> bool {
        let rows = self.recount_rows();
        let total: usize = rows.iter().map(|&c| c as usize).sum();
        rows == self.row_counts && total == self.occupied
    }
}
