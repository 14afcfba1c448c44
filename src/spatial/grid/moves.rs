use super::*;

impl Grid {
    /// Exchange two cells. Both indices must be < `size()`; the update pass
    /// guarantees that by construction, so no bounds handling happens here.
    #[inline]
    pub fn swap(&mut self, a: usize, b: usize) {
        let w = self.width as usize;
        let (ya, yb) = (a / w, b / w);

        if ya != yb {
            match (self.cells[a].is_empty(), self.cells[b].is_empty()) {
                (false, true) => {
                    self.row_counts[ya] -= 1;
                    self.row_counts[yb] += 1;
                }
                (true, false) => {
                    self.row_counts[yb] -= 1;
                    self.row_counts[ya] += 1;
                }
                _ => {}
            }
        }

        self.cells.swap(a, b);
    }
}
