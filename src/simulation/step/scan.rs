use crate::behaviors::{Behavior, UpdateContext};
use crate::grid::Grid;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct ScanReport {
    pub(crate) moved: u32,
    pub(crate) rows_scanned: u32,
    pub(crate) rows_skipped: u32,
}

/// One pass over the grid, last index to first.
///
/// Bottom row first, right to left within a row. A particle only ever moves into
/// the row below, which has already been visited, so nothing is moved twice and
/// nothing falls more than one row per tick.
///
/// A row with no particles when the scan reaches it is skipped whole: rows are
/// only filled from above, and the row above is visited later.
pub(crate) fn process_rows<B: Behavior>(grid: &mut Grid, behavior: &B) -> ScanReport {
    let width = grid.width() as usize;
    let mut report = ScanReport::default();

    for y in (0..grid.height()).rev() {
        if grid.row_occupied(y) == 0 {
            report.rows_skipped += 1;
            continue;
        }
        report.rows_scanned += 1;

        let row_start = y as usize * width;
        for index in (row_start..row_start + width).rev() {
            let mut ctx = UpdateContext { grid: &mut *grid, index };
            if behavior.update(&mut ctx) {
                report.moved += 1;
            }
        }
    }

    report
}
