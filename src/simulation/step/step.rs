use super::scan::process_rows;
use super::{PerfTimer, WorldCore};

/// Advance the simulation by exactly one tick
pub(super) fn step(world: &mut WorldCore) {
    let perf_on = world.perf_enabled;
    let step_start = if perf_on { Some(PerfTimer::start()) } else { None };

    let report = process_rows(&mut world.grid, &world.powder);

    debug_assert!(
        world.grid.counters_consistent(),
        "row occupancy drifted after frame {}",
        world.frame
    );

    if perf_on {
        world.perf_stats.particles_moved = report.moved;
        world.perf_stats.rows_scanned = report.rows_scanned;
        world.perf_stats.rows_skipped = report.rows_skipped;
        world.perf_stats.particle_count = world.grid.occupied() as u32;
        world.perf_stats.grid_size = world.grid.size() as u32;
        if let Some(start) = step_start {
            world.perf_stats.step_ms = start.elapsed_ms();
        }
    }

    world.frame += 1;
}
