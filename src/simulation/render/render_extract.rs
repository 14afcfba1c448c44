//! Pixel extraction for the canvas
//!
//! Scales every cell into a `particle_size × particle_size` block of RGBA bytes
//! over the background color. The output is `(width * ps) × (height * ps)` pixels,
//! row-major, ready for `new ImageData(...)` on the JS side.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::domain::{Cell, Rgb};

use super::{PerfTimer, WorldCore};

const BYTES_PER_PIXEL: usize = 4;

pub(super) fn pixel_width(world: &WorldCore) -> u32 {
    world.grid.width() * world.grid.particle_size()
}

pub(super) fn pixel_height(world: &WorldCore) -> u32 {
    world.grid.height() * world.grid.particle_size()
}

pub(super) fn render_pixels(world: &mut WorldCore) -> *const u8 {
    let t0 = if world.perf_enabled { Some(PerfTimer::start()) } else { None };

    let width = world.grid.width() as usize;
    let ps = world.grid.particle_size() as usize;
    let needed = pixel_width(world) as usize * pixel_height(world) as usize * BYTES_PER_PIXEL;
    if world.render.pixels.len() != needed {
        world.render.pixels.resize(needed, 0);
    }

    if needed > 0 {
        // One band = all pixel rows covered by one row of cells
        let band_len = width * ps * BYTES_PER_PIXEL * ps;
        let background = world.background;
        let cells = world.grid.cells();

        #[cfg(feature = "parallel")]
        {
            world
                .render
                .pixels
                .par_chunks_mut(band_len)
                .zip(cells.par_chunks(width))
                .for_each(|(band, row)| paint_band(band, row, ps, background));
        }

        #[cfg(not(feature = "parallel"))]
        {
            world
                .render
                .pixels
                .chunks_mut(band_len)
                .zip(cells.chunks(width))
                .for_each(|(band, row)| paint_band(band, row, ps, background));
        }
    }

    if let Some(t0) = t0 {
        world.perf_stats.render_ms = t0.elapsed_ms();
    }

    world.render.pixels.as_ptr()
}

pub(super) fn pixels_len(world: &WorldCore) -> usize {
    world.render.pixels.len()
}

/// Paint the first pixel row of a band, then copy it down `ps - 1` times
fn paint_band(band: &mut [u8], row: &[Cell], ps: usize, background: Rgb) {
    let line_len = row.len() * ps * BYTES_PER_PIXEL;
    let (first, rest) = band.split_at_mut(line_len);

    for (cell, block) in row.iter().zip(first.chunks_exact_mut(ps * BYTES_PER_PIXEL)) {
        let c = cell.color().unwrap_or(background);
        for px in block.chunks_exact_mut(BYTES_PER_PIXEL) {
            px.copy_from_slice(&[c.r, c.g, c.b, 0xFF]);
        }
    }

    for line in rest.chunks_exact_mut(line_len) {
        line.copy_from_slice(first);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_scales_cells_into_blocks() {
        let sand = Rgb::new(200, 150, 50);
        let bg = Rgb::new(1, 2, 3);
        let row = [Cell::occupied(sand), Cell::EMPTY];
        let ps = 2;
        let mut band = vec![0u8; row.len() * ps * BYTES_PER_PIXEL * ps];

        paint_band(&mut band, &row, ps, bg);

        let line = [200, 150, 50, 255, 200, 150, 50, 255, 1, 2, 3, 255, 1, 2, 3, 255];
        assert_eq!(&band[..16], &line);
        assert_eq!(&band[16..], &line);
    }
}
