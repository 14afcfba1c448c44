//! Domain types: cell encoding and colors

pub mod cell;
pub mod color;

pub use cell::Cell;
pub use color::{ColorJitter, ColorSource, Hsl, Rgb, BACKGROUND_RGB, SAND_HSL};
