//! Systems - everything that mutates the grid

pub mod behaviors;
pub mod brush;
pub mod random;
