//! Spatial storage

pub mod grid;
