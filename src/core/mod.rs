//! Core plumbing shared by every layer

pub mod logging;
