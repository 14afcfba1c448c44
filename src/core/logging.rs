//! Console logging
//!
//! Routes the `log` facade to the browser console through `console_log`.
//! Installed once by `init()`; on native targets nothing is installed and the
//! macros are no-ops.

use log::Level;

/// Debug builds log everything down to `debug`, release builds `info` and up
pub fn default_level() -> Level {
    if cfg!(debug_assertions) {
        Level::Debug
    } else {
        Level::Info
    }
}

/// Install the console logger. Later calls keep the first logger.
pub fn init_console_logger(level: Level) {
    // Fails only when a logger is already installed
    let _ = console_log::init_with_level(level);
}
