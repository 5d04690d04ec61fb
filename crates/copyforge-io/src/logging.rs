//! Console logging setup.
//!
//! `tracing` events from every crate, including the session's
//! `copyforge_session::transition` events, go to the browser console
//! through `tracing-wasm`.

use tracing::Level;
use tracing_wasm::{WASMLayerConfig, WASMLayerConfigBuilder};

/// Level used by the app: everything in debug builds, warnings and up
/// in release builds.
#[must_use]
pub const fn default_level() -> Level {
    if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::WARN
    }
}

fn config(level: Level) -> WASMLayerConfig {
    WASMLayerConfigBuilder::new()
        .set_max_level(level)
        .set_report_logs_in_timings(false)
        .build()
}

/// Install the console subscriber as the global default. Call once,
/// before launching the app.
pub fn init(level: Level) {
    tracing_wasm::set_as_global_default_with_config(config(level));
}
