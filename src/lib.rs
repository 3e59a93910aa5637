// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod action;
pub mod app_dirs;
pub mod chime;
pub mod config;
pub mod logging;
pub mod plan;
pub mod runtime;
pub mod sequencer;
pub mod session;
pub mod timer;
pub mod workout;
