// Library surface for the binary and for headless/integration tests.
pub mod app_dirs;
pub mod asset;
pub mod config;
pub mod error;
pub mod logger;
pub mod placer;
pub mod runtime;
pub mod sequencer;
pub mod session;
pub mod trial;
pub mod ui;
