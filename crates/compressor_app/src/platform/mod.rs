//! Terminal front end: CLI flags, settings, logging, effect execution and the event loop.
mod app;
mod cli;
mod effects;
mod logging;
mod settings;
mod ui;

pub use app::run_app;
