#![deny(missing_docs)]
//! Shared logging utilities for the compressor workspace.
//!
//! This crate provides the `compressor_*` logging macros used across the
//! codebase, a per-thread request id that tags log lines emitted while a
//! request is being handled, and a minimal test initializer for the global
//! logger.

use std::cell::Cell;

thread_local! {
    /// Request id currently being handled on this thread (0 = none).
    static CURRENT_REQUEST: Cell<u64> = const { Cell::new(0) };
}

/// Marks `request_id` as the request handled by the current thread.
/// Pass 0 to clear it.
pub fn set_current_request(request_id: u64) {
    CURRENT_REQUEST.with(|v| v.set(request_id));
}

/// Returns the request id handled by the current thread, or 0 if none.
pub fn current_request() -> u64 {
    CURRENT_REQUEST.with(|v| v.get())
}

/// Logs a trace-level message, tagged with the current request id.
#[macro_export]
macro_rules! compressor_trace {
    ($($arg:tt)*) => {{
        log::trace!("[req {}] {}", $crate::current_request(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message, tagged with the current request id.
#[macro_export]
macro_rules! compressor_info {
    ($($arg:tt)*) => {{
        log::info!("[req {}] {}", $crate::current_request(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message, tagged with the current request id.
#[macro_export]
macro_rules! compressor_debug {
    ($($arg:tt)*) => {{
        log::debug!("[req {}] {}", $crate::current_request(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message, tagged with the current request id.
#[macro_export]
macro_rules! compressor_warn {
    ($($arg:tt)*) => {{
        log::warn!("[req {}] {}", $crate::current_request(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message, tagged with the current request id.
#[macro_export]
macro_rules! compressor_error {
    ($($arg:tt)*) => {{
        log::error!("[req {}] {}", $crate::current_request(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // A logger may already be installed by another test in this binary.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
