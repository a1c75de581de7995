#![deny(missing_docs)]
//! Shared logging utilities for the LifeAdmin client workspace.
//!
//! This crate provides the `client_*` logging macros used across the codebase,
//! a per-thread submission tag that is prefixed to every line logged while an
//! upload is in flight, and a minimal test initializer for the global logger.

use std::cell::Cell;

#[doc(hidden)]
pub use log;

thread_local! {
    /// Submission currently being processed on this thread, if any.
    static SUBMISSION: Cell<Option<u64>> = const { Cell::new(None) };
}

/// Tags subsequent log lines on the current thread with a submission id.
/// Pass `None` once the submission has settled.
pub fn set_submission(submission: Option<u64>) {
    SUBMISSION.with(|v| v.set(submission));
}

/// Returns the submission tag for the current thread, if one is set.
pub fn current_submission() -> Option<u64> {
    SUBMISSION.with(|v| v.get())
}

/// Prefix rendered in front of log lines, e.g. `"[upload#3] "`.
#[doc(hidden)]
pub fn submission_prefix() -> String {
    match current_submission() {
        Some(id) => format!("[upload#{id}] "),
        None => String::new(),
    }
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! client_trace {
    ($($arg:tt)*) => {{
        $crate::log::trace!("{}{}", $crate::submission_prefix(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! client_debug {
    ($($arg:tt)*) => {{
        $crate::log::debug!("{}{}", $crate::submission_prefix(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! client_info {
    ($($arg:tt)*) => {{
        $crate::log::info!("{}{}", $crate::submission_prefix(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! client_warn {
    ($($arg:tt)*) => {{
        $crate::log::warn!("{}{}", $crate::submission_prefix(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! client_error {
    ($($arg:tt)*) => {{
        $crate::log::error!("{}{}", $crate::submission_prefix(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Another test may already own the global logger.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
