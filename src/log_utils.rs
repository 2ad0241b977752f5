//! Internal logging utilities for consistent log formatting across the library
//!
//! This module provides macros that adapt log messages based on feature flags:
//! - `tracing`: Enable/disable all logging (enabled by default)
//! - `plain-logs`: When enabled with `tracing`, uses plain text prefixes instead of emojis
//!
//! ## Usage
//!
//! ```toml
//! # Default: tracing enabled with emojis
//! portfolio-provider = "0.1"
//!
//! # Disable all logging
//! portfolio-provider = { version = "0.1", default-features = false }
//!
//! # Enable tracing with plain text (no emojis)
//! portfolio-provider = { version = "0.1", features = ["plain-logs"] }
//! ```

/// Internal debug logging macro that respects the tracing feature flag
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::debug!($($arg)*);
    };
}

/// Logs an outgoing request (development mode only, decided by the caller)
#[macro_export]
macro_rules! log_request {
    ($($arg:tt)*) => {
        #[cfg(all(feature = "tracing", not(feature = "plain-logs")))]
        tracing::debug!("→ [REQUEST] {}", format!($($arg)*));
        #[cfg(all(feature = "tracing", feature = "plain-logs"))]
        tracing::debug!("[REQUEST] {}", format!($($arg)*));
    };
}

/// Logs the start of a fetch cycle
#[macro_export]
macro_rules! log_fetch_start {
    ($($arg:tt)*) => {
        #[cfg(all(feature = "tracing", not(feature = "plain-logs")))]
        tracing::debug!("🆕 [FETCH] {}", format!($($arg)*));
        #[cfg(all(feature = "tracing", feature = "plain-logs"))]
        tracing::debug!("[FETCH-START] {}", format!($($arg)*));
    };
}

/// Logs a fetch cycle that settled successfully
#[macro_export]
macro_rules! log_fetch_success {
    ($($arg:tt)*) => {
        #[cfg(all(feature = "tracing", not(feature = "plain-logs")))]
        tracing::debug!("✅ [FETCH] {}", format!($($arg)*));
        #[cfg(all(feature = "tracing", feature = "plain-logs"))]
        tracing::debug!("[FETCH-SUCCESS] {}", format!($($arg)*));
    };
}

/// Logs a fetch cycle that settled with an error
#[macro_export]
macro_rules! log_fetch_error {
    ($($arg:tt)*) => {
        #[cfg(all(feature = "tracing", not(feature = "plain-logs")))]
        tracing::warn!("❌ [FETCH] {}", format!($($arg)*));
        #[cfg(all(feature = "tracing", feature = "plain-logs"))]
        tracing::warn!("[FETCH-ERROR] {}", format!($($arg)*));
    };
}

/// Logs a canceled fetch cycle
#[macro_export]
macro_rules! log_fetch_cancel {
    ($($arg:tt)*) => {
        #[cfg(all(feature = "tracing", not(feature = "plain-logs")))]
        tracing::debug!("🛑 [CANCEL] {}", format!($($arg)*));
        #[cfg(all(feature = "tracing", feature = "plain-logs"))]
        tracing::debug!("[CANCEL] {}", format!($($arg)*));
    };
}

/// Logs a mutation start with appropriate formatting
#[macro_export]
macro_rules! log_mutation_start {
    ($($arg:tt)*) => {
        #[cfg(all(feature = "tracing", not(feature = "plain-logs")))]
        tracing::debug!("🔄 [MUTATION] {}", format!($($arg)*));
        #[cfg(all(feature = "tracing", feature = "plain-logs"))]
        tracing::debug!("[MUTATION] {}", format!($($arg)*));
    };
}

/// Logs a mutation success with appropriate formatting
#[macro_export]
macro_rules! log_mutation_success {
    ($($arg:tt)*) => {
        #[cfg(all(feature = "tracing", not(feature = "plain-logs")))]
        tracing::debug!("✅ [MUTATION] {}", format!($($arg)*));
        #[cfg(all(feature = "tracing", feature = "plain-logs"))]
        tracing::debug!("[MUTATION-SUCCESS] {}", format!($($arg)*));
    };
}

/// Logs a mutation error with appropriate formatting
#[macro_export]
macro_rules! log_mutation_error {
    ($($arg:tt)*) => {
        #[cfg(all(feature = "tracing", not(feature = "plain-logs")))]
        tracing::debug!("❌ [MUTATION] {}", format!($($arg)*));
        #[cfg(all(feature = "tracing", feature = "plain-logs"))]
        tracing::debug!("[MUTATION-ERROR] {}", format!($($arg)*));
    };
}

/// Logs a notification lifecycle event
#[macro_export]
macro_rules! log_notify {
    ($($arg:tt)*) => {
        #[cfg(all(feature = "tracing", not(feature = "plain-logs")))]
        tracing::debug!("🔔 [NOTIFY] {}", format!($($arg)*));
        #[cfg(all(feature = "tracing", feature = "plain-logs"))]
        tracing::debug!("[NOTIFY] {}", format!($($arg)*));
    };
}
