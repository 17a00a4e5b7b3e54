//! # strview Utilities
//!
//! Shared utilities for strview: logging setup built on `tracing`.
//!
//! The printer core only emits events; installing a subscriber is left to whoever
//! embeds it, through the functions re-exported here.

pub mod logging;

// Re-export commonly used logging functions for convenience
pub use logging::{
    LogFormat, LogLevel, LoggingError, init_logging, init_logging_for_plugin, init_logging_in_dir, init_logging_with_level,
};
pub use tracing::{debug, error, info, trace, warn};
