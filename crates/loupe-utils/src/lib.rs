//! # Loupe Utilities
//!
//! Shared utilities and logging for the Loupe workspace.
//!
//! Currently this is the logging infrastructure built on `tracing`: the
//! inspection core emits structured events (tree cleared, shape mismatch,
//! handle release failures) and the host picks a sink and format here.

pub mod logging;

// Re-export commonly used logging functions for convenience
pub use logging::{
    init_logging, init_logging_to_default_file, init_logging_to_file, init_logging_with_level, LogFormat, LogLevel,
};
pub use tracing::{debug, error, info, trace, warn};
