//! # Error Types
//!
//! Errors reported by the debug-engine boundary.
//!
//! The inspection core itself never surfaces these to its caller: every
//! failure degrades the displayed tree (a slot shows "no value", the tree is
//! rebuilt) rather than propagating. Engine implementations use this type to
//! report faults that the core logs and swallows, and that engine-side
//! tooling may want to inspect.

use thiserror::Error;

use crate::types::RawValue;

/// Fault reported by a debug-engine operation.
#[derive(Error, Debug)]
pub enum EngineError
{
    /// The engine is not attached to / running a debuggee.
    ///
    /// Value re-resolution treats this as "no value"; disposal treats it as
    /// a fault worth logging because the handle table may leak.
    #[error("Debug engine is not running a target")]
    NotDebugging,

    /// A native value handle could not be released.
    #[error("Failed to release value handle {handle:?}: {details}")]
    DisposeFailed
    {
        /// The handle that could not be released.
        handle: RawValue,
        /// Engine-specific description of what went wrong.
        details: String,
    },

    /// I/O error from the engine transport (remote targets, symbol files).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for `Result<T, EngineError>`.
pub type CoreResult<T> = std::result::Result<T, EngineError>;
