//! # Types
//!
//! Engine-agnostic types used throughout the inspection core.
//!
//! These types abstract away the concrete debug engine, allowing the
//! reconciler and name resolver to work with concepts like "process state"
//! and "frame identity" without knowing which engine reported them.

pub mod frame;
pub mod process;
pub mod value;

// Re-export all public types
pub use frame::{FrameHandle, FrameIdentity};
pub use process::{MethodKey, MethodToken, ModuleId, ProcessState, ThreadId};
pub use value::{RawValue, TypeSig};
