//! # loupe-core
//!
//! Locals and value-inspection core for the Loupe debugger frontend.
//!
//! Given a live, paused debuggee, this crate builds and continuously
//! re-synchronizes a tree of inspectable values (the current exception,
//! method arguments, local variables, and open generic type/method
//! parameters) for the currently selected stack frame. The hard part is not
//! producing rows: it is keeping a persistent, user-expandable tree correct
//! and stable across a stream of asynchronous debugger events, while the
//! native value handles behind the rows go stale at unpredictable times and
//! must be lazily and safely re-acquired.
//!
//! ## Structure
//!
//! - [`handle`]: self-healing ownership of native value handles
//! - [`tree`]: the reconciler (canonical shape, in-place patching, rebuilds)
//! - [`names`]: ranked display-name resolution for arguments and locals
//! - [`coordinator`]: the event pump and process-state machine
//! - [`engine`]: traits the host implements against its debug engine
//!
//! ## Failure model
//!
//! Nothing in this crate is fatal: transient unavailability degrades a row
//! to "no value", a shape mismatch rebuilds the tree locally, and refused
//! evaluation shows up as an absent evaluator. Callers never see errors
//! propagate out of the synchronization path.

pub mod coordinator;
pub mod engine;
pub mod error;
pub mod events;
pub mod handle;
pub mod names;
pub mod settings;
pub mod slot;
pub mod tree;
pub mod types;

pub use coordinator::LocalsCoordinator;
// Re-export commonly used types
pub use engine::{DebugEngine, Evaluation, FrameSelection};
pub use error::{CoreResult, EngineError};
pub use events::{event_channel, InspectorEvent};
pub use names::{MethodMetadataSource, MethodNameSource, SymbolFileSource};
pub use settings::{InspectorSettings, SettingsChange};
pub use tree::{InitKind, LocalsTree};
pub use types::{FrameIdentity, MethodKey, ProcessState};
