//! # Debug Engine Interface
//!
//! Traits for the external collaborators the inspection core consumes.
//!
//! The core never talks to a concrete debugger backend. Everything it needs
//! from the engine (process state, value handles for a frame, declared
//! types, handle validity and disposal) goes through [`DebugEngine`], and
//! the currently selected thread/frame comes from a [`FrameSelection`]
//! provider. Host frontends implement these against their actual engine.
//!
//! ## Failure model
//!
//! Lookups return `Option`: a value, frame, or thread that is momentarily
//! unreachable is "not available now", not an error (the tree degrades, see
//! the crate docs). Only handle disposal returns a `Result`, because a failed
//! release can leak engine-side resources and is worth reporting; the core
//! logs such faults and carries on.

use crate::error::CoreResult;
use crate::types::{FrameHandle, FrameIdentity, ProcessState, RawValue, ThreadId, TypeSig};

/// Token for a nested debuggee evaluation granted by the engine.
///
/// Obtained through the coordinator's eval gate; absence of a token means
/// "cannot evaluate now" and is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation
{
    thread: ThreadId,
}

impl Evaluation
{
    /// Create a token bound to the thread the evaluation will run on.
    #[must_use]
    pub const fn new(thread: ThreadId) -> Self
    {
        Self { thread }
    }

    /// Thread the evaluation is bound to.
    #[must_use]
    pub const fn thread(self) -> ThreadId
    {
        self.thread
    }
}

/// Main interface onto the debug engine.
///
/// Mutable methods may allocate or release engine-side resources (value
/// handles, evaluation slots); read-only methods are pure queries against the
/// engine's current view of the debuggee.
pub trait DebugEngine
{
    /// Current execution state of the debuggee.
    fn process_state(&self) -> ProcessState;

    /// Whether the engine is actively running a target.
    ///
    /// Value re-resolution refuses to touch the engine when this is `false`.
    fn is_debugging(&self) -> bool;

    /// Whether the engine is in a state where nested evaluation is possible.
    fn can_evaluate(&self) -> bool;

    /// Whether evaluation has been disabled (e.g. after a previous abort).
    fn eval_disabled(&self) -> bool;

    /// First thread of the debuggee, used as a fallback when no thread is
    /// selected.
    fn first_thread(&self) -> Option<ThreadId>;

    /// Whether the frame behind `frame` still refers to live debuggee state.
    fn is_frame_valid(&self, frame: FrameHandle) -> bool;

    /// Identity of the function executing in `frame`.
    ///
    /// Returns [`FrameIdentity::Unknown`] when the function or its module
    /// cannot be resolved.
    fn frame_identity(&self, frame: FrameHandle) -> FrameIdentity;

    /// Ordered argument handles for `frame`.
    ///
    /// Empty when the frame cannot supply an argument list.
    fn argument_handles(&mut self, frame: FrameHandle) -> Vec<RawValue>;

    /// Ordered local-slot handles for `frame`.
    ///
    /// Empty when the frame cannot supply a local list.
    fn local_handles(&mut self, frame: FrameHandle) -> Vec<RawValue>;

    /// Re-acquire the handle for a single argument slot.
    fn argument_handle(&mut self, frame: FrameHandle, index: u32) -> Option<RawValue>;

    /// Re-acquire the handle for a single local slot.
    fn local_handle(&mut self, frame: FrameHandle, index: u32) -> Option<RawValue>;

    /// Handle for the exception currently in flight on `thread`, if any.
    fn current_exception(&mut self, thread: ThreadId) -> Option<RawValue>;

    /// Declared argument and local type signatures for `frame`.
    ///
    /// Either list may be shorter than the corresponding handle list when the
    /// frame could not supply full type metadata.
    fn declared_types(&self, frame: FrameHandle) -> (Vec<TypeSig>, Vec<TypeSig>);

    /// Number of open generic type + method arguments in scope for `frame`.
    fn generic_argument_count(&self, frame: FrameHandle) -> usize;

    /// The generic type/method arguments themselves, for expanding the
    /// generic-parameters row on demand.
    fn generic_arguments(&self, frame: FrameHandle) -> Vec<TypeSig>;

    /// Whether `value` still refers to live debuggee memory.
    fn is_handle_valid(&self, value: RawValue) -> bool;

    /// Release the engine-side resource behind `value`.
    ///
    /// ## Errors
    ///
    /// Returns an error when the engine could not release the handle; the
    /// core logs this and continues.
    fn dispose_handle(&mut self, value: RawValue) -> CoreResult<()>;

    /// Begin a nested evaluation on `thread`.
    ///
    /// Returns `None` when the engine cannot evaluate right now. Policy
    /// checks (settings, eval-disabled) live in the coordinator's eval gate,
    /// not here.
    fn create_eval(&mut self, thread: ThreadId) -> Option<Evaluation>;
}

/// Provider of the currently selected thread/frame.
///
/// Raised change notifications arrive as
/// [`crate::events::InspectorEvent::FrameSelectionChanged`]; this trait only
/// answers "what is selected right now".
pub trait FrameSelection
{
    /// Currently selected thread, if any.
    fn selected_thread(&self) -> Option<ThreadId>;

    /// Currently selected frame, if any.
    fn selected_frame(&self) -> Option<FrameHandle>;

    /// Index of the selected frame within its stack trace.
    fn selected_frame_index(&self) -> usize;
}
