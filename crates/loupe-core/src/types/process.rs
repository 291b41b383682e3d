//! Process, thread, and method identity types.

use std::fmt;

/// Execution state of the debuggee as reported by the debug engine.
///
/// Only [`ProcessState::Paused`] permits a populated inspection tree; every
/// other state either tears the tree down or leaves it untouched (but
/// presumed stale for display purposes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState
{
    /// The debuggee is being launched or attached to.
    Starting,
    /// The debuggee is about to resume execution.
    Continuing,
    /// The debuggee is executing.
    Running,
    /// The debuggee is stopped and can be inspected.
    Paused,
    /// The debuggee has exited.
    Terminated,
}

impl ProcessState
{
    /// Returns `true` if the debuggee is stopped and inspectable.
    #[must_use]
    pub const fn is_paused(self) -> bool
    {
        matches!(self, ProcessState::Paused)
    }

    /// Returns `true` while the debuggee is executing or about to execute.
    #[must_use]
    pub const fn is_executing(self) -> bool
    {
        matches!(self, ProcessState::Continuing | ProcessState::Running)
    }
}

impl fmt::Display for ProcessState
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        let name = match self {
            ProcessState::Starting => "starting",
            ProcessState::Continuing => "continuing",
            ProcessState::Running => "running",
            ProcessState::Paused => "paused",
            ProcessState::Terminated => "terminated",
        };
        f.write_str(name)
    }
}

/// Identifier for a thread in the debuggee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThreadId(u64);

impl ThreadId
{
    /// Create an identifier from a raw engine value.
    #[must_use]
    pub const fn from_raw(value: u64) -> Self
    {
        Self(value)
    }

    /// Raw numeric representation (useful for logging / errors).
    #[must_use]
    pub const fn raw(self) -> u64
    {
        self.0
    }
}

/// Identifier for a loaded module in the debuggee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModuleId(u64);

impl ModuleId
{
    /// Create an identifier from a raw engine value.
    #[must_use]
    pub const fn from_raw(value: u64) -> Self
    {
        Self(value)
    }

    /// Raw numeric representation.
    #[must_use]
    pub const fn raw(self) -> u64
    {
        self.0
    }
}

/// Metadata token of a function within its module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodToken(u32);

impl MethodToken
{
    /// Create a token from its raw metadata value.
    #[must_use]
    pub const fn from_raw(value: u32) -> Self
    {
        Self(value)
    }

    /// Raw token value.
    #[must_use]
    pub const fn raw(self) -> u32
    {
        self.0
    }
}

/// Lookup key for method metadata and name sources: (module, function token).
///
/// This is the key the decompiler/symbol sources are indexed by, and the
/// payload of a known [`super::FrameIdentity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodKey
{
    /// Module containing the function.
    pub module: ModuleId,
    /// Token of the function within the module.
    pub token: MethodToken,
}

impl MethodKey
{
    /// Build a key from its parts.
    #[must_use]
    pub const fn new(module: ModuleId, token: MethodToken) -> Self
    {
        Self { module, token }
    }
}
