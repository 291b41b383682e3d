//! Native value handle and type signature types.

use std::fmt;

/// Opaque handle to a native debuggee value owned by the debug engine.
///
/// A `RawValue` can become stale ("neutered") whenever the debuggee resumes
/// execution, including during nested evaluation. The engine reports validity
/// via `DebugEngine::is_handle_valid`; a stale handle must never be read and
/// is released with `DebugEngine::dispose_handle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawValue(u64);

impl RawValue
{
    /// Create a handle from a raw engine value.
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

/// Declared type signature of an argument, local, or generic type argument.
///
/// Stored as the engine-rendered signature text; the core never interprets
/// it, only hands it to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSig(String);

impl TypeSig
{
    /// Wrap a rendered signature.
    pub fn new(text: impl Into<String>) -> Self
    {
        Self(text.into())
    }

    /// Signature text.
    #[must_use]
    pub fn as_str(&self) -> &str
    {
        &self.0
    }
}

impl fmt::Display for TypeSig
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(&self.0)
    }
}
