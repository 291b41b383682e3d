//! Frame identity types.

use super::MethodKey;

/// Opaque reference to a physical stack frame issued by the debug engine.
///
/// The engine may invalidate the frame behind this handle at any time the
/// debuggee executes; callers must treat every dereference through the engine
/// as fallible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle
{
    /// Create a handle from a raw engine value.
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

/// Logical identity of "which function" is being inspected.
///
/// Equality is by function only: two identities naming the same
/// (module, token) pair are equal no matter which physical frame instance,
/// thread, or recursion depth reported them. That is what lets stepping
/// within one function, or re-entering the same recursive function, keep the
/// user's expanded rows alive instead of rebuilding the tree.
///
/// `Unknown` compares equal to `Unknown`: a frame whose function cannot be
/// resolved is treated as the same "nowhere" across refreshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameIdentity
{
    /// The function backing the frame could not be resolved (no frame
    /// selected, module missing, dynamic code without metadata, ...).
    Unknown,
    /// A resolved (module, function token) pair.
    Function(MethodKey),
}

impl FrameIdentity
{
    /// Returns `true` if the identity names a resolved function.
    #[must_use]
    pub const fn is_known(&self) -> bool
    {
        matches!(self, FrameIdentity::Function(_))
    }

    /// The name-source lookup key, if the function is known.
    #[must_use]
    pub const fn method_key(&self) -> Option<MethodKey>
    {
        match self {
            FrameIdentity::Function(key) => Some(*key),
            FrameIdentity::Unknown => None,
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::types::{MethodToken, ModuleId};

    #[test]
    fn test_unknown_identities_are_equal()
    {
        assert_eq!(FrameIdentity::Unknown, FrameIdentity::Unknown);
    }

    #[test]
    fn test_identity_compares_by_function()
    {
        let key = MethodKey::new(ModuleId::from_raw(7), MethodToken::from_raw(0x0600_0002));
        let other = MethodKey::new(ModuleId::from_raw(7), MethodToken::from_raw(0x0600_0003));
        assert_eq!(FrameIdentity::Function(key), FrameIdentity::Function(key));
        assert_ne!(FrameIdentity::Function(key), FrameIdentity::Function(other));
        assert_ne!(FrameIdentity::Function(key), FrameIdentity::Unknown);
    }
}
