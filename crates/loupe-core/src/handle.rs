//! # Value Holders
//!
//! Self-healing ownership of native value handles.
//!
//! A [`ValueHolder`] owns at most one engine-side value handle. The handle
//! can be neutered at any time the debuggee executes (on resume, on step, or
//! in the middle of a nested evaluation triggered by the UI), so the holder
//! never trusts its cache: [`ValueHolder::value`] detects a stale handle
//! lazily and transparently re-acquires it from the live frame. Re-acquisition
//! can fail (frame gone, engine not running) and yields "no value" rather
//! than an error.
//!
//! Disposal is explicit and idempotent. Nothing relies on `Drop` releasing
//! engine resources; the tree disposes holders before discarding slots.

use crate::engine::DebugEngine;
use crate::types::{FrameHandle, RawValue};

/// Where a holder re-acquires its handle from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueOrigin
{
    /// Argument slot of the backing frame.
    Argument(u32),
    /// Local slot of the backing frame.
    Local(u32),
    /// Not re-acquirable (the in-flight exception value); once invalid it
    /// stays "no value" until the next synchronize rebinds it.
    Pinned,
}

/// Everything a holder needs to re-resolve itself: the engine plus the frame
/// currently backing the tree (if any).
pub struct ResolveContext<'a>
{
    /// The debug engine.
    pub engine: &'a mut dyn DebugEngine,
    /// Frame the tree is currently bound to.
    pub frame: Option<FrameHandle>,
}

/// Owner of one native value handle with lazy re-resolution.
#[derive(Debug)]
pub struct ValueHolder
{
    origin: ValueOrigin,
    cached: Option<RawValue>,
}

impl ValueHolder
{
    /// Create a holder for an argument or local slot, seeded with the handle
    /// the frame supplied at synchronize time (if any).
    #[must_use]
    pub const fn new(origin: ValueOrigin, initial: Option<RawValue>) -> Self
    {
        Self { origin, cached: initial }
    }

    /// Create a pinned holder for a value that cannot be re-acquired.
    #[must_use]
    pub const fn pinned(value: RawValue) -> Self
    {
        Self {
            origin: ValueOrigin::Pinned,
            cached: Some(value),
        }
    }

    /// Where this holder re-acquires from.
    #[must_use]
    pub const fn origin(&self) -> ValueOrigin
    {
        self.origin
    }

    /// The cached handle without validity checks. Test/diagnostic use only;
    /// readers go through [`ValueHolder::value`].
    #[must_use]
    pub const fn cached(&self) -> Option<RawValue>
    {
        self.cached
    }

    /// Current handle, re-resolving if the cache is empty or stale.
    ///
    /// A stale handle is disposed before the replacement is acquired, so a
    /// neutered handle is never returned and never leaks. Returns `None` when
    /// re-resolution is impossible right now.
    pub fn value(&mut self, cx: &mut ResolveContext<'_>) -> Option<RawValue>
    {
        let stale = match self.cached {
            None => true,
            Some(value) => !cx.engine.is_handle_valid(value),
        };
        if stale {
            self.invalidate(cx.engine);
            self.cached = self.reacquire(cx);
        }
        self.cached
    }

    /// Drop the cached handle and release its engine-side resource.
    ///
    /// Idempotent: safe to call when nothing is cached. A release failure is
    /// logged, not propagated.
    pub fn invalidate(&mut self, engine: &mut dyn DebugEngine)
    {
        if let Some(value) = self.cached.take() {
            if let Err(err) = engine.dispose_handle(value) {
                tracing::warn!("failed to release value handle {:#x}: {err}", value.raw());
            }
        }
    }

    /// Replace the cached handle with a freshly supplied one, releasing the
    /// old handle first.
    pub fn rebind(&mut self, engine: &mut dyn DebugEngine, value: Option<RawValue>)
    {
        self.invalidate(engine);
        self.cached = value;
    }

    /// Release the handle unconditionally. Safe to call multiple times.
    pub fn dispose(&mut self, engine: &mut dyn DebugEngine)
    {
        self.invalidate(engine);
    }

    fn reacquire(&self, cx: &mut ResolveContext<'_>) -> Option<RawValue>
    {
        if !cx.engine.is_debugging() {
            return None;
        }
        let frame = cx.frame?;
        if !cx.engine.is_frame_valid(frame) {
            return None;
        }
        match self.origin {
            ValueOrigin::Argument(index) => cx.engine.argument_handle(frame, index),
            ValueOrigin::Local(index) => cx.engine.local_handle(frame, index),
            ValueOrigin::Pinned => None,
        }
    }
}
