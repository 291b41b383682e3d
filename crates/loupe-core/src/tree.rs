//! # Tree Reconciler
//!
//! The central state machine of the crate. [`LocalsTree`] owns the ordered
//! rows of the inspection tree and, on every qualifying debugger event,
//! re-synchronizes them against the currently selected frame: it computes the
//! desired canonical shape
//! `[Exception?] ++ Argument×N ++ Local×M ++ [GenericParameters?]` and either
//! patches the existing rows in place, preserving row identity (and with it
//! any expansion state the host tracks), or discards everything and rebuilds.
//!
//! ## Reuse rules
//!
//! Rows survive a refresh only when both gates pass:
//! - the frame identity (function, not frame instance) is unchanged, and
//! - the existing row sequence matches the canonical shape for the new
//!   counts, walked slot by slot.
//!
//! The one tolerated difference is the leading exception row, which may
//! appear or vanish between pauses and is inserted/removed in place.
//!
//! ## Resource rules
//!
//! The tree exclusively owns the live native handles of its rows. Every
//! clear disposes them before the rows are discarded, and an in-place rebind
//! disposes the old handle before the replacement is stored.

use tracing::{debug, trace};

use crate::engine::{DebugEngine, FrameSelection};
use crate::handle::{ResolveContext, ValueHolder, ValueOrigin};
use crate::names::{self, MethodMetadataSource, MethodNameSource, SymbolFileSource};
use crate::slot::{RefreshKind, SlotId, SlotKind, ValueSlot};
use crate::types::{FrameHandle, FrameIdentity, RawValue, ThreadId, TypeSig};

/// How much work a synchronize pass is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitKind
{
    /// Full structural synchronization, evaluating expressions if needed.
    Full,
    /// The pause was caused by a completed nested evaluation; values are
    /// expected unchanged and no structural work runs.
    Simple,
}

/// Per-tree "already attempted" flags for the ranked name sources.
///
/// Reset exactly when the tree is rebuilt from empty. A source that ran but
/// resolved nothing stays committed for the tree's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NameSourceFlags
{
    /// Decompiler/live source produced argument names.
    pub provider_arg_names: bool,
    /// Decompiler/live source produced local names.
    pub provider_local_names: bool,
    /// Metadata fallback for arguments was attempted.
    pub metadata_arg_names: bool,
    /// Symbol-file fallback for locals was attempted.
    pub symbol_file_local_names: bool,
}

/// Borrowed collaborators a synchronize pass works against.
pub struct SyncContext<'a>
{
    /// The debug engine.
    pub engine: &'a mut dyn DebugEngine,
    /// Current thread/frame selection.
    pub selection: &'a dyn FrameSelection,
    /// Declared-metadata name source.
    pub metadata: &'a dyn MethodMetadataSource,
    /// Decompiler/live name source.
    pub names: &'a dyn MethodNameSource,
    /// Debug-symbol-file name source.
    pub symbols: &'a dyn SymbolFileSource,
}

/// The inspection tree and its reconciliation state.
pub struct LocalsTree
{
    pub(crate) slots: Vec<ValueSlot>,
    pub(crate) identity: Option<FrameIdentity>,
    pub(crate) name_flags: NameSourceFlags,
    frame: Option<FrameHandle>,
    thread: Option<ThreadId>,
    next_slot_id: u64,
}

impl LocalsTree
{
    /// Create an empty tree with no tracked frame.
    #[must_use]
    pub fn new() -> Self
    {
        Self {
            slots: Vec::new(),
            identity: None,
            name_flags: NameSourceFlags::default(),
            frame: None,
            thread: None,
            next_slot_id: 0,
        }
    }

    /// Current rows, in canonical order.
    #[must_use]
    pub fn slots(&self) -> &[ValueSlot]
    {
        &self.slots
    }

    /// Mutable access to the rows (presentation-state updates).
    pub fn slots_mut(&mut self) -> &mut [ValueSlot]
    {
        &mut self.slots
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize
    {
        self.slots.len()
    }

    /// Returns `true` if the tree has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool
    {
        self.slots.is_empty()
    }

    /// Identity of the function the tree is bound to, if one is tracked.
    #[must_use]
    pub const fn frame_identity(&self) -> Option<FrameIdentity>
    {
        self.identity
    }

    /// Frame backing value re-resolution, if one is tracked.
    #[must_use]
    pub const fn frame(&self) -> Option<FrameHandle>
    {
        self.frame
    }

    /// Thread the tree is bound to (used for the evaluator gate).
    #[must_use]
    pub const fn thread(&self) -> Option<ThreadId>
    {
        self.thread
    }

    /// Current name-source flags (inspection/testing).
    #[must_use]
    pub const fn name_flags(&self) -> NameSourceFlags
    {
        self.name_flags
    }

    /// Synchronize the tree against the current selection.
    ///
    /// This is the single entry point invoked after every qualifying
    /// debugger event. Failures never escape: a missing frame degrades the
    /// counts to zero, a shape mismatch rebuilds locally.
    pub fn synchronize(&mut self, cx: &mut SyncContext<'_>, enabled: bool, init: InitKind)
    {
        if !enabled || !cx.engine.process_state().is_paused() {
            self.clear_tracked_frame(cx.engine);
            return;
        }

        if init == InitKind::Simple {
            // Nested evaluation completed; values are unchanged.
            trace!("simple refresh, skipping structural sync");
            return;
        }

        let thread = cx.selection.selected_thread().or_else(|| cx.engine.first_thread());
        let frame = cx.selection.selected_frame();
        let new_identity = frame.map_or(FrameIdentity::Unknown, |f| cx.engine.frame_identity(f));

        if self.identity != Some(new_identity) {
            debug!(?new_identity, "frame identity changed, discarding rows");
            self.clear_slots(cx.engine);
        }
        self.identity = Some(new_identity);
        self.frame = frame;
        self.thread = thread;

        let (args, locals) = match frame {
            Some(f) => (cx.engine.argument_handles(f), cx.engine.local_handles(f)),
            None => (Vec::new(), Vec::new()),
        };
        let exception = thread.and_then(|t| cx.engine.current_exception(t));
        let generic_count = frame.map_or(0, |f| cx.engine.generic_argument_count(f));

        if !self.can_reuse_children(args.len(), locals.len(), generic_count) {
            debug!(
                args = args.len(),
                locals = locals.len(),
                generics = generic_count,
                "tree shape incompatible, discarding rows"
            );
            self.clear_slots(cx.engine);
        }
        if self.slots.is_empty() {
            self.name_flags = NameSourceFlags::default();
        }

        let (arg_types, local_types) = frame.map_or_else(|| (Vec::new(), Vec::new()), |f| cx.engine.declared_types(f));

        if self.slots.is_empty() {
            self.build(exception, &args, &locals, &arg_types, &local_types, generic_count);
        } else {
            self.patch(cx.engine, exception, &args, &locals, &arg_types, &local_types, generic_count);
        }

        names::resolve_slot_names(self, cx.metadata, cx.names, cx.symbols);
    }

    /// Dispose every row and forget the tracked frame.
    pub fn clear_tracked_frame(&mut self, engine: &mut dyn DebugEngine)
    {
        self.clear_slots(engine);
        self.identity = None;
        self.frame = None;
        self.thread = None;
    }

    /// Dispose and drop all rows. Name flags are reset later, by the rebuild
    /// from empty, so a cleared-but-not-resynced tree keeps its commitments.
    pub(crate) fn clear_slots(&mut self, engine: &mut dyn DebugEngine)
    {
        if self.slots.is_empty() {
            return;
        }
        debug!(rows = self.slots.len(), "disposing inspection rows");
        for slot in &mut self.slots {
            slot.dispose(engine);
        }
        self.slots.clear();
    }

    /// Current value of the row at `index`, re-resolving its handle from the
    /// backing frame if the cached one went stale.
    pub fn slot_value(&mut self, engine: &mut dyn DebugEngine, index: usize) -> Option<RawValue>
    {
        let frame = self.frame;
        let slot = self.slots.get_mut(index)?;
        let holder = slot.holder_mut()?;
        holder.value(&mut ResolveContext { engine, frame })
    }

    /// Child type arguments of the generic-parameters row, fetched on
    /// demand.
    #[must_use]
    pub fn expand_generic_parameters(&self, engine: &dyn DebugEngine) -> Vec<TypeSig>
    {
        match self.frame {
            Some(frame) => engine.generic_arguments(frame),
            None => Vec::new(),
        }
    }

    /// Mark one presentation aspect stale on every row.
    pub fn refresh_presentation(&mut self, kind: RefreshKind)
    {
        for slot in &mut self.slots {
            slot.mark_stale(kind);
        }
    }

    /// Walk the existing rows against the canonical shape for the new
    /// counts. A leading exception row is skipped unconditionally; its
    /// presence may differ and is reconciled by the patch phase.
    fn can_reuse_children(&self, num_args: usize, num_locals: usize, num_generics: usize) -> bool
    {
        let mut index = 0;

        if self.slots.get(index).is_some_and(|slot| slot.kind() == SlotKind::Exception) {
            index += 1;
        }

        if index + num_args + num_locals > self.slots.len() {
            return false;
        }
        for _ in 0..num_args {
            if !self.slots[index].kind().is_argument() {
                return false;
            }
            index += 1;
        }
        for _ in 0..num_locals {
            if !self.slots[index].kind().is_local() {
                return false;
            }
            index += 1;
        }

        if num_generics != 0 {
            if index >= self.slots.len() {
                return false;
            }
            if self.slots[index].kind() != SlotKind::GenericParameters {
                return false;
            }
            index += 1;
        }

        index == self.slots.len()
    }

    /// Build the tree fresh, in canonical order.
    fn build(
        &mut self,
        exception: Option<RawValue>,
        args: &[RawValue],
        locals: &[RawValue],
        arg_types: &[TypeSig],
        local_types: &[TypeSig],
        generic_count: usize,
    )
    {
        debug_assert!(self.slots.is_empty());

        if let Some(value) = exception {
            let id = self.alloc_slot_id();
            self.slots
                .push(ValueSlot::new(id, SlotKind::Exception, Some(ValueHolder::pinned(value)), None));
        }
        for (i, value) in args.iter().enumerate() {
            let index = i as u32;
            let id = self.alloc_slot_id();
            self.slots.push(ValueSlot::new(
                id,
                SlotKind::Argument(index),
                Some(ValueHolder::new(ValueOrigin::Argument(index), Some(*value))),
                read(arg_types, i),
            ));
        }
        for (i, value) in locals.iter().enumerate() {
            let index = i as u32;
            let id = self.alloc_slot_id();
            self.slots.push(ValueSlot::new(
                id,
                SlotKind::Local(index),
                Some(ValueHolder::new(ValueOrigin::Local(index), Some(*value))),
                read(local_types, i),
            ));
        }
        if generic_count != 0 {
            let id = self.alloc_slot_id();
            self.slots.push(ValueSlot::new(id, SlotKind::GenericParameters, None, None));
        }
    }

    /// Patch a shape-compatible tree in place, keeping row identities.
    fn patch(
        &mut self,
        engine: &mut dyn DebugEngine,
        exception: Option<RawValue>,
        args: &[RawValue],
        locals: &[RawValue],
        arg_types: &[TypeSig],
        local_types: &[TypeSig],
        generic_count: usize,
    )
    {
        let mut index = 0;

        // The exception row is the one place where presence may change
        // between two compatible shapes.
        match exception {
            Some(value) => {
                if self.slots.get(index).is_some_and(|slot| slot.kind() == SlotKind::Exception) {
                    self.slots[index].reinitialize(engine, Some(value), None);
                } else {
                    let id = self.alloc_slot_id();
                    self.slots.insert(
                        index,
                        ValueSlot::new(id, SlotKind::Exception, Some(ValueHolder::pinned(value)), None),
                    );
                }
                index += 1;
            }
            None => {
                if self.slots.get(index).is_some_and(|slot| slot.kind() == SlotKind::Exception) {
                    let mut slot = self.slots.remove(index);
                    slot.dispose(engine);
                }
            }
        }

        for (i, value) in args.iter().enumerate() {
            self.slots[index].reinitialize(engine, Some(*value), read(arg_types, i));
            index += 1;
        }
        for (i, value) in locals.iter().enumerate() {
            self.slots[index].reinitialize(engine, Some(*value), read(local_types, i));
            index += 1;
        }
        if generic_count != 0 {
            // The synthetic row holds no handle; nothing to rebind.
            index += 1;
        }

        debug_assert_eq!(index, self.slots.len());
    }

    fn alloc_slot_id(&mut self) -> SlotId
    {
        let id = SlotId::from_raw(self.next_slot_id);
        self.next_slot_id += 1;
        id
    }
}

impl Default for LocalsTree
{
    fn default() -> Self
    {
        Self::new()
    }
}

/// Out-of-range tolerant read, for type lists shorter than the handle lists.
fn read<T: Clone>(list: &[T], index: usize) -> Option<T>
{
    list.get(index).cloned()
}
