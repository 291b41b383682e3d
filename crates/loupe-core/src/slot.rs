//! Inspection tree rows.
//!
//! A [`ValueSlot`] is one row of the tree: the current exception, one
//! argument, one local, or the synthetic generic-parameters row. Slots keep a
//! stable [`SlotId`] across in-place patching so the host can track expansion
//! state by identity; a rebuilt tree hands out fresh ids.

use crate::engine::DebugEngine;
use crate::handle::ValueHolder;
use crate::types::{RawValue, TypeSig};

/// Stable identity of a tree row, unique within one tree instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(u64);

impl SlotId
{
    pub(crate) const fn from_raw(value: u64) -> Self
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

/// Kind of a tree row, in canonical order:
/// `[Exception?] ++ Argument(0..) ++ Local(0..) ++ [GenericParameters?]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind
{
    /// The exception currently in flight on the selected thread.
    Exception,
    /// Method argument at the given index (index 0 is the receiver for
    /// instance methods).
    Argument(u32),
    /// Local variable slot at the given index.
    Local(u32),
    /// Synthetic row that expands into the open generic type/method
    /// arguments on demand.
    GenericParameters,
}

impl SlotKind
{
    /// Returns `true` for argument rows.
    #[must_use]
    pub const fn is_argument(self) -> bool
    {
        matches!(self, SlotKind::Argument(_))
    }

    /// Returns `true` for local rows.
    #[must_use]
    pub const fn is_local(self) -> bool
    {
        matches!(self, SlotKind::Local(_))
    }

    /// Argument index, if this is an argument row.
    #[must_use]
    pub const fn argument_index(self) -> Option<u32>
    {
        match self {
            SlotKind::Argument(index) => Some(index),
            _ => None,
        }
    }

    /// Local index, if this is a local row.
    #[must_use]
    pub const fn local_index(self) -> Option<u32>
    {
        match self {
            SlotKind::Local(index) => Some(index),
            _ => None,
        }
    }
}

/// Name resolution state of a slot.
///
/// Rows start unresolved (the view shows a positional placeholder) and take
/// a name when one of the ranked sources produces one. A later, better
/// source may overwrite an earlier name; the per-source "already attempted"
/// flags on the tree prevent re-running a source, not re-naming a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameState
{
    /// No source has produced a name yet.
    Unresolved,
    /// A source produced a name.
    Resolved
    {
        /// Display text (empty for the implicit receiver).
        text: String,
        /// The row is the implicit `this`/receiver argument.
        receiver: bool,
    },
}

/// Presentation aspects a settings/theme change has marked stale.
///
/// The core flips these; the host clears them when it redraws the row.
/// Structural state is untouched by presentation refreshes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaleMask
{
    /// Rendered type text needs a redraw.
    pub type_fields: bool,
    /// Numeric rendering (hex/decimal) needs a redraw.
    pub hex_fields: bool,
    /// Theme colors need a redraw.
    pub theme_fields: bool,
    /// Syntax-highlight spans need a redraw.
    pub syntax_highlight: bool,
    /// String-conversion result needs a redraw.
    pub string_conversion: bool,
}

/// Which presentation aspect a refresh touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshKind
{
    /// Type display (namespaces, tokens, keywords).
    TypeFields,
    /// Hexadecimal/decimal display.
    HexFields,
    /// Theme colors.
    ThemeFields,
    /// Syntax highlighting.
    SyntaxHighlight,
    /// String-conversion display.
    StringConversion,
}

/// One row of the inspection tree.
#[derive(Debug)]
pub struct ValueSlot
{
    id: SlotId,
    kind: SlotKind,
    name: NameState,
    declared_type: Option<TypeSig>,
    holder: Option<ValueHolder>,
    stale: StaleMask,
}

impl ValueSlot
{
    pub(crate) fn new(id: SlotId, kind: SlotKind, holder: Option<ValueHolder>, declared_type: Option<TypeSig>) -> Self
    {
        Self {
            id,
            kind,
            name: NameState::Unresolved,
            declared_type,
            holder,
            stale: StaleMask::default(),
        }
    }

    /// Stable identity of this row.
    #[must_use]
    pub const fn id(&self) -> SlotId
    {
        self.id
    }

    /// Kind of this row.
    #[must_use]
    pub const fn kind(&self) -> SlotKind
    {
        self.kind
    }

    /// Current name state.
    #[must_use]
    pub const fn name(&self) -> &NameState
    {
        &self.name
    }

    /// Resolved display name, if any source produced one.
    #[must_use]
    pub fn display_name(&self) -> Option<&str>
    {
        match &self.name {
            NameState::Resolved { text, .. } => Some(text),
            NameState::Unresolved => None,
        }
    }

    /// Whether this row is the implicit receiver argument.
    #[must_use]
    pub fn is_receiver(&self) -> bool
    {
        matches!(self.name, NameState::Resolved { receiver: true, .. })
    }

    /// Declared type signature, if the frame supplied type metadata.
    #[must_use]
    pub const fn declared_type(&self) -> Option<&TypeSig>
    {
        self.declared_type.as_ref()
    }

    /// The value holder backing this row (absent for the synthetic
    /// generic-parameters row).
    #[must_use]
    pub const fn holder(&self) -> Option<&ValueHolder>
    {
        self.holder.as_ref()
    }

    pub(crate) fn holder_mut(&mut self) -> Option<&mut ValueHolder>
    {
        self.holder.as_mut()
    }

    /// Presentation aspects currently marked stale.
    #[must_use]
    pub const fn stale(&self) -> StaleMask
    {
        self.stale
    }

    pub(crate) fn set_name(&mut self, text: String, receiver: bool)
    {
        self.name = NameState::Resolved { text, receiver };
    }

    /// Rebind this row to freshly supplied frame data without changing its
    /// identity. The old handle is released first.
    pub(crate) fn reinitialize(&mut self, engine: &mut dyn DebugEngine, value: Option<RawValue>, declared_type: Option<TypeSig>)
    {
        if let Some(holder) = self.holder.as_mut() {
            holder.rebind(engine, value);
        }
        self.declared_type = declared_type;
    }

    /// Mark one presentation aspect stale.
    pub fn mark_stale(&mut self, kind: RefreshKind)
    {
        match kind {
            RefreshKind::TypeFields => self.stale.type_fields = true,
            RefreshKind::HexFields => self.stale.hex_fields = true,
            RefreshKind::ThemeFields => self.stale.theme_fields = true,
            RefreshKind::SyntaxHighlight => self.stale.syntax_highlight = true,
            RefreshKind::StringConversion => self.stale.string_conversion = true,
        }
    }

    /// Clear all stale marks after a redraw.
    pub fn clear_stale(&mut self)
    {
        self.stale = StaleMask::default();
    }

    /// Release the engine-side handle behind this row. Idempotent.
    pub(crate) fn dispose(&mut self, engine: &mut dyn DebugEngine)
    {
        if let Some(holder) = self.holder.as_mut() {
            holder.dispose(engine);
        }
    }
}
