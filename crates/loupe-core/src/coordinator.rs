//! # Event Coordinator
//!
//! Owns the [`LocalsTree`] and drives it from the inspector event queue.
//!
//! All engine notifications arrive as [`InspectorEvent`] messages; the host
//! calls [`LocalsCoordinator::pump`] (or [`LocalsCoordinator::handle_event`]
//! directly) on the one synchronization point that is allowed to mutate the
//! tree. No two synchronize passes ever run concurrently: the queue is
//! drained sequentially, and re-entrant refresh requests raised from value
//! side effects are coalesced into at most one queued message.
//!
//! State machine over [`ProcessState`]:
//! - `Starting`/`Terminated`: drop the tracked frame identity and the tree;
//! - `Paused`: full synchronize;
//! - `Continuing`/`Running`: nothing; the tree persists but is presumed
//!   stale for display purposes;
//! - pause via completed nested evaluation (reported on the frames-updated
//!   path): a lightweight refresh that performs no structural work.

use tracing::trace;

use crate::engine::{DebugEngine, Evaluation, FrameSelection};
use crate::events::{self, InspectorEvent, InspectorEventReceiver, InspectorEventSender};
use crate::names::{self, MethodMetadataSource, MethodNameSource, SymbolFileSource};
use crate::settings::{InspectorSettings, SettingsChange, TypePrinterOptions};
use crate::slot::RefreshKind;
use crate::tree::{InitKind, LocalsTree, SyncContext};
use crate::types::{ProcessState, RawValue};

/// Coordinator that reacts to debugger events and keeps the tree in sync.
pub struct LocalsCoordinator
{
    engine: Box<dyn DebugEngine>,
    selection: Box<dyn FrameSelection>,
    metadata: Box<dyn MethodMetadataSource>,
    names: Box<dyn MethodNameSource>,
    symbols: Box<dyn SymbolFileSource>,
    settings: InspectorSettings,
    printer_options: TypePrinterOptions,
    tree: LocalsTree,
    enabled: bool,
    visible: bool,
    refresh_pending: bool,
    sender: InspectorEventSender,
    receiver: InspectorEventReceiver,
}

impl LocalsCoordinator
{
    /// Create a coordinator over the given collaborators.
    ///
    /// Inspection starts disabled; the host enables it when the locals view
    /// becomes active.
    #[must_use]
    pub fn new(
        engine: Box<dyn DebugEngine>,
        selection: Box<dyn FrameSelection>,
        metadata: Box<dyn MethodMetadataSource>,
        names: Box<dyn MethodNameSource>,
        symbols: Box<dyn SymbolFileSource>,
        settings: InspectorSettings,
    ) -> Self
    {
        let (sender, receiver) = events::event_channel();
        Self {
            engine,
            selection,
            metadata,
            names,
            symbols,
            settings,
            printer_options: TypePrinterOptions::from_settings(&settings),
            tree: LocalsTree::new(),
            enabled: false,
            visible: false,
            refresh_pending: false,
            sender,
            receiver,
        }
    }

    /// A sender for delivering events from notification handlers.
    #[must_use]
    pub fn sender(&self) -> InspectorEventSender
    {
        self.sender.clone()
    }

    /// The inspection tree.
    #[must_use]
    pub const fn tree(&self) -> &LocalsTree
    {
        &self.tree
    }

    /// Mutable access to the tree (clearing stale marks after a redraw).
    pub fn tree_mut(&mut self) -> &mut LocalsTree
    {
        &mut self.tree
    }

    /// Whether inspection is enabled.
    #[must_use]
    pub const fn is_enabled(&self) -> bool
    {
        self.enabled
    }

    /// Enable or disable inspection. Disabling tears the tree down; enabling
    /// rebuilds it from the current selection.
    pub fn set_enabled(&mut self, enabled: bool)
    {
        if self.enabled != enabled {
            self.enabled = enabled;
            self.synchronize(InitKind::Full);
        }
    }

    /// Whether the locals view is visible.
    #[must_use]
    pub const fn is_visible(&self) -> bool
    {
        self.visible
    }

    /// Record view visibility.
    pub fn set_visible(&mut self, visible: bool)
    {
        self.visible = visible;
    }

    /// Current settings snapshot.
    #[must_use]
    pub const fn settings(&self) -> &InspectorSettings
    {
        &self.settings
    }

    /// Type-rendering options derived from the current settings.
    #[must_use]
    pub const fn printer_options(&self) -> TypePrinterOptions
    {
        self.printer_options
    }

    /// Drain and handle all queued events. Returns the number handled.
    pub fn pump(&mut self) -> usize
    {
        let mut handled = 0;
        while let Ok(event) = self.receiver.try_recv() {
            trace!(event = %event.describe(), "handling inspector event");
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    /// Handle one inspector event on the owning synchronization point.
    pub fn handle_event(&mut self, event: InspectorEvent)
    {
        match event {
            InspectorEvent::ProcessStateChanged(state) => self.process_state_changed(state),
            InspectorEvent::StackFramesUpdated { evaluating, eval_completed } => {
                self.stack_frames_updated(evaluating, eval_completed);
            }
            InspectorEvent::FrameSelectionChanged => self.synchronize(InitKind::Full),
            InspectorEvent::NewMethodInfo => {
                names::resolve_from_method_info(&mut self.tree, self.names.as_ref());
            }
            InspectorEvent::SettingsChanged { change, settings } => self.settings_changed(change, settings),
            InspectorEvent::RefreshRequested => {
                self.refresh_pending = false;
                self.synchronize(InitKind::Full);
            }
        }
    }

    /// Queue a re-synchronization from within value-formatting side effects.
    ///
    /// Requests raised while one is already queued are dropped, so a burst
    /// of dependent recomputes collapses into a single pass.
    pub fn request_refresh(&mut self)
    {
        if self.refresh_pending {
            trace!("refresh already pending, dropping request");
            return;
        }
        self.refresh_pending = true;
        // Send only fails when the receiver is gone, i.e. during teardown.
        let _ = self.sender.send(InspectorEvent::RefreshRequested);
    }

    /// Mark theme-dependent fields stale on every row.
    pub fn refresh_theme_fields(&mut self)
    {
        self.tree.refresh_presentation(RefreshKind::ThemeFields);
    }

    /// Current value of the row at `index`, re-resolving if stale.
    pub fn slot_value(&mut self, index: usize) -> Option<RawValue>
    {
        self.tree.slot_value(self.engine.as_mut(), index)
    }

    /// Evaluator gate: begin a nested evaluation for string conversion.
    ///
    /// Returns `None` ("cannot evaluate now", not an error) unless a
    /// thread is bound, string-conversion evaluation is permitted by
    /// settings, and the engine both can evaluate and has evaluation
    /// enabled.
    pub fn create_eval(&mut self) -> Option<Evaluation>
    {
        let thread = self.tree.thread()?;
        if !self.settings.can_evaluate_to_string {
            return None;
        }
        if !self.engine.can_evaluate() {
            return None;
        }
        if self.engine.eval_disabled() {
            return None;
        }
        self.engine.create_eval(thread)
    }

    fn process_state_changed(&mut self, state: ProcessState)
    {
        match state {
            ProcessState::Starting | ProcessState::Terminated => {
                self.tree.clear_tracked_frame(self.engine.as_mut());
            }
            ProcessState::Paused => self.synchronize(InitKind::Full),
            ProcessState::Continuing | ProcessState::Running => {}
        }
    }

    fn stack_frames_updated(&mut self, evaluating: bool, eval_completed: bool)
    {
        if evaluating {
            // Mid-evaluation frame churn must not re-enter structural sync.
            trace!("evaluation in flight, ignoring frames update");
            return;
        }
        if self.engine.process_state().is_executing() {
            return;
        }
        let init = if eval_completed { InitKind::Simple } else { InitKind::Full };
        self.synchronize(init);
    }

    fn settings_changed(&mut self, change: SettingsChange, settings: InspectorSettings)
    {
        self.settings = settings;
        self.printer_options = TypePrinterOptions::from_settings(&settings);
        match change {
            SettingsChange::UseHexadecimal => self.tree.refresh_presentation(RefreshKind::HexFields),
            SettingsChange::SyntaxHighlight => self.tree.refresh_presentation(RefreshKind::SyntaxHighlight),
            SettingsChange::UseStringConversion => self.tree.refresh_presentation(RefreshKind::StringConversion),
            SettingsChange::ShowNamespaces | SettingsChange::ShowTokens | SettingsChange::ShowTypeKeywords => {
                self.tree.refresh_presentation(RefreshKind::TypeFields);
            }
            SettingsChange::PropertyEvalAndCalls
            | SettingsChange::BrowsableAttributes
            | SettingsChange::CompilerGeneratedAttributes => self.recreate(),
        }
    }

    /// Structural settings changed: discard everything and rebuild.
    fn recreate(&mut self)
    {
        self.tree.clear_tracked_frame(self.engine.as_mut());
        self.synchronize(InitKind::Full);
    }

    fn synchronize(&mut self, init: InitKind)
    {
        let mut cx = SyncContext {
            engine: self.engine.as_mut(),
            selection: self.selection.as_ref(),
            metadata: self.metadata.as_ref(),
            names: self.names.as_ref(),
            symbols: self.symbols.as_ref(),
        };
        self.tree.synchronize(&mut cx, self.enabled, init);
    }
}
