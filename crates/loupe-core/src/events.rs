//! Inspector event types and helpers.
//!
//! Engine notifications, selection changes, settings changes, and re-entrant
//! refresh requests all arrive as discrete [`InspectorEvent`] messages on a
//! single-consumer channel, pumped by the coordinator on the one
//! synchronization point that owns the tree. Notification handlers never
//! mutate the tree directly; they enqueue.

use std::sync::mpsc;

use crate::settings::{InspectorSettings, SettingsChange};
use crate::types::ProcessState;

/// Event delivered to the inspection coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InspectorEvent
{
    /// The debuggee changed execution state.
    ProcessStateChanged(ProcessState),
    /// The stack-frame list was recomputed.
    StackFramesUpdated
    {
        /// A nested evaluation is in flight; structural work must not run.
        evaluating: bool,
        /// The pause was caused by a completed nested evaluation, not by
        /// genuine stepping; only a lightweight refresh is wanted.
        eval_completed: bool,
    },
    /// The selected thread/frame changed.
    FrameSelectionChanged,
    /// The decompiler/symbol pipeline produced new method info.
    NewMethodInfo,
    /// A settings flag changed; carries the fresh snapshot.
    SettingsChanged
    {
        /// Which flag changed.
        change: SettingsChange,
        /// The new settings snapshot.
        settings: InspectorSettings,
    },
    /// Re-entrant refresh raised from value-formatting side effects.
    RefreshRequested,
}

impl InspectorEvent
{
    /// Human-readable description of the event.
    #[must_use]
    pub fn describe(&self) -> String
    {
        match self {
            Self::ProcessStateChanged(state) => format!("Process state changed: {state}"),
            Self::StackFramesUpdated { evaluating, eval_completed } => {
                format!("Stack frames updated (evaluating: {evaluating}, eval completed: {eval_completed})")
            }
            Self::FrameSelectionChanged => "Frame selection changed".to_string(),
            Self::NewMethodInfo => "New method info available".to_string(),
            Self::SettingsChanged { change, .. } => format!("Settings changed: {change:?}"),
            Self::RefreshRequested => "Refresh requested".to_string(),
        }
    }
}

/// Sender side of the inspector event channel.
pub type InspectorEventSender = mpsc::Sender<InspectorEvent>;
/// Receiver side of the inspector event channel.
pub type InspectorEventReceiver = mpsc::Receiver<InspectorEvent>;

/// Create a new inspector event channel.
#[must_use]
pub fn event_channel() -> (InspectorEventSender, InspectorEventReceiver)
{
    mpsc::channel()
}
