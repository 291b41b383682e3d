//! Event pump and process-state machine behavior.

mod common;

use common::{default_key, fixture, fixture_with, ids, FrameConfig, FRAME};
use loupe_core::settings::TypePrinterOptions;
use loupe_core::types::{FrameIdentity, ProcessState};
use loupe_core::{InspectorEvent, InspectorSettings, SettingsChange};

fn ready(args: usize, locals: usize) -> common::Fixture
{
    let mut fx = fixture();
    fx.pause_on(FrameConfig::with_counts(FrameIdentity::Function(default_key()), args, locals));
    fx.coordinator.set_enabled(true);
    fx
}

#[test]
fn test_starting_and_terminated_drop_the_tree()
{
    for state in [ProcessState::Starting, ProcessState::Terminated] {
        let mut fx = ready(1, 1);
        assert_eq!(fx.coordinator.tree().len(), 2);

        fx.coordinator.handle_event(InspectorEvent::ProcessStateChanged(state));

        assert!(fx.coordinator.tree().is_empty());
        assert_eq!(fx.coordinator.tree().frame_identity(), None);
        assert_eq!(fx.coordinator.tree().thread(), None);
    }
}

#[test]
fn test_resume_states_leave_the_tree_alone()
{
    let mut fx = ready(1, 1);
    let before = ids(fx.coordinator.tree());

    for state in [ProcessState::Continuing, ProcessState::Running] {
        fx.engine.set_process_state(state);
        fx.coordinator.handle_event(InspectorEvent::ProcessStateChanged(state));
        assert_eq!(ids(fx.coordinator.tree()), before);
    }
}

#[test]
fn test_frames_update_ignored_while_evaluating()
{
    let mut fx = ready(1, 0);
    let before = ids(fx.coordinator.tree());

    // The frame list churns mid-evaluation; structural sync must not run.
    fx.engine
        .install_frame(FRAME, FrameConfig::with_counts(FrameIdentity::Function(default_key()), 3, 0));
    fx.coordinator.handle_event(InspectorEvent::StackFramesUpdated {
        evaluating: true,
        eval_completed: false,
    });

    assert_eq!(ids(fx.coordinator.tree()), before);
}

#[test]
fn test_frames_update_ignored_while_executing()
{
    let mut fx = ready(1, 0);
    let before = ids(fx.coordinator.tree());

    fx.engine.set_process_state(ProcessState::Running);
    fx.coordinator.handle_event(InspectorEvent::StackFramesUpdated {
        evaluating: false,
        eval_completed: false,
    });

    assert_eq!(ids(fx.coordinator.tree()), before);
}

#[test]
fn test_completed_eval_refresh_is_not_structural()
{
    let mut fx = ready(2, 0);
    let before: Vec<_> = fx
        .coordinator
        .tree()
        .slots()
        .iter()
        .map(|slot| slot.holder().and_then(|holder| holder.cached()))
        .collect();

    fx.coordinator.handle_event(InspectorEvent::StackFramesUpdated {
        evaluating: false,
        eval_completed: true,
    });

    // No rebinds, no rebuild: the rows still carry the same handles.
    let after: Vec<_> = fx
        .coordinator
        .tree()
        .slots()
        .iter()
        .map(|slot| slot.holder().and_then(|holder| holder.cached()))
        .collect();
    assert_eq!(after, before);
}

#[test]
fn test_genuine_frames_update_resynchronizes()
{
    let mut fx = ready(1, 0);

    fx.engine
        .install_frame(FRAME, FrameConfig::with_counts(FrameIdentity::Function(default_key()), 1, 1));
    fx.coordinator.handle_event(InspectorEvent::StackFramesUpdated {
        evaluating: false,
        eval_completed: false,
    });

    assert_eq!(fx.coordinator.tree().len(), 2);
}

#[test]
fn test_refresh_requests_coalesce()
{
    let mut fx = ready(1, 0);

    fx.coordinator.request_refresh();
    fx.coordinator.request_refresh();
    fx.coordinator.request_refresh();

    assert_eq!(fx.coordinator.pump(), 1);

    // Once drained, a new request queues again.
    fx.coordinator.request_refresh();
    assert_eq!(fx.coordinator.pump(), 1);
}

#[test]
fn test_pump_drains_queued_events_in_order()
{
    let mut fx = ready(1, 0);
    let sender = fx.coordinator.sender();

    sender
        .send(InspectorEvent::ProcessStateChanged(ProcessState::Paused))
        .unwrap();
    sender.send(InspectorEvent::NewMethodInfo).unwrap();

    assert_eq!(fx.coordinator.pump(), 2);
    assert_eq!(fx.coordinator.pump(), 0);
}

#[test]
fn test_presentation_settings_mark_rows_stale()
{
    let mut fx = ready(1, 1);
    let settings = InspectorSettings {
        use_hexadecimal: true,
        ..InspectorSettings::default()
    };
    let before = ids(fx.coordinator.tree());

    fx.coordinator.handle_event(InspectorEvent::SettingsChanged {
        change: SettingsChange::UseHexadecimal,
        settings,
    });

    let tree = fx.coordinator.tree();
    assert_eq!(ids(tree), before);
    assert!(tree.slots().iter().all(|slot| slot.stale().hex_fields));
    assert!(!fx.coordinator.printer_options().use_decimal);
}

#[test]
fn test_structural_settings_recreate_the_tree()
{
    let mut fx = ready(1, 1);
    let before = ids(fx.coordinator.tree());
    let settings = InspectorSettings {
        property_eval_and_calls: false,
        ..InspectorSettings::default()
    };

    fx.coordinator.handle_event(InspectorEvent::SettingsChanged {
        change: SettingsChange::PropertyEvalAndCalls,
        settings,
    });

    let after = ids(fx.coordinator.tree());
    assert_eq!(after.len(), 2);
    assert!(before.iter().all(|id| !after.contains(id)));
}

#[test]
fn test_printer_options_follow_settings_snapshot()
{
    let mut fx = ready(0, 0);
    let settings = InspectorSettings {
        show_namespaces: false,
        ..InspectorSettings::default()
    };

    fx.coordinator.handle_event(InspectorEvent::SettingsChanged {
        change: SettingsChange::ShowNamespaces,
        settings,
    });

    assert_eq!(fx.coordinator.printer_options(), TypePrinterOptions::from_settings(&settings));
}

#[test]
fn test_theme_refresh_marks_every_row()
{
    let mut fx = ready(2, 0);

    fx.coordinator.refresh_theme_fields();

    assert!(fx.coordinator.tree().slots().iter().all(|slot| slot.stale().theme_fields));
}

#[test]
fn test_disable_tears_down_and_disposes()
{
    let mut fx = ready(2, 1);
    let issued = fx.engine.issued();
    assert!(!issued.is_empty());

    fx.coordinator.set_enabled(false);

    assert!(fx.coordinator.tree().is_empty());
    let disposed = fx.engine.disposed();
    assert!(issued.iter().all(|value| disposed.contains(value)));
}

#[test]
fn test_eval_gate_grants_with_thread_and_permissions()
{
    let mut fx = ready(1, 0);

    let eval = fx.coordinator.create_eval().expect("all gates open");
    assert_eq!(eval.thread(), common::THREAD);
    assert_eq!(fx.engine.evals(), 1);
}

#[test]
fn test_eval_gate_refuses_without_thread()
{
    let mut fx = fixture();

    assert!(fx.coordinator.create_eval().is_none());
    assert_eq!(fx.engine.evals(), 0);
}

#[test]
fn test_eval_gate_respects_settings()
{
    let settings = InspectorSettings {
        can_evaluate_to_string: false,
        ..InspectorSettings::default()
    };
    let mut fx = fixture_with(settings);
    fx.pause_on(FrameConfig::with_counts(FrameIdentity::Function(default_key()), 1, 0));
    fx.coordinator.set_enabled(true);

    assert!(fx.coordinator.create_eval().is_none());
    assert_eq!(fx.engine.evals(), 0);
}

#[test]
fn test_eval_gate_respects_engine_state()
{
    let mut fx = ready(1, 0);

    fx.engine.state.borrow_mut().can_evaluate = false;
    assert!(fx.coordinator.create_eval().is_none());

    fx.engine.state.borrow_mut().can_evaluate = true;
    fx.engine.state.borrow_mut().eval_disabled = true;
    assert!(fx.coordinator.create_eval().is_none());

    assert_eq!(fx.engine.evals(), 0);
}

#[test]
fn test_visibility_is_tracked_but_passive()
{
    let mut fx = ready(1, 0);
    assert!(!fx.coordinator.is_visible());

    fx.coordinator.set_visible(true);

    assert!(fx.coordinator.is_visible());
    assert_eq!(fx.coordinator.tree().len(), 1);
}
