use std::time::Duration;

use lifeadmin_core::{update, AppState, Effect, Msg, Notifications, ToastKind};

#[test]
fn toasts_stack_in_insertion_order_and_expire_independently() {
    let mut notifications = Notifications::default();
    let first = notifications.notify("one", ToastKind::Success, 10);
    let second = notifications.notify("two", ToastKind::Error, 20);
    let third = notifications.notify("three", ToastKind::Error, 30);

    let messages: Vec<_> = notifications
        .active()
        .iter()
        .map(|toast| toast.message.as_str())
        .collect();
    assert_eq!(messages, vec!["one", "two", "three"]);

    assert!(notifications.expire(second));
    assert!(!notifications.expire(second));
    let ids: Vec<_> = notifications.active().iter().map(|toast| toast.id).collect();
    assert_eq!(ids, vec![first, third]);
    assert_eq!(notifications.active()[1].created_at_ms, 30);
}

#[test]
fn repeated_failures_are_not_capped() {
    let mut state = AppState::new();
    for _ in 0..50 {
        state = update(state, Msg::SubmitClicked).0;
    }
    assert_eq!(state.view().toasts.len(), 50);
}

#[test]
fn toast_records_clock_and_configured_dwell() {
    let state = AppState::with_toast_dwell(Duration::from_millis(1500));
    let (state, _) = update(state, Msg::Tick { now_ms: 1_700_000_000_000 });
    let (state, effects) = update(state, Msg::SubmitClicked);

    assert_eq!(
        effects,
        vec![Effect::ScheduleToastDismiss {
            toast_id: 1,
            after: Duration::from_millis(1500)
        }]
    );
    assert_eq!(
        state.notifications().active()[0].created_at_ms,
        1_700_000_000_000
    );
}

#[test]
fn expiry_message_removes_only_its_toast() {
    let (state, _) = update(AppState::new(), Msg::SubmitClicked);
    let (state, _) = update(state, Msg::SubmitClicked);
    let (mut state, _) = update(state, Msg::ToastExpired { toast_id: 1 });

    let view = state.view();
    assert_eq!(view.toasts.len(), 1);
    assert_eq!(view.toasts[0].id, 2);
    assert!(state.consume_dirty());

    let (mut state, _) = update(state, Msg::ToastExpired { toast_id: 1 });
    assert!(!state.consume_dirty());
}

#[test]
fn backend_probe_reports_through_toasts() {
    let (state, effects) = update(AppState::new(), Msg::StatusRequested);
    assert_eq!(effects, vec![Effect::ProbeBackend]);

    let (state, _) = update(
        state,
        Msg::BackendProbed(Ok("LifeAdmin AI backend is running".to_string())),
    );
    let (state, _) = update(state, Msg::BackendProbed(Err("connection refused".to_string())));
    let view = state.view();
    assert_eq!(view.toasts[0].message, "Backend: LifeAdmin AI backend is running");
    assert_eq!(view.toasts[0].kind, ToastKind::Success);
    assert_eq!(view.toasts[1].message, "Backend unreachable: connection refused");
    assert_eq!(view.toasts[1].kind, ToastKind::Error);
}
