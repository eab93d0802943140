use compressor_core::{update, AppState, Msg};

#[test]
fn tick_is_noop() {
    let state = AppState::new(None);
    let (next, effects) = update(state.clone(), Msg::Tick);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn teardown_without_artifact_is_noop() {
    let state = AppState::new(Some("cmp-1".to_string()));
    let (next, effects) = update(state.clone(), Msg::Teardown);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn second_mount_does_not_reload() {
    let (mut loading, effects) = update(AppState::new(None), Msg::Mounted);
    assert_eq!(effects.len(), 1);
    loading.consume_dirty();

    let (next, effects) = update(loading.clone(), Msg::Mounted);
    assert_eq!(loading, next);
    assert!(effects.is_empty());
}

#[test]
fn progress_for_unknown_run_is_ignored() {
    let state = AppState::new(None);
    let (next, effects) = update(
        state.clone(),
        Msg::EngineProgress {
            run: 7,
            fraction: 0.5,
        },
    );

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
