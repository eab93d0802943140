use crate::{
    accept, AppState, CompressionFailure, CompressionStats, Effect, EngineStatus, ErrorKey,
    MediaKind, Msg, OutboundMessage, Phase,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Mounted => {
            if state.engine() == EngineStatus::Unloaded {
                state.begin_loading();
                vec![Effect::LoadEngine]
            } else {
                Vec::new()
            }
        }
        Msg::EngineLoaded(Ok(())) => {
            state.engine_ready();
            Vec::new()
        }
        Msg::EngineLoaded(Err(_)) => {
            state.engine_failed();
            Vec::new()
        }
        Msg::FilesDropped(files) => {
            // The picker is hidden while a run is in flight.
            if state.phase() == Phase::Compressing {
                return (state, Vec::new());
            }
            let Some(file) = accept(files) else {
                return (state, Vec::new());
            };
            match MediaKind::classify(&file.mime) {
                Some(MediaKind::Image) => {
                    let filename = file.name.clone();
                    let message = OutboundMessage::ImageSelected {
                        component_id: state.component_id().map(ToOwned::to_owned),
                        file,
                        filename,
                    };
                    state.clear_selection();
                    vec![Effect::Post(message)]
                }
                Some(MediaKind::Video) => {
                    if state.engine() != EngineStatus::Ready {
                        state.fail(ErrorKey::EngineNotLoaded);
                        Vec::new()
                    } else {
                        let run = state.begin_compression(file.clone());
                        vec![Effect::StartCompression { run, file }]
                    }
                }
                None => {
                    state.fail(ErrorKey::UnsupportedFileType);
                    Vec::new()
                }
            }
        }
        Msg::EngineProgress { run, fraction } => {
            if state.current_run() == Some(run) {
                state.apply_progress(fraction);
            }
            Vec::new()
        }
        Msg::EngineLog(line) => {
            state.push_log(line);
            Vec::new()
        }
        Msg::CompressionFinished {
            run,
            result,
            elapsed,
        } => {
            if state.current_run() != Some(run) {
                return (state, Vec::new());
            }
            match result {
                Ok(output) => {
                    let original_size = state.selected().map_or(0, |file| file.size());
                    let stats =
                        CompressionStats::compute(original_size, output.len() as u64, elapsed);
                    let input = state.finish_compression(stats);
                    let filename = input.map(|file| file.name).unwrap_or_default();

                    let mut effects = Vec::with_capacity(3);
                    if let Some(previous) = state.take_artifact() {
                        effects.push(Effect::ReleaseArtifact(previous));
                    }
                    effects.push(Effect::CreateArtifact {
                        bytes: output.clone(),
                        source_name: filename.clone(),
                    });
                    effects.push(Effect::Post(OutboundMessage::VideoCompressed {
                        component_id: state.component_id().map(ToOwned::to_owned),
                        file: output,
                        filename,
                        stats,
                    }));
                    effects
                }
                Err(CompressionFailure::Cancelled) => {
                    state.fail(ErrorKey::CompressionCancelled);
                    Vec::new()
                }
                Err(CompressionFailure::Failed(_)) => {
                    state.fail(ErrorKey::CompressionFailed);
                    Vec::new()
                }
            }
        }
        Msg::ArtifactCreated(handle) => match state.set_artifact(handle) {
            Some(stale) => vec![Effect::ReleaseArtifact(stale)],
            None => Vec::new(),
        },
        Msg::CancelClicked => match state.current_run() {
            Some(run) => vec![Effect::CancelCompression { run }],
            None => Vec::new(),
        },
        Msg::ReloadRequested => {
            let mut effects = Vec::with_capacity(3);
            if let Some(run) = state.current_run() {
                effects.push(Effect::CancelCompression { run });
            }
            if let Some(artifact) = state.take_artifact() {
                effects.push(Effect::ReleaseArtifact(artifact));
            }
            state = state.reloaded();
            state.begin_loading();
            effects.push(Effect::LoadEngine);
            effects
        }
        Msg::Teardown => match state.take_artifact() {
            Some(artifact) => {
                state.mark_dirty();
                vec![Effect::ReleaseArtifact(artifact)]
            }
            None => Vec::new(),
        },
        Msg::Tick => Vec::new(),
    };

    (state, effects)
}
