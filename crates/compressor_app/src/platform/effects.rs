use std::time::Duration;

use compressor_core::{CompressionFailure, Effect, Msg};
use compressor_engine::{ArtifactStore, EngineEvent, EngineHandle, MessageSink, TranscodeError};
use engine_logging::{engine_error, engine_info, engine_warn};

/// Executes effects against the engine, the outbound bridge and the artifact store.
pub struct EffectRunner<S: MessageSink> {
    engine: EngineHandle,
    bridge: S,
    artifacts: ArtifactStore,
    posted: usize,
}

impl<S: MessageSink> EffectRunner<S> {
    pub fn new(engine: EngineHandle, bridge: S, artifacts: ArtifactStore) -> Self {
        Self {
            engine,
            bridge,
            artifacts,
            posted: 0,
        }
    }

    pub fn posted(&self) -> usize {
        self.posted
    }

    pub fn artifacts(&self) -> &ArtifactStore {
        &self.artifacts
    }

    /// Runs effects in order and returns any messages they produce.
    pub fn run(&mut self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut follow_ups = Vec::new();
        for effect in effects {
            match effect {
                Effect::LoadEngine => {
                    engine_info!("Loading engine");
                    self.engine.load();
                }
                Effect::StartCompression { run, file } => {
                    engine_info!(
                        "StartCompression run={} file={} bytes={}",
                        run,
                        file.name,
                        file.size()
                    );
                    self.engine.compress(run, file.bytes);
                }
                Effect::CancelCompression { run } => {
                    engine_info!("CancelCompression run={}", run);
                    self.engine.cancel(run);
                }
                Effect::CreateArtifact { bytes, source_name } => {
                    match self.artifacts.create(&bytes, &source_name) {
                        Ok(handle) => follow_ups.push(Msg::ArtifactCreated(handle)),
                        Err(err) => engine_error!("Could not create artifact: {}", err),
                    }
                }
                Effect::ReleaseArtifact(handle) => {
                    if let Err(err) = self.artifacts.release(&handle) {
                        engine_warn!("Could not release artifact {}: {}", handle.id, err);
                    }
                }
                Effect::Post(message) => match self.bridge.post(&message) {
                    Ok(()) => {
                        self.posted += 1;
                        engine_info!(
                            "Posted {} componentId={:?}",
                            message.type_tag(),
                            message.component_id()
                        );
                    }
                    Err(err) => engine_warn!("Dropped {} message: {}", message.type_tag(), err),
                },
            }
        }
        follow_ups
    }

    pub fn poll(&self) -> Option<Msg> {
        self.engine.try_recv().map(map_event)
    }

    pub fn wait(&self, timeout: Duration) -> Option<Msg> {
        self.engine.recv_timeout(timeout).map(map_event)
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Loaded(Ok(())) => Msg::EngineLoaded(Ok(())),
        EngineEvent::Loaded(Err(err)) => {
            engine_error!("Engine failed to load: {}", err);
            Msg::EngineLoaded(Err(err.to_string()))
        }
        EngineEvent::Progress { run, fraction } => Msg::EngineProgress { run, fraction },
        EngineEvent::Log(line) => Msg::EngineLog(line),
        EngineEvent::Finished {
            run,
            result,
            elapsed,
        } => Msg::CompressionFinished {
            run,
            result: result.map_err(map_failure),
            elapsed,
        },
    }
}

fn map_failure(err: TranscodeError) -> CompressionFailure {
    match err {
        TranscodeError::Cancelled => CompressionFailure::Cancelled,
        other => {
            engine_warn!("Compression failed: {}", other);
            CompressionFailure::Failed(other.to_string())
        }
    }
}
