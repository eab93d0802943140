use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use bytes::Bytes;
use compressor_core::RunId;
use engine_logging::{engine_error, engine_info};
use tokio_util::sync::CancellationToken;

use crate::transcode::{ChannelProgressSink, FfmpegTranscoder, TranscodeSettings, Transcoder};
use crate::{EngineEvent, TranscodeError};

enum EngineCommand {
    Load,
    Compress { run: RunId, input: Bytes },
    Cancel { run: RunId },
}

type ActiveRuns = Arc<Mutex<HashMap<RunId, CancellationToken>>>;

/// Owns one transcoder on a background runtime and relays its events.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: TranscodeSettings) -> Self {
        Self::with_transcoder(Arc::new(FfmpegTranscoder::new(settings)))
    }

    pub fn with_transcoder(transcoder: Arc<dyn Transcoder>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    engine_error!("Failed to start engine runtime: {}", err);
                    let _ = event_tx.send(EngineEvent::Loaded(Err(
                        TranscodeError::LoadFailed(err.to_string()),
                    )));
                    return;
                }
            };
            let active: ActiveRuns = Arc::default();
            while let Ok(command) = cmd_rx.recv() {
                handle_command(&runtime, &transcoder, &active, command, &event_tx);
            }
            engine_info!("Engine command channel closed; shutting down");
        });

        Self { cmd_tx, event_rx }
    }

    pub fn load(&self) {
        let _ = self.cmd_tx.send(EngineCommand::Load);
    }

    pub fn compress(&self, run: RunId, input: Bytes) {
        let _ = self.cmd_tx.send(EngineCommand::Compress { run, input });
    }

    pub fn cancel(&self, run: RunId) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { run });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

fn handle_command(
    runtime: &tokio::runtime::Runtime,
    transcoder: &Arc<dyn Transcoder>,
    active: &ActiveRuns,
    command: EngineCommand,
    event_tx: &mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Load => {
            let transcoder = transcoder.clone();
            let event_tx = event_tx.clone();
            runtime.spawn(async move {
                let sink = ChannelProgressSink::new(event_tx.clone());
                let result = transcoder.load(&sink).await;
                let _ = event_tx.send(EngineEvent::Loaded(result));
            });
        }
        EngineCommand::Compress { run, input } => {
            let token = CancellationToken::new();
            if let Ok(mut runs) = active.lock() {
                runs.insert(run, token.clone());
            }
            let transcoder = transcoder.clone();
            let active = active.clone();
            let event_tx = event_tx.clone();
            runtime.spawn(async move {
                let started = Instant::now();
                let worker = {
                    let event_tx = event_tx.clone();
                    tokio::spawn(async move {
                        let sink = ChannelProgressSink::new(event_tx);
                        transcoder.compress(run, &input, &sink, &token).await
                    })
                };
                // Every run reports Finished, even when the transcoder panics.
                let result = worker.await.unwrap_or_else(|err| {
                    engine_error!("Compression run {} aborted: {}", run, err);
                    Err(TranscodeError::TranscodeFailed {
                        code: None,
                        message: format!("engine task aborted: {err}"),
                    })
                });
                let elapsed = started.elapsed();
                if let Ok(mut runs) = active.lock() {
                    runs.remove(&run);
                }
                let _ = event_tx.send(EngineEvent::Finished {
                    run,
                    result,
                    elapsed,
                });
            });
        }
        EngineCommand::Cancel { run } => {
            let token = active.lock().ok().and_then(|runs| runs.get(&run).cloned());
            match token {
                Some(token) => token.cancel(),
                None => engine_info!("Cancel for run {} ignored; not in flight", run),
            }
        }
    }
}
