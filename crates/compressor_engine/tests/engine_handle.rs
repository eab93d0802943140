use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use compressor_core::RunId;
use compressor_engine::{EngineEvent, EngineHandle, ProgressSink, TranscodeError, Transcoder};
use tokio_util::sync::CancellationToken;

/// Halves its input, or waits for cancellation when `hang` is set.
#[derive(Default)]
struct FakeTranscoder {
    loaded: AtomicBool,
    hang: bool,
    fail_load: bool,
    panic: bool,
}

#[async_trait::async_trait]
impl Transcoder for FakeTranscoder {
    async fn load(&self, sink: &dyn ProgressSink) -> Result<(), TranscodeError> {
        if self.fail_load {
            return Err(TranscodeError::LoadFailed("no engine".into()));
        }
        sink.emit(EngineEvent::Log("fake engine 1.0".into()));
        self.loaded.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::SeqCst)
    }

    async fn compress(
        &self,
        run: RunId,
        input: &[u8],
        sink: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> Result<Bytes, TranscodeError> {
        if !self.is_loaded() {
            return Err(TranscodeError::NotLoaded);
        }
        sink.emit(EngineEvent::Progress { run, fraction: 0.5 });
        if self.panic {
            panic!("malformed input stream");
        }
        if self.hang {
            cancel.cancelled().await;
            return Err(TranscodeError::Cancelled);
        }
        sink.emit(EngineEvent::Progress { run, fraction: 1.0 });
        Ok(Bytes::copy_from_slice(&input[..input.len() / 2]))
    }
}

fn collect_until_finished(engine: &EngineHandle) -> Vec<EngineEvent> {
    let mut events = Vec::new();
    while let Some(event) = engine.recv_timeout(Duration::from_secs(5)) {
        let done = matches!(event, EngineEvent::Finished { .. });
        events.push(event);
        if done {
            break;
        }
    }
    events
}

fn wait_loaded(engine: &EngineHandle) -> Result<(), TranscodeError> {
    while let Some(event) = engine.recv_timeout(Duration::from_secs(5)) {
        if let EngineEvent::Loaded(result) = event {
            return result;
        }
    }
    panic!("engine never reported load");
}

#[test]
fn load_then_compress_reports_progress_and_output() {
    let engine = EngineHandle::with_transcoder(Arc::new(FakeTranscoder::default()));
    engine.load();
    wait_loaded(&engine).expect("loaded");

    engine.compress(1, Bytes::from(vec![9u8; 10]));
    let events = collect_until_finished(&engine);

    let progress: Vec<f64> = events
        .iter()
        .filter_map(|event| match event {
            EngineEvent::Progress { run: 1, fraction } => Some(*fraction),
            _ => None,
        })
        .collect();
    assert_eq!(progress, vec![0.5, 1.0]);

    match events.last() {
        Some(EngineEvent::Finished { run, result, .. }) => {
            assert_eq!(*run, 1);
            assert_eq!(result.as_ref().unwrap().len(), 5);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn compress_before_load_is_not_loaded() {
    let engine = EngineHandle::with_transcoder(Arc::new(FakeTranscoder::default()));
    engine.compress(3, Bytes::from_static(b"abc"));

    match collect_until_finished(&engine).last() {
        Some(EngineEvent::Finished { result, .. }) => {
            assert_eq!(result, &Err(TranscodeError::NotLoaded));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn load_failure_is_reported() {
    let engine = EngineHandle::with_transcoder(Arc::new(FakeTranscoder {
        fail_load: true,
        ..FakeTranscoder::default()
    }));
    engine.load();
    assert!(matches!(
        wait_loaded(&engine),
        Err(TranscodeError::LoadFailed(_))
    ));
}

#[test]
fn cancel_stops_in_flight_run() {
    let engine = EngineHandle::with_transcoder(Arc::new(FakeTranscoder {
        hang: true,
        ..FakeTranscoder::default()
    }));
    engine.load();
    wait_loaded(&engine).expect("loaded");

    engine.compress(7, Bytes::from_static(b"long video"));
    // Wait for the run to start before cancelling it.
    loop {
        match engine.recv_timeout(Duration::from_secs(5)) {
            Some(EngineEvent::Progress { run: 7, .. }) => break,
            Some(_) => continue,
            None => panic!("run never started"),
        }
    }
    engine.cancel(7);

    match collect_until_finished(&engine).last() {
        Some(EngineEvent::Finished { run, result, .. }) => {
            assert_eq!(*run, 7);
            assert_eq!(result, &Err(TranscodeError::Cancelled));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn panicking_run_still_finishes_as_failure() {
    let engine = EngineHandle::with_transcoder(Arc::new(FakeTranscoder {
        panic: true,
        ..FakeTranscoder::default()
    }));
    engine.load();
    wait_loaded(&engine).expect("loaded");

    engine.compress(4, Bytes::from_static(b"crafted"));
    match collect_until_finished(&engine).last() {
        Some(EngineEvent::Finished { run, result, .. }) => {
            assert_eq!(*run, 4);
            assert!(matches!(
                result,
                Err(TranscodeError::TranscodeFailed { code: None, .. })
            ));
        }
        other => panic!("unexpected {other:?}"),
    }

    // The engine keeps serving runs afterwards.
    engine.cancel(4);
    engine.compress(5, Bytes::from_static(b"next"));
    assert!(matches!(
        collect_until_finished(&engine).last(),
        Some(EngineEvent::Finished { run: 5, .. })
    ));
}
