use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, Mutex};

use bytes::Bytes;
use compressor_app::{load_catalog, EffectRunner, Input, Renderer, Session, SessionSummary};
use compressor_core::RunId;
use compressor_engine::{
    ArtifactStore, EngineEvent, EngineHandle, JsonLinesBridge, ProgressSink, TranscodeError,
    Transcoder,
};
use serde_json::Value;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn messages(&self) -> Vec<Value> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str::<Value>(line).unwrap()["message"].clone())
            .collect()
    }

    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Emits rising progress and returns the first quarter of the input.
/// Inputs starting with `FAIL` are rejected.
#[derive(Default)]
struct QuarterTranscoder {
    loaded: AtomicBool,
    fail_load: bool,
}

#[async_trait::async_trait]
impl Transcoder for QuarterTranscoder {
    async fn load(&self, _sink: &dyn ProgressSink) -> Result<(), TranscodeError> {
        if self.fail_load {
            return Err(TranscodeError::LoadFailed("missing".into()));
        }
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
        _cancel: &CancellationToken,
    ) -> Result<Bytes, TranscodeError> {
        if input.starts_with(b"FAIL") {
            return Err(TranscodeError::TranscodeFailed {
                code: Some(1),
                message: "corrupt input".into(),
            });
        }
        for fraction in [0.25, 0.5, 1.0] {
            sink.emit(EngineEvent::Progress { run, fraction });
        }
        sink.emit(EngineEvent::Log("frame=1".into()));
        Ok(Bytes::copy_from_slice(&input[..input.len() / 4]))
    }
}

struct Fixture {
    dir: TempDir,
    outbound: SharedBuffer,
    screen: SharedBuffer,
}

impl Fixture {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
            outbound: SharedBuffer::default(),
            screen: SharedBuffer::default(),
        }
    }

    fn file(&self, name: &str, content: &[u8]) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn artifact_dir(&self) -> PathBuf {
        self.dir.path().join("artifacts")
    }

    fn run(&self, transcoder: QuarterTranscoder, locale: &str, inputs: Vec<Input>) -> SessionSummary {
        let engine = EngineHandle::with_transcoder(Arc::new(transcoder));
        let runner = EffectRunner::new(
            engine,
            JsonLinesBridge::new(self.outbound.clone()),
            ArtifactStore::new(self.artifact_dir()),
        );
        let renderer = Renderer::new(load_catalog(locale, None).unwrap());
        let session = Session::new(
            Some("upload-42".to_string()),
            runner,
            renderer,
            self.screen.clone(),
        );

        let (tx, rx) = mpsc::channel();
        for input in inputs {
            tx.send(input).unwrap();
        }
        drop(tx);
        session.run(rx)
    }
}

fn count_files(dir: &Path) -> usize {
    fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}

#[test]
fn image_is_forwarded_byte_identical() {
    let fx = Fixture::new();
    let image = fx.file("cat.png", b"\x89PNG-data");

    let summary = fx.run(
        QuarterTranscoder::default(),
        "en",
        vec![Input::Drop(vec![image])],
    );

    assert_eq!(summary.posted, 1);
    assert_eq!(summary.failures, 0);
    let messages = fx.outbound.messages();
    assert_eq!(messages[0]["type"], "IMAGE_SELECTED");
    assert_eq!(messages[0]["componentId"], "upload-42");
    assert_eq!(messages[0]["filename"], "cat.png");
    assert_eq!(messages[0]["file"]["data"], "iVBORy1kYXRh");
}

#[test]
fn sequential_videos_compress_and_release_artifacts() {
    let fx = Fixture::new();
    let first = fx.file("first.mp4", &[1u8; 400]);
    let second = fx.file("second.mp4", &[2u8; 800]);

    let summary = fx.run(
        QuarterTranscoder::default(),
        "en",
        vec![Input::Drop(vec![first]), Input::Drop(vec![second])],
    );

    assert_eq!(summary.posted, 2);
    assert_eq!(summary.failures, 0);
    let messages = fx.outbound.messages();
    assert_eq!(messages.len(), 2);
    let expected = [("first.mp4", 400), ("second.mp4", 800)];
    for (message, (name, original)) in messages.iter().zip(expected) {
        assert_eq!(message["type"], "VIDEO_COMPRESSED");
        assert_eq!(message["filename"], name);
        assert_eq!(message["stats"]["originalSize"], original);
        assert_eq!(message["stats"]["compressedSize"], original / 4);
        assert_eq!(message["file"]["size"], original / 4);
        assert_eq!(message["stats"]["compressionRatio"], 75.0);
        assert!(message["stats"]["compressionTime"].as_f64().unwrap() >= 0.0);
    }

    // Teardown released the last artifact; the first was released before the second existed.
    assert_eq!(count_files(&fx.artifact_dir()), 0);
    assert!(fx.screen.text().contains("Compressing... 100%"));
}

#[test]
fn unsupported_and_failed_inputs_post_nothing() {
    let fx = Fixture::new();
    let text = fx.file("notes.txt", b"hello");
    let broken = fx.file("broken.mp4", b"FAIL-bytes");

    let summary = fx.run(
        QuarterTranscoder::default(),
        "zh",
        vec![Input::Drop(vec![text]), Input::Drop(vec![broken])],
    );

    assert_eq!(summary.posted, 0);
    assert_eq!(summary.failures, 2);
    assert!(fx.outbound.messages().is_empty());
    let screen = fx.screen.text();
    assert!(screen.contains("只支援 mp4 影片或常見圖片格式"));
    assert!(screen.contains("影片壓縮失敗"));
}

#[test]
fn engine_load_failure_blocks_video_but_not_images() {
    let fx = Fixture::new();
    let video = fx.file("clip.mp4", &[0u8; 16]);
    let image = fx.file("pic.jpg", b"jpeg");

    let summary = fx.run(
        QuarterTranscoder {
            fail_load: true,
            ..QuarterTranscoder::default()
        },
        "en",
        vec![Input::Drop(vec![video]), Input::Drop(vec![image])],
    );

    let messages = fx.outbound.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["type"], "IMAGE_SELECTED");
    assert_eq!(summary.failures, 2);
    assert!(fx.screen.text().contains("Failed to load the video engine"));
}

#[test]
fn empty_or_unreadable_drop_is_noop() {
    let fx = Fixture::new();
    let missing = fx.dir.path().join("nope.mp4");

    let summary = fx.run(
        QuarterTranscoder::default(),
        "en",
        vec![Input::Drop(Vec::new()), Input::Drop(vec![missing])],
    );

    assert_eq!(summary.posted, 0);
    assert_eq!(summary.failures, 0);
}
