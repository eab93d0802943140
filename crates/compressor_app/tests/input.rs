use std::path::PathBuf;

use compressor_app::{parse_command, read_drop, Input};
use tempfile::TempDir;

#[test]
fn parses_control_commands() {
    assert_eq!(parse_command("cancel"), Some(Input::Cancel));
    assert_eq!(parse_command(" reload "), Some(Input::Reload));
    assert_eq!(parse_command("quit"), Some(Input::Quit));
    assert_eq!(parse_command("exit"), Some(Input::Quit));
    assert_eq!(parse_command("   "), None);
}

#[test]
fn parses_drops() {
    assert_eq!(
        parse_command("drop a.mp4 b.png"),
        Some(Input::Drop(vec![PathBuf::from("a.mp4"), PathBuf::from("b.png")]))
    );
    assert_eq!(
        parse_command("/videos/holiday clip.mp4"),
        Some(Input::Drop(vec![PathBuf::from("/videos/holiday clip.mp4")]))
    );
}

#[test]
fn read_drop_skips_unreadable_paths() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("ok.webp");
    std::fs::write(&good, b"RIFF").unwrap();

    let files = read_drop(&[dir.path().join("missing.mp4"), good]);
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].name, "ok.webp");
    assert_eq!(files[0].declared_mime.as_deref(), Some("image/webp"));
    assert_eq!(files[0].bytes.as_ref(), b"RIFF");
}
