use std::fs;

use compressor_engine::{ensure_output_dir, AtomicFileWriter, PersistError};
use tempfile::TempDir;

#[test]
fn nested_output_dir_is_created() {
    let temp = TempDir::new().unwrap();
    let nested = temp.path().join("artifacts").join("session");

    ensure_output_dir(&nested).unwrap();
    assert!(nested.is_dir());
    // Existing directories are accepted as-is.
    ensure_output_dir(&nested).unwrap();
}

#[test]
fn file_in_place_of_dir_is_rejected() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("blocker");
    fs::write(&blocker, "x").unwrap();

    assert!(matches!(
        ensure_output_dir(&blocker),
        Err(PersistError::NotADirectory { path }) if path == blocker
    ));

    let writer = AtomicFileWriter::new(blocker.clone());
    assert!(writer.write("out.mp4", b"data").is_err());
    assert!(!temp.path().join("out.mp4").exists());
}

#[test]
fn rewrite_replaces_content_without_leftovers() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().join("out"));
    let payload = vec![0xAB_u8; 256 * 1024];

    let first = writer.write("clip--deadbeef-1.mp4", &payload).unwrap();
    assert_eq!(fs::read(&first).unwrap().len(), payload.len());

    let second = writer.write("clip--deadbeef-1.mp4", b"small").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read(&second).unwrap(), b"small");

    let entries = fs::read_dir(writer.dir()).unwrap().count();
    assert_eq!(entries, 1);
}
