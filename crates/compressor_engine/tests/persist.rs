use std::fs;

use compressor_engine::{ensure_download_dir, DownloadWriter};
use tempfile::TempDir;

#[test]
fn creates_missing_download_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("downloads");
    assert!(!new_dir.exists());
    ensure_download_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn save_replaces_existing_and_leaves_no_temp_files() {
    let temp = TempDir::new().unwrap();
    let writer = DownloadWriter::new(temp.path().to_path_buf());

    let first = writer.save("report_comprimido.pdf", b"one").unwrap();
    assert_eq!(first.file_name().unwrap(), "report_comprimido.pdf");
    assert_eq!(fs::read(&first).unwrap(), b"one");

    let second = writer.save("report_comprimido.pdf", b"two").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read(&second).unwrap(), b"two");

    let entries: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn server_names_cannot_escape_download_dir() {
    let temp = TempDir::new().unwrap();
    let downloads = temp.path().join("downloads");
    let writer = DownloadWriter::new(downloads.clone());

    let saved = writer.save("../escaped.pdf", b"data").unwrap();
    assert_eq!(saved, downloads.join("escaped.pdf"));
    assert!(!temp.path().join("escaped.pdf").exists());
}

#[test]
fn no_partial_file_on_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = DownloadWriter::new(file_path.clone());
    let result = writer.save("out.pdf", b"data");
    assert!(result.is_err());
    assert!(!file_path.with_file_name("out.pdf").exists());
}
