use std::fs;

use gamedissect_tools::collect_capture_files;

fn capture_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("conn-b.bin"), [0x55, 0xAA]).unwrap();
    fs::write(dir.path().join("conn-a.bin"), b"").unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored by the filter").unwrap();
    fs::create_dir(dir.path().join("nested.bin")).unwrap();
    dir
}

fn names(files: &[std::path::PathBuf]) -> Vec<String> {
    files
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn lists_files_sorted_and_skips_directories() {
    let dir = capture_dir();
    let files = collect_capture_files(dir.path(), None).unwrap();
    assert_eq!(names(&files), ["conn-a.bin", "conn-b.bin", "notes.txt"]);
}

#[test]
fn glob_matches_file_name() {
    let dir = capture_dir();
    let files = collect_capture_files(dir.path(), Some("*.bin")).unwrap();
    assert_eq!(names(&files), ["conn-a.bin", "conn-b.bin"]);
}

#[test]
fn glob_matches_full_path() {
    let dir = capture_dir();
    let pattern = format!("{}/*-b.bin", dir.path().display());
    let files = collect_capture_files(dir.path(), Some(&pattern)).unwrap();
    assert_eq!(names(&files), ["conn-b.bin"]);
}

#[test]
fn invalid_glob_is_an_error() {
    let dir = capture_dir();
    let err = collect_capture_files(dir.path(), Some("[")).unwrap_err();
    assert!(err.to_string().contains("invalid glob pattern"));
}

#[test]
fn missing_directory_is_an_error() {
    let dir = capture_dir();
    let missing = dir.path().join("absent");
    assert!(collect_capture_files(&missing, None).is_err());
}
