//! Unit tests for tar construction and compression.

use super::*;
use crate::error::FailureKind;
use rstest::{fixture, rstest};
use std::io::Read;
use std::path::PathBuf;
use tempfile::TempDir;

#[fixture]
fn temp_dir() -> TempDir {
    TempDir::new().expect("temp dir creation succeeds")
}

/// Create `temp_nginx/README.txt` under `root` and return the directory.
fn seeded_scratch(root: &Path) -> PathBuf {
    let scratch = root.join("temp_nginx");
    fs::create_dir_all(&scratch).expect("mkdir scratch");
    fs::write(scratch.join("README.txt"), b"payload\n").expect("write payload");
    scratch
}

/// Return `(path, contents)` for every regular file in a `.tar.zst`.
fn decoded_files(archive_path: &Path) -> Vec<(String, String)> {
    let file = fs::File::open(archive_path).expect("open archive");
    let decoder = zstd::Decoder::new(file).expect("zstd decode");
    let mut archive = tar::Archive::new(decoder);
    archive
        .entries()
        .expect("entries")
        .filter_map(|entry| {
            let mut entry = entry.expect("entry");
            if !entry.header().entry_type().is_file() {
                return None;
            }
            let path = entry.path().expect("path").to_string_lossy().into_owned();
            let mut contents = String::new();
            entry.read_to_string(&mut contents).expect("read entry");
            Some((path, contents))
        })
        .collect()
}

#[rstest]
fn build_tar_uses_base_name_as_top_level_member(temp_dir: TempDir) {
    let scratch = seeded_scratch(temp_dir.path());
    let tar_path = temp_dir.path().join("nginx.tar");
    build_tar(&scratch, &tar_path).expect("tar succeeds");

    let mut archive = tar::Archive::new(fs::File::open(&tar_path).expect("open tar"));
    let names: Vec<String> = archive
        .entries()
        .expect("entries")
        .map(|entry| {
            entry
                .expect("entry")
                .path()
                .expect("path")
                .to_string_lossy()
                .into_owned()
        })
        .collect();

    assert!(names.iter().all(|name| name.starts_with("temp_nginx")));
    assert!(names.iter().any(|name| name == "temp_nginx/README.txt"));
}

#[rstest]
fn build_tar_fails_for_missing_source(temp_dir: TempDir) {
    let err = build_tar(
        &temp_dir.path().join("missing"),
        &temp_dir.path().join("out.tar"),
    )
    .expect_err("missing source directory");
    assert_eq!(err.kind(), FailureKind::Archive);
}

#[rstest]
fn compress_round_trips_payload(temp_dir: TempDir) {
    let scratch = seeded_scratch(temp_dir.path());
    let tar_path = temp_dir.path().join("nginx.tar");
    let archive_path = temp_dir.path().join("nginx.tar.zst");
    build_tar(&scratch, &tar_path).expect("tar");
    compress(&tar_path, &archive_path, CollisionPolicy::Overwrite).expect("compress");

    assert_eq!(
        decoded_files(&archive_path),
        vec![("temp_nginx/README.txt".to_owned(), "payload\n".to_owned())]
    );
}

#[rstest]
fn compress_leaves_no_staging_files_behind(temp_dir: TempDir) {
    let scratch = seeded_scratch(temp_dir.path());
    let out_dir = temp_dir.path().join("dist");
    fs::create_dir_all(&out_dir).expect("mkdir dist");
    let tar_path = temp_dir.path().join("nginx.tar");
    build_tar(&scratch, &tar_path).expect("tar");
    compress(&tar_path, &out_dir.join("nginx.tar.zst"), CollisionPolicy::Overwrite)
        .expect("compress");

    let entries: Vec<_> = fs::read_dir(&out_dir)
        .expect("read dist")
        .map(|entry| entry.expect("entry").file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("nginx.tar.zst")]);
}

#[rstest]
fn overwrite_policy_replaces_existing_archive(temp_dir: TempDir) {
    let scratch = seeded_scratch(temp_dir.path());
    let tar_path = temp_dir.path().join("nginx.tar");
    let archive_path = temp_dir.path().join("nginx.tar.zst");
    fs::write(&archive_path, b"stale").expect("write stale archive");
    build_tar(&scratch, &tar_path).expect("tar");
    compress(&tar_path, &archive_path, CollisionPolicy::Overwrite).expect("compress");

    assert_eq!(decoded_files(&archive_path).len(), 1);
}

#[rstest]
fn fail_policy_keeps_existing_archive(temp_dir: TempDir) {
    let scratch = seeded_scratch(temp_dir.path());
    let tar_path = temp_dir.path().join("nginx.tar");
    let archive_path = temp_dir.path().join("nginx.tar.zst");
    fs::write(&archive_path, b"previous run").expect("write previous archive");
    build_tar(&scratch, &tar_path).expect("tar");

    let err = compress(&tar_path, &archive_path, CollisionPolicy::Fail)
        .expect_err("existing archive must not be replaced");
    assert_eq!(err.kind(), FailureKind::OutputExists);
    assert_eq!(fs::read(&archive_path).expect("read"), b"previous run");
}

#[rstest]
fn compress_fails_for_missing_tar(temp_dir: TempDir) {
    let err = compress(
        &temp_dir.path().join("missing.tar"),
        &temp_dir.path().join("missing.tar.zst"),
        CollisionPolicy::Overwrite,
    )
    .expect_err("missing input");
    assert_eq!(err.kind(), FailureKind::Compression);
    assert!(!temp_dir.path().join("missing.tar.zst").exists());
}

#[test]
fn staging_dir_defaults_to_current_directory() {
    assert_eq!(staging_dir(Path::new("nginx.tar.zst")), Path::new("."));
    assert_eq!(
        staging_dir(Path::new("dist/nginx.tar.zst")),
        Path::new("dist")
    );
}
