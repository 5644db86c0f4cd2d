//! Overwrite refusal integration tests.
//!
//! Storing an upload must never replace an existing file, including one
//! created between the existence check and the move.

#![allow(clippy::unwrap_used)]

use std::fs;
use std::io;
use std::path::Path;
use tempfile::TempDir;
use upcheck_core::ErrorCode;
use upcheck_core::LocalHost;
use upcheck_core::UploadHost;
use upcheck_core::UploadRequest;
use upcheck_core::UploadValidator;
use upcheck_core::persistence::atomic::move_exclusive;

fn staged(temp: &TempDir, name: &str) -> LocalHost {
    let tmp = temp.path().join("upload.tmp");
    fs::write(&tmp, b"new contents").unwrap();
    let mut host = LocalHost::new();
    host.insert(UploadRequest::new("file", name, &tmp, 12));
    host
}

#[test]
fn test_existing_file_preserved() {
    let temp = TempDir::new().unwrap();
    let host = staged(&temp, "report.png");
    let dest = temp.path().join("up");
    fs::create_dir(&dest).unwrap();
    fs::write(dest.join("report.png"), b"original").unwrap();

    let rejection = UploadValidator::new(&host)
        .inspect()
        .into_result()
        .unwrap()
        .save(Some(dest.as_path()), Some("report"))
        .unwrap_err();

    assert_eq!(rejection.code(), ErrorCode::FileExists);
    assert_eq!(fs::read(dest.join("report.png")).unwrap(), b"original");
    assert!(temp.path().join("upload.tmp").exists());
}

#[cfg(unix)]
#[test]
fn test_dangling_symlink_treated_as_existing() {
    let temp = TempDir::new().unwrap();
    let host = staged(&temp, "report.png");
    let dest = temp.path().join("up");
    fs::create_dir(&dest).unwrap();
    let target = temp.path().join("outside.png");
    std::os::unix::fs::symlink(&target, dest.join("report.png")).unwrap();

    let rejection = UploadValidator::new(&host)
        .inspect()
        .into_result()
        .unwrap()
        .save(Some(dest.as_path()), Some("report"))
        .unwrap_err();

    assert_eq!(rejection.code(), ErrorCode::FileExists);
    assert!(!target.exists(), "write must not follow the symlink");
}

/// A host whose destination appears after the existence check, as if a
/// concurrent request won the race.
struct RacingHost {
    inner: LocalHost,
}

impl UploadHost for RacingHost {
    fn fetch(&self, field_name: &str) -> Option<UploadRequest> {
        self.inner.fetch(field_name)
    }

    fn max_upload_size_mb(&self) -> Option<u64> {
        None
    }

    fn move_upload(&self, upload: &UploadRequest, destination: &Path) -> io::Result<()> {
        fs::write(destination, b"winner")?;
        move_exclusive(upload.temp_path(), destination)
    }
}

#[test]
fn test_concurrent_writer_wins_race() {
    let temp = TempDir::new().unwrap();
    let host = RacingHost {
        inner: staged(&temp, "report.png"),
    };
    let dest = temp.path().join("up");

    let rejection = UploadValidator::new(&host)
        .inspect()
        .into_result()
        .unwrap()
        .save(Some(dest.as_path()), Some("report"))
        .unwrap_err();

    assert_eq!(rejection.code(), ErrorCode::FileExists);
    assert_eq!(fs::read(dest.join("report.png")).unwrap(), b"winner");
    assert!(temp.path().join("upload.tmp").exists());
}

#[test]
fn test_second_save_of_same_name_refused() {
    let temp = TempDir::new().unwrap();
    let dest = temp.path().join("up");

    let first = staged(&temp, "a.jpg");
    UploadValidator::new(&first)
        .inspect()
        .into_result()
        .unwrap()
        .save(Some(dest.as_path()), Some("same"))
        .unwrap();

    let second = staged(&temp, "b.jpg");
    let rejection = UploadValidator::new(&second)
        .inspect()
        .into_result()
        .unwrap()
        .save(Some(dest.as_path()), Some("same"))
        .unwrap_err();

    assert_eq!(rejection.code(), ErrorCode::FileExists);
}
