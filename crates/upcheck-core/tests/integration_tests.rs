//! Integration tests for upcheck-core.
//!
//! These tests run the full configure → inspect → save lifecycle against a
//! filesystem-backed host.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use tempfile::TempDir;
use upcheck_core::ConfigOverrides;
use upcheck_core::ErrorCode;
use upcheck_core::FileCategory;
use upcheck_core::Inspection;
use upcheck_core::LocalHost;
use upcheck_core::SizeRule;
use upcheck_core::UploadConfig;
use upcheck_core::UploadError;
use upcheck_core::UploadRequest;
use upcheck_core::UploadValidator;

const MB: u64 = 1024 * 1024;

/// Writes a small JPEG-like temp file and registers it as the upload for
/// `field`, reporting `size` as its size.
fn receive(temp: &TempDir, host: &mut LocalHost, field: &str, name: &str, size: u64) -> PathBuf {
    let tmp = temp.path().join(format!("php{}.tmp", field));
    fs::write(&tmp, b"\xFF\xD8\xFF\xE0\0\x10JFIF\0").expect("failed to write temp upload");
    host.insert(UploadRequest::new(field, name, &tmp, size));
    tmp
}

fn image_overrides(max_size_mb: u64) -> ConfigOverrides {
    serde_json::from_value(serde_json::json!({
        "category": "image",
        "max_size_mb": max_size_mb,
    }))
    .unwrap()
}

#[test]
fn test_image_upload_stored_under_generated_name() {
    let temp = TempDir::new().unwrap();
    let mut host = LocalHost::new();
    let tmp = receive(&temp, &mut host, "file", "holiday.jpg", MB);
    let dest = temp.path().join("up");

    let accepted = UploadValidator::new(&host)
        .configure(image_overrides(2))
        .inspect()
        .into_result()
        .unwrap();
    let stored = accepted.save(Some(&dest), None).unwrap();

    assert!(dest.is_dir(), "destination directory should be created");
    assert_eq!(stored.path.parent(), Some(dest.as_path()));
    assert!(stored.has_generated_name());
    assert!(stored.file_name.starts_with("e_"));
    assert!(
        Path::new(&stored.file_name)
            .extension()
            .is_some_and(|ext| ext == "jpg")
    );
    let digits = stored
        .file_name
        .trim_start_matches("e_")
        .trim_end_matches(".jpg");
    assert!(digits.len() > 5 && digits.bytes().all(|b| b.is_ascii_digit()));
    assert!(stored.path.exists());
    assert!(!tmp.exists(), "temp file should be moved, not copied");
}

#[test]
fn test_executable_rejected_with_allowed_list_in_message() {
    let temp = TempDir::new().unwrap();
    let mut host = LocalHost::new();
    let tmp = receive(&temp, &mut host, "file", "setup.exe", MB);

    let inspection = UploadValidator::new(&host)
        .configure(image_overrides(2))
        .inspect();

    let Inspection::Rejected(rejection) = inspection else {
        panic!("executable should be rejected");
    };
    assert_eq!(rejection.code(), ErrorCode::DisallowedType);
    assert_eq!(rejection.code().as_i32(), 8);
    for ext in FileCategory::Image.extensions() {
        assert!(rejection.message().contains(ext), "message should list {ext}");
    }
    assert!(tmp.exists());
}

#[test]
fn test_existing_destination_not_overwritten() {
    let temp = TempDir::new().unwrap();
    let mut host = LocalHost::new();
    let tmp = receive(&temp, &mut host, "file", "holiday.jpg", MB);
    let dest = temp.path().join("up");
    fs::create_dir(&dest).unwrap();
    fs::write(dest.join("holiday.jpg"), b"original").unwrap();

    let rejection = UploadValidator::new(&host)
        .inspect()
        .into_result()
        .unwrap()
        .save(Some(&dest), Some("holiday"))
        .unwrap_err();

    assert_eq!(rejection.code(), ErrorCode::FileExists);
    assert!(matches!(rejection.error(), UploadError::FileExists { .. }));
    assert_eq!(fs::read(dest.join("holiday.jpg")).unwrap(), b"original");
    assert!(tmp.exists(), "temp file must be left untouched");
}

#[test]
fn test_host_cap_reduces_effective_limit() {
    let temp = TempDir::new().unwrap();
    let mut host = LocalHost::new().with_max_upload_size_mb(1);
    receive(&temp, &mut host, "file", "big.png", 8 * MB + 1);

    let inspection = UploadValidator::new(&host)
        .configure(image_overrides(100))
        .inspect();

    assert_eq!(inspection.code(), ErrorCode::FileTooLarge);
    assert_eq!(inspection.message(), "uploaded file may be at most 1M");
}

#[test]
fn test_strict_size_rule() {
    let temp = TempDir::new().unwrap();
    let mut host = LocalHost::new();
    receive(&temp, &mut host, "file", "photo.png", 2 * MB);

    let legacy = UploadValidator::new(&host)
        .with_config(UploadConfig::default().with_max_size_mb(1))
        .inspect();
    assert!(legacy.is_accepted());

    let strict = UploadValidator::new(&host)
        .with_config(
            UploadConfig::default()
                .with_max_size_mb(1)
                .with_size_rule(SizeRule::Strict),
        )
        .inspect();
    assert_eq!(strict.code(), ErrorCode::FileTooLarge);
}

#[test]
fn test_transport_error_passed_through() {
    let temp = TempDir::new().unwrap();
    let tmp = temp.path().join("partial.tmp");
    fs::write(&tmp, b"x").unwrap();
    let mut host = LocalHost::new();
    host.insert(UploadRequest::new("file", "ok.jpg", &tmp, 1).with_transport_error(6));

    let inspection = UploadValidator::new(&host).inspect();

    assert_eq!(inspection.code(), ErrorCode::MissingTempDir);
    assert_eq!(inspection.message(), "temporary upload folder is missing");
}

#[test]
fn test_missing_field_is_no_file() {
    let temp = TempDir::new().unwrap();
    let mut host = LocalHost::new();
    receive(&temp, &mut host, "avatar", "me.png", 10);

    let inspection = UploadValidator::new(&host).inspect();
    assert_eq!(inspection.code(), ErrorCode::NoFile);

    let inspection = UploadValidator::new(&host)
        .configure(ConfigOverrides {
            field_name: Some("avatar".into()),
            ..Default::default()
        })
        .inspect();
    assert!(inspection.is_accepted());
}

#[test]
fn test_unrestricted_category_accepts_any_extension() {
    let temp = TempDir::new().unwrap();
    let mut host = LocalHost::new();
    receive(&temp, &mut host, "file", "Makefile", 10);

    let inspection = UploadValidator::new(&host)
        .with_config(UploadConfig::default().with_category(FileCategory::File))
        .inspect();

    assert!(inspection.is_accepted());
}

#[test]
fn test_content_verification_rejects_renamed_archive() {
    let temp = TempDir::new().unwrap();
    let tmp = temp.path().join("upload.tmp");
    fs::write(&tmp, b"PK\x03\x04\x14\0\0\0\x08\0payload").unwrap();
    let mut host = LocalHost::new();
    host.insert(UploadRequest::new("file", "innocent.png", &tmp, 17));

    let config = UploadConfig::default().with_content_verification(true);
    let inspection = UploadValidator::new(&host).with_config(config).inspect();

    assert_eq!(inspection.code(), ErrorCode::DisallowedType);
}

#[test]
fn test_message_cached_across_calls() {
    let temp = TempDir::new().unwrap();
    let mut host = LocalHost::new();
    receive(&temp, &mut host, "file", "setup.exe", 10);

    let Inspection::Rejected(rejection) = UploadValidator::new(&host).inspect() else {
        panic!("should be rejected");
    };
    let first = rejection.message().to_string();
    assert_eq!(rejection.message(), first);
    assert_eq!(rejection.to_string(), first);
}

#[test]
fn test_configured_destination_used_by_default() {
    let temp = TempDir::new().unwrap();
    let mut host = LocalHost::new();
    receive(&temp, &mut host, "file", "scan.JPG", 10);
    let dest = temp.path().join("configured");

    let overrides: ConfigOverrides = serde_json::from_value(serde_json::json!({
        "path": dest,
        "exts": "jpg",
    }))
    .unwrap();
    let stored = UploadValidator::new(&host)
        .configure(overrides)
        .inspect()
        .into_result()
        .unwrap()
        .save(None, Some("scan"))
        .unwrap();

    assert_eq!(stored.path, dest.join("scan.JPG"));
}
