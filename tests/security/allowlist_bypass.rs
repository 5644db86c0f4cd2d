//! Extension allow-list bypass integration tests.
//!
//! Client-controlled file names are the only input the allow-list sees, so
//! every trick for smuggling an executable past it must fail.

#![allow(clippy::unwrap_used)]

use std::fs;
use tempfile::TempDir;
use upcheck_core::ErrorCode;
use upcheck_core::Extension;
use upcheck_core::LocalHost;
use upcheck_core::UploadConfig;
use upcheck_core::UploadRequest;
use upcheck_core::UploadValidator;

fn inspect_name(name: &str, config: UploadConfig) -> ErrorCode {
    let mut host = LocalHost::new();
    host.insert(UploadRequest::new("file", name, "/nonexistent/upload.tmp", 64));
    UploadValidator::new(&host).with_config(config).inspect().code()
}

#[test]
fn test_double_extension_rejected() {
    for name in ["shell.jpg.php", "photo.png.exe", "avatar.gif.phtml"] {
        assert_eq!(
            inspect_name(name, UploadConfig::default()),
            ErrorCode::DisallowedType,
            "{name} should be rejected"
        );
    }
}

#[test]
fn test_trailing_dot_and_space_rejected() {
    for name in ["shell.php.", "shell.jpg.", "shell.jpg ", "shell."] {
        assert_eq!(
            inspect_name(name, UploadConfig::default()),
            ErrorCode::DisallowedType,
            "{name:?} should be rejected"
        );
    }
}

#[test]
fn test_null_byte_names() {
    assert_eq!(
        inspect_name("shell.jpg\0.php", UploadConfig::default()),
        ErrorCode::DisallowedType
    );

    let split = "shell.jp\0g";
    assert!(Extension::from_file_name(split).is_empty());
    assert_eq!(
        inspect_name(split, UploadConfig::default()),
        ErrorCode::DisallowedType
    );
}

#[test]
fn test_directory_components_ignored() {
    // The dot belongs to a directory, not the file.
    for name in ["uploads.jpg/shell", "..\\images.png\\shell", "a.png/../shell"] {
        assert!(
            Extension::from_file_name(name).is_empty(),
            "{name} should have no extension"
        );
        assert_eq!(
            inspect_name(name, UploadConfig::default()),
            ErrorCode::DisallowedType
        );
    }
}

#[test]
fn test_traversal_name_cannot_escape_destination() {
    let temp = TempDir::new().unwrap();
    let tmp = temp.path().join("upload.tmp");
    fs::write(&tmp, b"data").unwrap();
    let mut host = LocalHost::new();
    host.insert(UploadRequest::new("file", "../../escape.jpg", &tmp, 4));
    let dest = temp.path().join("inner").join("up");
    fs::create_dir_all(&dest).unwrap();

    let stored = UploadValidator::new(&host)
        .inspect()
        .into_result()
        .unwrap()
        .save(Some(dest.as_path()), None)
        .unwrap();

    assert_eq!(stored.path.parent(), Some(dest.as_path()));
    assert!(!temp.path().join("escape.jpg").exists());
}

#[test]
fn test_case_variants_only_match_allowed_extensions() {
    let config = UploadConfig::default().with_extensions(["png"]);
    assert_eq!(inspect_name("a.PNG", config.clone()), ErrorCode::Ok);
    assert_eq!(inspect_name("a.pNg", config.clone()), ErrorCode::Ok);
    assert_eq!(inspect_name("a.PHP", config), ErrorCode::DisallowedType);
}
