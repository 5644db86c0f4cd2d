//! Persistence reporting.

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use crate::types::Extension;

/// Report of a stored upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUpload {
    /// Final path of the stored file.
    pub path: PathBuf,

    /// File name including extension.
    pub file_name: String,

    /// Extension derived from the client's file name.
    pub extension: Extension,

    /// Size reported by the host, in bytes.
    pub bytes: u64,

    /// Time spent creating the directory and moving the file.
    pub duration: Duration,
}

impl StoredUpload {
    /// Final path of the stored file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` if the file name was generated rather than chosen by
    /// the caller.
    #[must_use]
    pub fn has_generated_name(&self) -> bool {
        self.file_name
            .strip_prefix(crate::persistence::naming::GENERATED_PREFIX)
            .and_then(|rest| rest.strip_suffix(self.extension.as_str()))
            .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
    }
}
