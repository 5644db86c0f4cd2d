//! Error types for upload inspection and persistence.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `UploadError`.
pub type Result<T> = std::result::Result<T, UploadError>;

/// Stable numeric error codes reported for every upload outcome.
///
/// The numbering is fixed: transport-level codes reported by the host
/// keep their original value, so codes 1-4, 6 and 7 mean the same thing
/// here as they do in the hosting environment's diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// No error.
    Ok,
    /// File exceeds the effective size limit.
    FileTooLarge,
    /// File exceeds the size declared by the submitting form.
    FormSizeExceeded,
    /// Upload was only partially received.
    Partial,
    /// No file was submitted for the configured field.
    NoFile,
    /// A file already exists at the destination path.
    FileExists,
    /// The host has no temporary storage for uploads.
    MissingTempDir,
    /// Writing or reading upload data failed.
    CantWrite,
    /// The file type is not on the allow-list.
    DisallowedType,
    /// Unclassified failure while persisting the upload.
    Unknown,
    /// A code outside the known taxonomy, preserved verbatim.
    Other(i32),
}

impl ErrorCode {
    /// Returns the numeric value of this code.
    ///
    /// # Examples
    ///
    /// ```
    /// use upcheck_core::ErrorCode;
    ///
    /// assert_eq!(ErrorCode::DisallowedType.as_i32(), 8);
    /// assert_eq!(ErrorCode::Unknown.as_i32(), -1);
    /// assert_eq!(ErrorCode::Other(42).as_i32(), 42);
    /// ```
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        match self {
            Self::Ok => 0,
            Self::FileTooLarge => 1,
            Self::FormSizeExceeded => 2,
            Self::Partial => 3,
            Self::NoFile => 4,
            Self::FileExists => 5,
            Self::MissingTempDir => 6,
            Self::CantWrite => 7,
            Self::DisallowedType => 8,
            Self::Unknown => -1,
            Self::Other(raw) => raw,
        }
    }

    /// Converts a raw numeric code. Never fails: unrecognized values are
    /// kept as [`ErrorCode::Other`].
    #[must_use]
    pub const fn from_i32(raw: i32) -> Self {
        match raw {
            0 => Self::Ok,
            1 => Self::FileTooLarge,
            2 => Self::FormSizeExceeded,
            3 => Self::Partial,
            4 => Self::NoFile,
            5 => Self::FileExists,
            6 => Self::MissingTempDir,
            7 => Self::CantWrite,
            8 => Self::DisallowedType,
            -1 => Self::Unknown,
            other => Self::Other(other),
        }
    }

    /// Returns `true` for the success code.
    #[must_use]
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl From<ErrorCode> for i32 {
    fn from(code: ErrorCode) -> Self {
        code.as_i32()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i32())
    }
}

/// Errors that can occur while inspecting or persisting an upload.
#[derive(Error, Debug)]
pub enum UploadError {
    /// File is larger than the effective size limit.
    #[error("file too large: {size} bytes exceeds limit of {limit} bytes ({max_size_mb}M cap)")]
    FileTooLarge {
        /// Reported upload size in bytes.
        size: u64,
        /// Threshold the size was compared against, in bytes.
        limit: u64,
        /// Effective cap in megabytes.
        max_size_mb: u64,
    },

    /// Host reported that the file exceeded its own upload limit.
    #[error("host rejected upload: file exceeds server upload limit")]
    ServerSizeExceeded,

    /// Host reported that the file exceeded the form-declared limit.
    #[error("host rejected upload: file exceeds form size limit")]
    FormSizeExceeded,

    /// Host received only part of the file.
    #[error("host rejected upload: file was only partially uploaded")]
    Partial,

    /// No file was submitted under the configured field.
    #[error("no file uploaded for field '{field}'")]
    NoFile {
        /// Field name that was looked up.
        field: String,
    },

    /// Host has no temporary directory for uploads.
    #[error("host rejected upload: missing temporary directory")]
    MissingTempDir,

    /// Host failed to write the upload to temporary storage.
    #[error("host rejected upload: failed to write file to disk")]
    CantWrite,

    /// Host reported a transport code outside the known taxonomy.
    #[error("host rejected upload with code {code}")]
    Transport {
        /// Raw code as reported by the host.
        code: i32,
    },

    /// Extension is not on the allow-list.
    #[error("file type '{extension}' not allowed (allowed: {})", .allowed.join(", "))]
    DisallowedType {
        /// Extension derived from the original file name, with leading dot.
        extension: String,
        /// Effective allow-list.
        allowed: Vec<String>,
    },

    /// File signature does not belong to the configured category.
    #[error(
        "file content does not match type '{extension}' (detected: {})",
        .detected.as_deref().unwrap_or("unrecognized")
    )]
    ContentMismatch {
        /// Extension derived from the original file name, with leading dot.
        extension: String,
        /// MIME type sniffed from the file header, if any.
        detected: Option<String>,
        /// Effective allow-list.
        allowed: Vec<String>,
    },

    /// Temporary upload data could not be read for content sniffing.
    #[error("failed to read uploaded data at {path}: {source}")]
    ContentUnreadable {
        /// Temporary location of the upload.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Destination file already exists.
    #[error("destination already exists: {path}")]
    FileExists {
        /// Final destination path.
        path: PathBuf,
    },

    /// Moving the upload to its destination failed.
    #[error("failed to store upload at {path}: {source}")]
    Persist {
        /// Path that could not be created or written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl UploadError {
    /// Maps a non-zero host transport code to an error, preserving the raw
    /// value for codes outside the taxonomy.
    ///
    /// Returns `None` for `0`.
    #[must_use]
    pub fn from_transport(code: i32, field: &str) -> Option<Self> {
        let error = match code {
            0 => return None,
            1 => Self::ServerSizeExceeded,
            2 => Self::FormSizeExceeded,
            3 => Self::Partial,
            4 => Self::NoFile {
                field: field.to_string(),
            },
            6 => Self::MissingTempDir,
            7 => Self::CantWrite,
            other => Self::Transport { code: other },
        };
        Some(error)
    }

    /// Returns the numeric code for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use upcheck_core::{ErrorCode, UploadError};
    ///
    /// let err = UploadError::DisallowedType {
    ///     extension: ".exe".into(),
    ///     allowed: vec!["jpg".into()],
    /// };
    /// assert_eq!(err.code(), ErrorCode::DisallowedType);
    /// ```
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::FileTooLarge { .. } | Self::ServerSizeExceeded => ErrorCode::FileTooLarge,
            Self::FormSizeExceeded => ErrorCode::FormSizeExceeded,
            Self::Partial => ErrorCode::Partial,
            Self::NoFile { .. } => ErrorCode::NoFile,
            Self::MissingTempDir => ErrorCode::MissingTempDir,
            Self::CantWrite | Self::ContentUnreadable { .. } => ErrorCode::CantWrite,
            Self::Transport { code } => ErrorCode::from_i32(*code),
            Self::DisallowedType { .. } | Self::ContentMismatch { .. } => {
                ErrorCode::DisallowedType
            }
            Self::FileExists { .. } => ErrorCode::FileExists,
            Self::Persist { .. } => ErrorCode::Unknown,
        }
    }

    /// Returns `true` if the client can fix this by submitting a different
    /// file.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self.code(),
            ErrorCode::FileTooLarge
                | ErrorCode::FormSizeExceeded
                | ErrorCode::Partial
                | ErrorCode::NoFile
                | ErrorCode::DisallowedType
        )
    }

    /// Returns `true` if retrying the save (possibly under another name)
    /// may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self.code(),
            ErrorCode::FileExists | ErrorCode::CantWrite | ErrorCode::Unknown
        )
    }
}
