//! Incoming upload record supplied by the host.

use std::path::Path;
use std::path::PathBuf;

/// An already-decoded file from a multipart request.
///
/// Produced by the hosting environment; the validator never builds one from
/// client input. `temp_location` is the only path persistence will ever
/// move from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    /// Form field the file was submitted under.
    pub field_name: String,
    /// File name as sent by the client.
    pub original_name: String,
    /// Where the host stored the received bytes.
    pub temp_location: PathBuf,
    /// Size reported by the host, in bytes.
    pub size_bytes: u64,
    /// Host transport error code (`0` = none).
    pub transport_error: i32,
}

impl UploadRequest {
    /// Creates a request with no transport error.
    #[must_use]
    pub fn new(
        field_name: impl Into<String>,
        original_name: impl Into<String>,
        temp_location: impl Into<PathBuf>,
        size_bytes: u64,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            original_name: original_name.into(),
            temp_location: temp_location.into(),
            size_bytes,
            transport_error: 0,
        }
    }

    /// Sets the host transport error code.
    #[must_use]
    pub fn with_transport_error(mut self, code: i32) -> Self {
        self.transport_error = code;
        self
    }

    /// Path of the received bytes.
    #[must_use]
    pub fn temp_path(&self) -> &Path {
        &self.temp_location
    }
}
