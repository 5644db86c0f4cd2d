//! Host environment abstraction.
//!
//! The validator never reads ambient request state. Whatever received the
//! multipart body (a web framework, a test, the CLI) implements
//! [`UploadHost`] and hands it to [`UploadValidator::new`].
//!
//! [`UploadValidator::new`]: crate::UploadValidator::new

use std::collections::HashMap;
use std::fs;
use std::fs::File;
use std::io;
use std::io::Read;
use std::path::Path;

use crate::persistence::atomic::move_exclusive;
use crate::types::UploadRequest;

/// Capabilities the validator needs from the environment that received the
/// upload.
pub trait UploadHost {
    /// Returns the upload submitted under `field_name`, if any.
    fn fetch(&self, field_name: &str) -> Option<UploadRequest>;

    /// Size cap imposed by the environment, in megabytes. `None` if the
    /// environment has no cap of its own.
    fn max_upload_size_mb(&self) -> Option<u64>;

    /// Reads up to `len` bytes from the start of the upload's data.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary data cannot be read.
    fn read_prefix(&self, upload: &UploadRequest, len: usize) -> io::Result<Vec<u8>> {
        let file = File::open(upload.temp_path())?;
        let mut prefix = Vec::with_capacity(len);
        file.take(len as u64).read_to_end(&mut prefix)?;
        Ok(prefix)
    }

    /// Moves the upload's data to `destination`.
    ///
    /// Implementations must never replace an existing file and must report
    /// that case as [`io::ErrorKind::AlreadyExists`].
    ///
    /// # Errors
    ///
    /// Returns an error if the data could not be moved.
    fn move_upload(&self, upload: &UploadRequest, destination: &Path) -> io::Result<()>;
}

impl<H: UploadHost + ?Sized> UploadHost for &H {
    fn fetch(&self, field_name: &str) -> Option<UploadRequest> {
        (**self).fetch(field_name)
    }

    fn max_upload_size_mb(&self) -> Option<u64> {
        (**self).max_upload_size_mb()
    }

    fn read_prefix(&self, upload: &UploadRequest, len: usize) -> io::Result<Vec<u8>> {
        (**self).read_prefix(upload, len)
    }

    fn move_upload(&self, upload: &UploadRequest, destination: &Path) -> io::Result<()> {
        (**self).move_upload(upload, destination)
    }
}

/// Filesystem-backed host holding already-received uploads by field name.
///
/// # Examples
///
/// ```no_run
/// use upcheck_core::{LocalHost, UploadRequest};
///
/// let mut host = LocalHost::new().with_max_upload_size_mb(8);
/// host.insert(UploadRequest::new("file", "cat.jpg", "/tmp/php8F2a", 48_213));
/// ```
#[derive(Debug, Clone, Default)]
pub struct LocalHost {
    uploads: HashMap<String, UploadRequest>,
    max_upload_size_mb: Option<u64>,
}

impl LocalHost {
    /// Creates a host with no uploads and no size cap.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the environment-imposed size cap.
    #[must_use]
    pub fn with_max_upload_size_mb(mut self, max_upload_size_mb: u64) -> Self {
        self.max_upload_size_mb = Some(max_upload_size_mb);
        self
    }

    /// Registers a received upload under its field name, replacing any
    /// earlier upload for that field.
    pub fn insert(&mut self, upload: UploadRequest) {
        self.uploads.insert(upload.field_name.clone(), upload);
    }

    /// Copies `source` into `staging_dir` and registers the copy as the
    /// upload for `field_name`, as if it had just been received.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or the staging copy
    /// cannot be created.
    pub fn stage_file(
        &mut self,
        field_name: &str,
        original_name: &str,
        source: &Path,
        staging_dir: &Path,
    ) -> io::Result<UploadRequest> {
        let mut input = File::open(source)?;
        let temp_location = loop {
            let candidate = staging_dir.join(format!("upcheck-{:016x}.tmp", rand::random::<u64>()));
            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&candidate)
            {
                Ok(mut staged) => {
                    if let Err(err) = io::copy(&mut input, &mut staged) {
                        drop(staged);
                        let _ = fs::remove_file(&candidate);
                        return Err(err);
                    }
                    break candidate;
                }
                Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {}
                Err(err) => return Err(err),
            }
        };

        let size_bytes = fs::metadata(&temp_location)?.len();
        let upload = UploadRequest::new(field_name, original_name, temp_location, size_bytes);
        self.insert(upload.clone());
        Ok(upload)
    }
}

impl UploadHost for LocalHost {
    fn fetch(&self, field_name: &str) -> Option<UploadRequest> {
        self.uploads.get(field_name).cloned()
    }

    fn max_upload_size_mb(&self) -> Option<u64> {
        self.max_upload_size_mb
    }

    fn move_upload(&self, upload: &UploadRequest, destination: &Path) -> io::Result<()> {
        move_exclusive(upload.temp_path(), destination)
    }
}
