//! Moving accepted uploads to their destination.

pub mod atomic;
pub mod naming;

use std::fs;
use std::io;
use std::path::Path;
use std::time::Instant;

use crate::UploadError;
use crate::error::Result;
use crate::host::UploadHost;
use crate::inspection::InspectedUpload;
use crate::report::StoredUpload;

/// Stores an inspected upload under `destination_dir`.
///
/// The file is named `file_name` (or a generated name when `None` or
/// empty) followed by the upload's extension. The directory is created if
/// missing, one level only.
///
/// # Errors
///
/// - [`UploadError::FileExists`] if the final path is taken, either before
///   the move or by a concurrent writer during it. The temporary file is
///   left in place.
/// - [`UploadError::Persist`] if the directory cannot be created or the
///   host fails to move the data.
pub fn store<H: UploadHost>(
    host: &H,
    upload: &InspectedUpload,
    destination_dir: &Path,
    file_name: Option<&str>,
) -> Result<StoredUpload> {
    let started = Instant::now();
    ensure_directory(destination_dir)?;

    let stem = file_name
        .filter(|name| !name.is_empty())
        .map_or_else(naming::generate_file_name, str::to_string);
    let file_name = format!("{stem}{}", upload.extension);
    let path = destination_dir.join(&file_name);

    if fs::symlink_metadata(&path).is_ok() {
        return Err(UploadError::FileExists { path });
    }

    match host.move_upload(&upload.request, &path) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
            return Err(UploadError::FileExists { path });
        }
        Err(source) => return Err(UploadError::Persist { path, source }),
    }

    Ok(StoredUpload {
        path,
        file_name,
        extension: upload.extension.clone(),
        bytes: upload.request.size_bytes,
        duration: started.elapsed(),
    })
}

fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        return Ok(());
    }
    match fs::create_dir(dir) {
        Ok(()) => {
            tracing::debug!(path = %dir.display(), "created destination directory");
            Ok(())
        }
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists && dir.is_dir() => Ok(()),
        Err(source) => Err(UploadError::Persist {
            path: dir.to_path_buf(),
            source,
        }),
    }
}
