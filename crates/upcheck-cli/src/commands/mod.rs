//! Command implementations.

pub mod check;
pub mod completion;
pub mod store;

use crate::cli::UploadArgs;
use anyhow::Context;
use anyhow::Result;
use tempfile::TempDir;
use upcheck_core::LocalHost;

/// A file copied into a private staging directory and registered with a
/// [`LocalHost`] as if the server had just received it.
///
/// The staging directory is removed on drop, taking any upload that was
/// not stored with it.
pub struct StagedUpload {
    pub host: LocalHost,
    _staging: TempDir,
}

/// Stages `args.file` under the configured field name.
pub fn stage(args: &UploadArgs, field_name: &str) -> Result<StagedUpload> {
    let staging = TempDir::new().context("failed to create staging directory")?;

    let client_name = match &args.client_name {
        Some(name) => name.clone(),
        None => args
            .file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .with_context(|| format!("'{}' has no file name", args.file.display()))?,
    };

    let mut host = LocalHost::new();
    if let Some(cap) = args.server_max_size {
        host = host.with_max_upload_size_mb(cap);
    }

    let upload = host
        .stage_file(field_name, &client_name, &args.file, staging.path())
        .with_context(|| format!("failed to read '{}'", args.file.display()))?;
    tracing::debug!(
        field = field_name,
        name = %client_name,
        temp = %upload.temp_location.display(),
        size = upload.size_bytes,
        "staged upload"
    );

    if args.transport_error != 0 {
        host.insert(upload.with_transport_error(args.transport_error));
    }

    Ok(StagedUpload {
        host,
        _staging: staging,
    })
}
