//! Upload inspection.
//!
//! Runs the checks in a fixed order, stopping at the first failure:
//!
//! 1. the host has an upload for the configured field
//! 2. the host reported no transport error
//! 3. the reported size is within the effective threshold
//! 4. the extension is on the effective allow-list
//! 5. (optional) the file signature matches the allow-list or category
//!
//! Inspection never touches the destination directory.

pub mod content;
pub mod limits;

pub use limits::EffectiveLimits;

use content::Expected;
use content::SNIFF_LEN;
use content::Signature;

use crate::UploadConfig;
use crate::UploadError;
use crate::error::Result;
use crate::host::UploadHost;
use crate::types::Extension;
use crate::types::UploadRequest;

/// An upload that passed every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectedUpload {
    /// The host's record of the upload.
    pub request: UploadRequest,
    /// Extension derived from the original name.
    pub extension: Extension,
}

/// Runs all checks for `config` against `host`.
///
/// # Errors
///
/// Returns the first failed check as an [`UploadError`].
pub fn inspect_upload<H: UploadHost>(
    config: &UploadConfig,
    limits: &EffectiveLimits,
    host: &H,
) -> Result<InspectedUpload> {
    let field = config.field_name.as_str();
    let request = host.fetch(field).ok_or_else(|| UploadError::NoFile {
        field: field.to_string(),
    })?;
    let extension = Extension::from_file_name(&request.original_name);

    if let Some(err) = UploadError::from_transport(request.transport_error, field) {
        return Err(err);
    }

    tracing::debug!(
        field,
        size = request.size_bytes,
        threshold = limits.threshold_bytes,
        max_size_mb = limits.max_size_mb,
        "checking upload size"
    );
    limits.check_size(request.size_bytes)?;

    if !extension.is_allowed(&limits.allowed_extensions) {
        return Err(UploadError::DisallowedType {
            extension: extension.as_str().to_string(),
            allowed: limits.allowed_extensions.clone(),
        });
    }

    if config.verify_content
        && let Some(expected) =
            content::expectation(config, &limits.allowed_extensions, &extension)
    {
        verify_signature(expected, limits, host, &request, &extension)?;
    }

    Ok(InspectedUpload { request, extension })
}

fn verify_signature<H: UploadHost>(
    expected: Expected<'_>,
    limits: &EffectiveLimits,
    host: &H,
    request: &UploadRequest,
    extension: &Extension,
) -> Result<()> {
    let prefix = host
        .read_prefix(request, SNIFF_LEN)
        .map_err(|source| UploadError::ContentUnreadable {
            path: request.temp_location.clone(),
            source,
        })?;

    let detected = match content::sniff(&prefix, expected) {
        Signature::Matches => return Ok(()),
        Signature::Mismatch { detected } => Some(detected),
        Signature::Unrecognized => None,
    };
    Err(UploadError::ContentMismatch {
        extension: extension.as_str().to_string(),
        detected,
        allowed: limits.allowed_extensions.clone(),
    })
}
