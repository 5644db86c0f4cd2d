//! Error conversion utilities for CLI.
//!
//! Converts upcheck-core's rejections into user-friendly contextual errors
//! (anyhow) with actionable guidance.

use std::path::Path;

use anyhow::anyhow;
use upcheck_core::Rejection;
use upcheck_core::UploadError;

/// Converts a [`Rejection`] to a user-friendly anyhow error with context.
///
/// The first line carries the numeric code and the message an upload form
/// would show; a `HINT` line follows where a flag can change the outcome.
pub fn convert_rejection(rejection: Rejection, file: &Path) -> anyhow::Error {
    let code = rejection.code();
    let summary = format!(
        "Upload '{}' rejected (code {code}): {}",
        file.display(),
        rejection.message()
    );

    match rejection.into_error() {
        UploadError::FileTooLarge { size, limit, .. } => anyhow!(
            "{summary}\n\
             Size: {size} bytes, limit: {limit} bytes\n\
             HINT: Use --max-size to raise the cap, or drop --strict-size."
        ),
        UploadError::ServerSizeExceeded => anyhow!(
            "{summary}\n\
             HINT: The server cap applies; use --server-max-size to simulate a larger one."
        ),
        UploadError::DisallowedType { extension, .. } => anyhow!(
            "{summary}\n\
             Extension: '{extension}'\n\
             HINT: Use --category or --ext to allow other file types."
        ),
        UploadError::ContentMismatch {
            extension,
            detected,
            ..
        } => anyhow!(
            "{summary}\n\
             Extension '{extension}' does not match the file contents (detected: {})\n\
             HINT: The file may have been renamed. Do not store files from untrusted sources.",
            detected.as_deref().unwrap_or("unrecognized")
        ),
        UploadError::NoFile { field } => anyhow!(
            "{summary}\n\
             HINT: No upload under field '{field}'; check --field and --settings."
        ),
        UploadError::FileExists { path } => anyhow!(
            "{summary}\n\
             Destination: {}\n\
             HINT: Use --name to choose another file name, or omit it to generate one.",
            path.display()
        ),
        err @ (UploadError::Persist { .. } | UploadError::ContentUnreadable { .. }) => {
            anyhow::Error::from(err).context(summary)
        }
        _ => anyhow!(summary),
    }
}
