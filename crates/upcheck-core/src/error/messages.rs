//! User-facing rejection messages.
//!
//! `UploadError`'s `Display` is aimed at logs and developers. The messages
//! here are what an upload form shows back to the person who submitted the
//! file, rendered from the numeric code alone plus the limits that were in
//! force.

use std::cell::OnceCell;
use std::fmt;

use super::types::ErrorCode;
use super::types::UploadError;

/// Message returned for codes with no dedicated text.
pub const UNKNOWN_ERROR_MESSAGE: &str = "unknown error";

/// Limits in force when an upload was rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageContext {
    /// Effective size cap in megabytes.
    pub max_size_mb: u64,
    /// Effective extension allow-list (empty = any).
    pub allowed_extensions: Vec<String>,
}

/// Renders the user-facing message for a code.
///
/// Never fails: codes outside the taxonomy render
/// [`UNKNOWN_ERROR_MESSAGE`].
///
/// # Examples
///
/// ```
/// use upcheck_core::ErrorCode;
/// use upcheck_core::error::{MessageContext, render_message};
///
/// let ctx = MessageContext {
///     max_size_mb: 2,
///     allowed_extensions: vec!["jpg".into(), "png".into()],
/// };
/// assert_eq!(
///     render_message(ErrorCode::FileTooLarge, &ctx),
///     "uploaded file may be at most 2M"
/// );
/// assert_eq!(render_message(ErrorCode::Other(99), &ctx), "unknown error");
/// ```
#[must_use]
pub fn render_message(code: ErrorCode, ctx: &MessageContext) -> String {
    match code {
        ErrorCode::Ok => String::new(),
        ErrorCode::FileTooLarge => format!("uploaded file may be at most {}M", ctx.max_size_mb),
        ErrorCode::FormSizeExceeded => "uploaded file is too large".into(),
        ErrorCode::Partial => "file was only partially uploaded".into(),
        ErrorCode::NoFile => "no file was uploaded".into(),
        ErrorCode::FileExists => "file already exists".into(),
        ErrorCode::MissingTempDir => "temporary upload folder is missing".into(),
        ErrorCode::CantWrite => "failed to write file".into(),
        ErrorCode::DisallowedType => format!(
            "only {} files may be uploaded",
            ctx.allowed_extensions.join(",")
        ),
        ErrorCode::Unknown | ErrorCode::Other(_) => UNKNOWN_ERROR_MESSAGE.into(),
    }
}

/// A failed inspection or save.
///
/// Carries the structured [`UploadError`], its numeric code, and a
/// user-facing message that is rendered on first access and cached.
#[derive(Debug)]
pub struct Rejection {
    error: UploadError,
    context: MessageContext,
    message: OnceCell<String>,
}

impl Rejection {
    pub(crate) fn new(error: UploadError, context: MessageContext) -> Self {
        Self {
            error,
            context,
            message: OnceCell::new(),
        }
    }

    /// Numeric code of the failure.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.error.code()
    }

    /// The structured error.
    #[must_use]
    pub const fn error(&self) -> &UploadError {
        &self.error
    }

    /// Limits in force when the rejection happened.
    #[must_use]
    pub const fn context(&self) -> &MessageContext {
        &self.context
    }

    /// User-facing message for this rejection.
    pub fn message(&self) -> &str {
        self.message
            .get_or_init(|| render_message(self.code(), &self.context))
    }

    /// Consumes the rejection, returning the structured error.
    #[must_use]
    pub fn into_error(self) -> UploadError {
        self.error
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for Rejection {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
