//! The configure → inspect → save lifecycle.
//!
//! Each phase consumes the previous one, so out-of-order calls do not
//! compile: `save` exists only on an [`AcceptedUpload`], which only a
//! successful [`UploadValidator::inspect`] produces.

use std::path::Path;

use crate::ConfigOverrides;
use crate::ErrorCode;
use crate::UploadConfig;
use crate::error::Rejection;
use crate::host::UploadHost;
use crate::inspection::EffectiveLimits;
use crate::inspection::InspectedUpload;
use crate::inspection::inspect_upload;
use crate::persistence;
use crate::report::StoredUpload;
use crate::types::Extension;
use crate::types::UploadRequest;

/// Validator for a single upload, not yet inspected.
///
/// Create one per incoming upload.
///
/// # Examples
///
/// ```no_run
/// use upcheck_core::{ConfigOverrides, Inspection, LocalHost, UploadValidator};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let host = LocalHost::new();
/// let overrides = ConfigOverrides {
///     category: Some("image".into()),
///     max_size_mb: Some(2),
///     ..Default::default()
/// };
///
/// match UploadValidator::new(&host).configure(overrides).inspect() {
///     Inspection::Accepted(upload) => {
///         let stored = upload.save(Some("/tmp/up".as_ref()), None)?;
///         println!("stored at {}", stored.path.display());
///     }
///     Inspection::Rejected(rejection) => {
///         println!("error {}: {}", rejection.code(), rejection.message());
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct UploadValidator<H> {
    host: H,
    config: UploadConfig,
}

impl<H: UploadHost> UploadValidator<H> {
    /// Creates a validator with the default configuration.
    #[must_use]
    pub fn new(host: H) -> Self {
        Self {
            host,
            config: UploadConfig::default(),
        }
    }

    /// Applies permissive overrides; see [`ConfigOverrides`].
    #[must_use]
    pub fn configure(mut self, overrides: ConfigOverrides) -> Self {
        self.config = self.config.apply(overrides);
        self
    }

    /// Replaces the whole configuration.
    #[must_use]
    pub fn with_config(mut self, config: UploadConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &UploadConfig {
        &self.config
    }

    /// Inspects the upload, consuming the validator.
    pub fn inspect(self) -> Inspection<H> {
        let limits = EffectiveLimits::resolve(&self.config, self.host.max_upload_size_mb());
        let field = self.config.field_name.as_str();

        match inspect_upload(&self.config, &limits, &self.host) {
            Ok(upload) => {
                tracing::info!(
                    field,
                    name = %upload.request.original_name,
                    size = upload.request.size_bytes,
                    "upload accepted"
                );
                Inspection::Accepted(AcceptedUpload {
                    host: self.host,
                    config: self.config,
                    upload,
                    limits,
                })
            }
            Err(err) => {
                tracing::warn!(field, code = err.code().as_i32(), error = %err, "upload rejected");
                Inspection::Rejected(Rejection::new(err, limits.message_context()))
            }
        }
    }
}

/// Outcome of inspecting an upload.
#[derive(Debug)]
pub enum Inspection<H> {
    /// Every check passed; the upload can be saved.
    Accepted(AcceptedUpload<H>),
    /// A check failed.
    Rejected(Rejection),
}

impl<H> Inspection<H> {
    /// Returns `true` if the upload was accepted.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    /// Numeric outcome: [`ErrorCode::Ok`] when accepted.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Accepted(_) => ErrorCode::Ok,
            Self::Rejected(rejection) => rejection.code(),
        }
    }

    /// User-facing message: empty when accepted.
    pub fn message(&self) -> &str {
        match self {
            Self::Accepted(_) => "",
            Self::Rejected(rejection) => rejection.message(),
        }
    }

    /// Converts into a `Result`.
    ///
    /// # Errors
    ///
    /// Returns the rejection if the upload was not accepted.
    pub fn into_result(self) -> Result<AcceptedUpload<H>, Rejection> {
        match self {
            Self::Accepted(upload) => Ok(upload),
            Self::Rejected(rejection) => Err(rejection),
        }
    }
}

/// An upload that passed inspection and may be saved once.
#[derive(Debug)]
pub struct AcceptedUpload<H> {
    host: H,
    config: UploadConfig,
    upload: InspectedUpload,
    limits: EffectiveLimits,
}

impl<H: UploadHost> AcceptedUpload<H> {
    /// The host's record of the upload.
    #[must_use]
    pub const fn request(&self) -> &UploadRequest {
        &self.upload.request
    }

    /// Extension derived from the original file name.
    #[must_use]
    pub const fn extension(&self) -> &Extension {
        &self.upload.extension
    }

    /// Limits the upload was checked against.
    #[must_use]
    pub const fn limits(&self) -> &EffectiveLimits {
        &self.limits
    }

    /// Moves the upload to `destination_dir/file_name + extension`.
    ///
    /// `destination_dir` defaults to the configured destination and
    /// `file_name` to a generated name. Consumes the upload: it can be
    /// saved at most once.
    ///
    /// # Errors
    ///
    /// Returns a [`Rejection`] with [`ErrorCode::FileExists`] if the
    /// destination is taken, or [`ErrorCode::Unknown`] if the move fails.
    pub fn save(
        self,
        destination_dir: Option<&Path>,
        file_name: Option<&str>,
    ) -> Result<StoredUpload, Rejection> {
        let dir = destination_dir.unwrap_or(&self.config.destination);

        match persistence::store(&self.host, &self.upload, dir, file_name) {
            Ok(stored) => {
                tracing::info!(
                    path = %stored.path.display(),
                    bytes = stored.bytes,
                    "upload stored"
                );
                Ok(stored)
            }
            Err(err) => {
                tracing::warn!(
                    dir = %dir.display(),
                    code = err.code().as_i32(),
                    error = %err,
                    "failed to store upload"
                );
                Err(Rejection::new(err, self.limits.message_context()))
            }
        }
    }
}
