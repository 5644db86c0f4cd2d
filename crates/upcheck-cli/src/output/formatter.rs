//! Output formatter trait for CLI results.

use anyhow::Result;
use serde::Serialize;
use upcheck_core::Extension;
use upcheck_core::Rejection;
use upcheck_core::StoredUpload;
use upcheck_core::UploadRequest;
use upcheck_core::inspection::EffectiveLimits;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format an upload that passed inspection
    fn format_accepted(
        &self,
        request: &UploadRequest,
        extension: &Extension,
        limits: &EffectiveLimits,
    ) -> Result<()>;

    /// Format a stored upload
    fn format_stored(&self, stored: &StoredUpload) -> Result<()>;

    /// Format a rejected inspection or failed save
    fn format_rejection(&self, operation: &str, rejection: &Rejection);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            code: 0,
            data: Some(data),
            error: None,
        }
    }
}

impl JsonOutput<()> {
    pub fn error(operation: impl Into<String>, code: i32, error: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Error,
            code,
            data: None,
            error: Some(error.into()),
        }
    }
}
