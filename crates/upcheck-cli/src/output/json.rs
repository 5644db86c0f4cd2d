//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use upcheck_core::Extension;
use upcheck_core::Rejection;
use upcheck_core::StoredUpload;
use upcheck_core::UploadRequest;
use upcheck_core::inspection::EffectiveLimits;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct AcceptedOutput<'a> {
    field: &'a str,
    original_name: &'a str,
    extension: &'a str,
    size_bytes: u64,
    max_size_mb: u64,
    threshold_bytes: u64,
    allowed_extensions: &'a [String],
}

#[derive(Serialize)]
struct StoredOutput<'a> {
    path: String,
    file_name: &'a str,
    extension: &'a str,
    bytes: u64,
    generated_name: bool,
    duration_ms: u128,
}

impl OutputFormatter for JsonFormatter {
    fn format_accepted(
        &self,
        request: &UploadRequest,
        extension: &Extension,
        limits: &EffectiveLimits,
    ) -> Result<()> {
        let data = AcceptedOutput {
            field: &request.field_name,
            original_name: &request.original_name,
            extension: extension.as_str(),
            size_bytes: request.size_bytes,
            max_size_mb: limits.max_size_mb,
            threshold_bytes: limits.threshold_bytes,
            allowed_extensions: &limits.allowed_extensions,
        };

        Self::output(&JsonOutput::success("check", data))
    }

    fn format_stored(&self, stored: &StoredUpload) -> Result<()> {
        let data = StoredOutput {
            path: stored.path.display().to_string(),
            file_name: &stored.file_name,
            extension: stored.extension.as_str(),
            bytes: stored.bytes,
            generated_name: stored.has_generated_name(),
            duration_ms: stored.duration.as_millis(),
        };

        Self::output(&JsonOutput::success("store", data))
    }

    fn format_rejection(&self, operation: &str, rejection: &Rejection) {
        let output = JsonOutput::error(operation, rejection.code().as_i32(), rejection.message());
        let _ = Self::output(&output);
    }
}
