//! Upload validation configuration.

use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Deserializer;
use serde::de::IgnoredAny;
use serde::de::MapAccess;
use serde::de::Visitor;

use crate::types::FileCategory;
use crate::types::extension::normalize_entry;

/// How a megabyte cap is turned into a byte threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeRule {
    /// `cap * 1024 * 1024 * 8`.
    ///
    /// Compatible with deployments that historically compared byte counts
    /// against a bit-scaled threshold. Effectively allows eight times the
    /// configured megabytes.
    #[default]
    Legacy,
    /// `cap * 1024 * 1024`.
    Strict,
}

impl SizeRule {
    /// Byte threshold for a cap in megabytes. Saturates at `u64::MAX`.
    ///
    /// # Examples
    ///
    /// ```
    /// use upcheck_core::SizeRule;
    ///
    /// assert_eq!(SizeRule::Strict.threshold_bytes(2), 2 * 1024 * 1024);
    /// assert_eq!(SizeRule::Legacy.threshold_bytes(2), 2 * 1024 * 1024 * 8);
    /// assert_eq!(SizeRule::Legacy.threshold_bytes(u64::MAX), u64::MAX);
    /// ```
    #[must_use]
    pub const fn threshold_bytes(self, max_size_mb: u64) -> u64 {
        let bytes = max_size_mb.saturating_mul(1024 * 1024);
        match self {
            Self::Legacy => bytes.saturating_mul(8),
            Self::Strict => bytes,
        }
    }
}

/// Settings for validating and storing one upload.
///
/// # Examples
///
/// ```
/// use upcheck_core::{FileCategory, UploadConfig};
///
/// let config = UploadConfig::default()
///     .with_category(FileCategory::Zip)
///     .with_max_size_mb(10)
///     .with_destination("/srv/uploads");
/// assert_eq!(config.effective_extensions(), vec!["zip", "rar", "7z"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadConfig {
    /// Form field to read the upload from.
    pub field_name: String,

    /// Explicit extension allow-list. `None` (or empty) falls back to the
    /// category table.
    pub allowed_extensions: Option<Vec<String>>,

    /// Configured size cap in megabytes, before reconciling with the host.
    pub max_size_mb: u64,

    /// Default destination directory for `save`.
    pub destination: PathBuf,

    /// Category used to derive the default allow-list.
    pub category: FileCategory,

    /// Megabyte-to-byte conversion for the size check.
    pub size_rule: SizeRule,

    /// Sniff the file header and require it to match the category.
    pub verify_content: bool,
}

impl Default for UploadConfig {
    /// Default values:
    /// - `field_name`: `"file"`
    /// - `allowed_extensions`: `None` (derive from category)
    /// - `max_size_mb`: 2
    /// - `destination`: `"uploads"`
    /// - `category`: image
    /// - `size_rule`: legacy
    /// - `verify_content`: false
    fn default() -> Self {
        Self {
            field_name: "file".to_string(),
            allowed_extensions: None,
            max_size_mb: 2,
            destination: PathBuf::from("uploads"),
            category: FileCategory::Image,
            size_rule: SizeRule::Legacy,
            verify_content: false,
        }
    }
}

impl UploadConfig {
    /// Sets the form field name.
    #[must_use]
    pub fn with_field_name(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = field_name.into();
        self
    }

    /// Sets an explicit extension allow-list.
    #[must_use]
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_extensions = Some(extensions.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the size cap in megabytes.
    #[must_use]
    pub fn with_max_size_mb(mut self, max_size_mb: u64) -> Self {
        self.max_size_mb = max_size_mb;
        self
    }

    /// Sets the default destination directory.
    #[must_use]
    pub fn with_destination(mut self, destination: impl Into<PathBuf>) -> Self {
        self.destination = destination.into();
        self
    }

    /// Sets the file category.
    #[must_use]
    pub fn with_category(mut self, category: FileCategory) -> Self {
        self.category = category;
        self
    }

    /// Sets the size conversion rule.
    #[must_use]
    pub fn with_size_rule(mut self, size_rule: SizeRule) -> Self {
        self.size_rule = size_rule;
        self
    }

    /// Enables or disables content sniffing.
    #[must_use]
    pub fn with_content_verification(mut self, verify: bool) -> Self {
        self.verify_content = verify;
        self
    }

    /// Applies permissive overrides. Only allow-listed settings can change;
    /// an unknown category name is ignored and the current category stays
    /// in force.
    #[must_use]
    pub fn apply(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(field_name) = overrides.field_name {
            self.field_name = field_name;
        }
        if let Some(extensions) = overrides.allowed_extensions {
            self.allowed_extensions = Some(extensions.into_vec());
        }
        if let Some(max_size_mb) = overrides.max_size_mb {
            self.max_size_mb = max_size_mb;
        }
        if let Some(destination) = overrides.destination {
            self.destination = destination;
        }
        if let Some(name) = overrides.category {
            match name.parse::<FileCategory>() {
                Ok(category) => self.category = category,
                Err(err) => tracing::warn!(%err, "ignoring category override"),
            }
        }
        self
    }

    /// Effective allow-list, without leading dots.
    ///
    /// Explicit extensions win; otherwise the category's table entry. An
    /// empty result means any extension is accepted.
    #[must_use]
    pub fn effective_extensions(&self) -> Vec<String> {
        match &self.allowed_extensions {
            Some(explicit) if self.has_explicit_extensions() => explicit
                .iter()
                .map(|ext| normalize_entry(ext))
                .filter(|ext| !ext.is_empty())
                .map(str::to_string)
                .collect(),
            _ => self
                .category
                .extensions()
                .iter()
                .map(|ext| (*ext).to_string())
                .collect(),
        }
    }

    /// Returns `true` if a non-empty explicit allow-list replaces the
    /// category table.
    #[must_use]
    pub fn has_explicit_extensions(&self) -> bool {
        self.allowed_extensions
            .as_ref()
            .is_some_and(|explicit| !explicit.is_empty())
    }

    /// Effective cap in megabytes: the smaller of the configured cap and
    /// the host's cap, if the host has one.
    #[must_use]
    pub fn effective_max_size_mb(&self, host_cap_mb: Option<u64>) -> u64 {
        host_cap_mb.map_or(self.max_size_mb, |cap| self.max_size_mb.min(cap))
    }
}

/// Extension list override: accepts a list or a comma-separated string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ExtensionList {
    /// `["jpg", "png"]`
    List(Vec<String>),
    /// `"jpg,png"`
    Csv(String),
}

impl ExtensionList {
    /// Flattens into individual entries.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::List(list) => list,
            Self::Csv(csv) => csv
                .split(',')
                .map(str::trim)
                .filter(|ext| !ext.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Caller-supplied overrides.
///
/// Only the allow-listed settings have fields here. Any other key in the
/// source document, including names of internal state such as `error_code`
/// or `file_ext`, is dropped during deserialization. Each setting also
/// accepts a short legacy key (`name`, `exts`, `max_size`, `path`, `type`);
/// when a document carries both spellings, the later one wins.
///
/// # Examples
///
/// ```
/// use upcheck_core::{ConfigOverrides, UploadConfig};
///
/// let overrides: ConfigOverrides = serde_json::from_str(
///     r#"{"type": "zip", "max_size": 5, "error_code": 0, "upload_success": true}"#,
/// )?;
/// let config = UploadConfig::default().apply(overrides);
/// assert_eq!(config.max_size_mb, 5);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Form field to read. Legacy key: `name`.
    pub field_name: Option<String>,
    /// Extension allow-list. Legacy key: `exts`.
    pub allowed_extensions: Option<ExtensionList>,
    /// Size cap in megabytes. Legacy key: `max_size`.
    pub max_size_mb: Option<u64>,
    /// Destination directory. Legacy key: `path`.
    pub destination: Option<PathBuf>,
    /// Category name. Legacy key: `type`.
    pub category: Option<String>,
}

impl<'de> Deserialize<'de> for ConfigOverrides {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(OverridesVisitor)
    }
}

struct OverridesVisitor;

impl<'de> Visitor<'de> for OverridesVisitor {
    type Value = ConfigOverrides;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map of upload settings")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut overrides = ConfigOverrides::default();
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "field_name" | "name" => overrides.field_name = map.next_value()?,
                "allowed_extensions" | "exts" => overrides.allowed_extensions = map.next_value()?,
                "max_size_mb" | "max_size" => overrides.max_size_mb = map.next_value()?,
                "destination" | "path" => overrides.destination = map.next_value()?,
                "category" | "type" => overrides.category = map.next_value()?,
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(overrides)
    }
}
