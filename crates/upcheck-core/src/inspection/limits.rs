//! Limits in force for one inspection.

use crate::UploadConfig;
use crate::UploadError;
use crate::error::MessageContext;
use crate::error::Result;

/// Configured limits reconciled with the host's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveLimits {
    /// Smaller of the configured and host caps, in megabytes.
    pub max_size_mb: u64,
    /// Byte threshold derived from `max_size_mb` by the size rule.
    pub threshold_bytes: u64,
    /// Extension allow-list without leading dots (empty = any).
    pub allowed_extensions: Vec<String>,
}

impl EffectiveLimits {
    /// Resolves the limits for `config` under a host cap.
    ///
    /// # Examples
    ///
    /// ```
    /// use upcheck_core::UploadConfig;
    /// use upcheck_core::inspection::EffectiveLimits;
    ///
    /// let config = UploadConfig::default().with_max_size_mb(10);
    /// let limits = EffectiveLimits::resolve(&config, Some(4));
    /// assert_eq!(limits.max_size_mb, 4);
    /// assert_eq!(limits.threshold_bytes, 4 * 1024 * 1024 * 8);
    /// ```
    #[must_use]
    pub fn resolve(config: &UploadConfig, host_cap_mb: Option<u64>) -> Self {
        let max_size_mb = config.effective_max_size_mb(host_cap_mb);
        Self {
            max_size_mb,
            threshold_bytes: config.size_rule.threshold_bytes(max_size_mb),
            allowed_extensions: config.effective_extensions(),
        }
    }

    /// Checks a reported upload size against the threshold.
    ///
    /// A size equal to the threshold passes.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::FileTooLarge`] if `size_bytes` exceeds the
    /// threshold.
    pub fn check_size(&self, size_bytes: u64) -> Result<()> {
        if size_bytes > self.threshold_bytes {
            return Err(UploadError::FileTooLarge {
                size: size_bytes,
                limit: self.threshold_bytes,
                max_size_mb: self.max_size_mb,
            });
        }
        Ok(())
    }

    /// Context for rendering user-facing messages.
    #[must_use]
    pub fn message_context(&self) -> MessageContext {
        MessageContext {
            max_size_mb: self.max_size_mb,
            allowed_extensions: self.allowed_extensions.clone(),
        }
    }
}
