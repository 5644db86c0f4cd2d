//! Validate-then-persist pipeline for single-file HTTP uploads.
//!
//! `upcheck-core` inspects a file the host environment has already received
//! (transport errors, size, extension, optionally its signature) and, only
//! if it is acceptable, moves it under a chosen directory and name without
//! ever overwriting an existing file.
//!
//! # Examples
//!
//! ```no_run
//! use upcheck_core::{FileCategory, LocalHost, UploadConfig, UploadRequest, UploadValidator};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut host = LocalHost::new().with_max_upload_size_mb(8);
//! host.insert(UploadRequest::new("file", "cat.jpg", "/tmp/php8F2a", 48_213));
//!
//! let config = UploadConfig::default()
//!     .with_category(FileCategory::Image)
//!     .with_max_size_mb(2);
//!
//! let accepted = UploadValidator::new(&host)
//!     .with_config(config)
//!     .inspect()
//!     .into_result()?;
//! let stored = accepted.save(Some("/srv/uploads".as_ref()), None)?;
//! println!("stored {} bytes at {}", stored.bytes, stored.path.display());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod host;
pub mod inspection;
pub mod persistence;
pub mod report;
pub mod types;
pub mod validator;

// Re-export main API types
pub use config::ConfigOverrides;
pub use config::SizeRule;
pub use config::UploadConfig;
pub use error::ErrorCode;
pub use error::Rejection;
pub use error::Result;
pub use error::UploadError;
pub use host::LocalHost;
pub use host::UploadHost;
pub use report::StoredUpload;
pub use validator::AcceptedUpload;
pub use validator::Inspection;
pub use validator::UploadValidator;

pub use types::Extension;
pub use types::FileCategory;
pub use types::UploadRequest;
