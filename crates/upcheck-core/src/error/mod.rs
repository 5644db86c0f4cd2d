//! Error types for upload inspection and persistence.

pub mod messages;
pub mod types;

pub use messages::MessageContext;
pub use messages::Rejection;
pub use messages::UNKNOWN_ERROR_MESSAGE;
pub use messages::render_message;
pub use types::ErrorCode;
pub use types::Result;
pub use types::UploadError;
