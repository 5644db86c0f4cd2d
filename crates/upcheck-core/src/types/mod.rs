//! Value types shared by inspection and persistence.
//!
//! Extensions are derived once from the client's file name and carried as a
//! newtype, so nothing downstream re-parses client input.

pub mod category;
pub mod extension;
pub mod upload;

pub use category::FileCategory;
pub use category::UnknownCategory;
pub use extension::Extension;
pub use upload::UploadRequest;
