//! File categories and their default extension allow-lists.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A named group of related extensions used to derive a default allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FileCategory {
    /// Raster and vector images.
    #[default]
    Image,
    /// Plain-text documents.
    Text,
    /// Audio files.
    Audio,
    /// Video files.
    Video,
    /// Compressed archives.
    Zip,
    /// Applications (no restriction).
    App,
    /// Fonts (no restriction).
    Font,
    /// Any file (no restriction).
    File,
}

/// Error returned when parsing an unknown category name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown file category: '{0}'")]
pub struct UnknownCategory(pub String);

const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "ico", "svg", "tif", "tiff", "webp",
];
const TEXT_EXTENSIONS: &[&str] = &["txt", "md", "csv", "log", "json", "xml"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "flac", "aac", "m4a"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "avi", "mov", "mkv", "flv"];
const ZIP_EXTENSIONS: &[&str] = &["zip", "rar", "7z"];

impl FileCategory {
    /// All categories, in table order.
    pub const ALL: [Self; 8] = [
        Self::Image,
        Self::Text,
        Self::Audio,
        Self::Video,
        Self::Zip,
        Self::App,
        Self::Font,
        Self::File,
    ];

    /// Default extensions for this category, without leading dots.
    ///
    /// An empty slice means any extension is accepted.
    ///
    /// # Examples
    ///
    /// ```
    /// use upcheck_core::FileCategory;
    ///
    /// assert!(FileCategory::Zip.extensions().contains(&"7z"));
    /// assert!(FileCategory::File.extensions().is_empty());
    /// ```
    #[must_use]
    pub const fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Image => IMAGE_EXTENSIONS,
            Self::Text => TEXT_EXTENSIONS,
            Self::Audio => AUDIO_EXTENSIONS,
            Self::Video => VIDEO_EXTENSIONS,
            Self::Zip => ZIP_EXTENSIONS,
            Self::App | Self::Font | Self::File => &[],
        }
    }

    /// Lowercase name of the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Text => "text",
            Self::Audio => "audio",
            Self::Video => "video",
            Self::Zip => "zip",
            Self::App => "app",
            Self::Font => "font",
            Self::File => "file",
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("image".parse::<FileCategory>().unwrap(), FileCategory::Image);
        assert_eq!("ZIP".parse::<FileCategory>().unwrap(), FileCategory::Zip);
        assert_eq!(" Video ".parse::<FileCategory>().unwrap(), FileCategory::Video);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "spreadsheet".parse::<FileCategory>().unwrap_err();
        assert_eq!(err, UnknownCategory("spreadsheet".into()));
        assert!(err.to_string().contains("spreadsheet"));
    }

    #[test]
    fn test_unrestricted_categories() {
        for category in [FileCategory::App, FileCategory::Font, FileCategory::File] {
            assert!(category.extensions().is_empty(), "{category} should be unrestricted");
        }
    }

    #[test]
    fn test_image_table() {
        let exts = FileCategory::Image.extensions();
        for ext in ["jpg", "jpeg", "png", "gif", "webp", "svg"] {
            assert!(exts.contains(&ext));
        }
        assert!(!exts.contains(&"exe"));
    }

    #[test]
    fn test_display_matches_parse() {
        for category in FileCategory::ALL {
            assert_eq!(category.to_string().parse::<FileCategory>().unwrap(), category);
        }
    }
}
