//! File signature sniffing.
//!
//! Compares the first bytes of an upload against known magic numbers. With
//! the category table in force, the detected format must belong to the
//! category's family; categories without reliable signatures (text, app,
//! font, file) are never sniffed. With an explicit allow-list, the detected
//! format's extension must be on the list, and only uploads claiming a
//! format with a known signature are sniffed.

use infer::MatcherType;

use crate::UploadConfig;
use crate::types::Extension;
use crate::types::FileCategory;

/// Number of leading bytes read for sniffing.
pub const SNIFF_LEN: usize = 8192;

/// Extensions in sniffed categories that are text-based and carry no
/// magic number.
const UNSNIFFABLE_EXTENSIONS: &[&str] = &["svg"];

/// Alternate spellings mapped to the extension the signature table uses.
const EXTENSION_ALIASES: &[(&str, &str)] = &[
    ("jpeg", "jpg"),
    ("jpe", "jpg"),
    ("tiff", "tif"),
    ("mpeg", "mpg"),
    ("htm", "html"),
];

/// Signature family expected for a category, if it has one.
#[must_use]
pub const fn expected_family(category: FileCategory) -> Option<MatcherType> {
    match category {
        FileCategory::Image => Some(MatcherType::Image),
        FileCategory::Audio => Some(MatcherType::Audio),
        FileCategory::Video => Some(MatcherType::Video),
        FileCategory::Zip => Some(MatcherType::Archive),
        FileCategory::Text | FileCategory::App | FileCategory::Font | FileCategory::File => None,
    }
}

/// What a sniffed header is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected<'a> {
    /// Any format of this family.
    Family(MatcherType),
    /// Any format whose extension is on this allow-list.
    Extensions(&'a [String]),
}

/// Chooses what an upload should be sniffed against, or `None` to skip
/// sniffing it.
///
/// `allowed` is the effective allow-list for `config`.
#[must_use]
pub fn expectation<'a>(
    config: &UploadConfig,
    allowed: &'a [String],
    extension: &Extension,
) -> Option<Expected<'a>> {
    let claimed = extension.without_dot();
    if UNSNIFFABLE_EXTENSIONS
        .iter()
        .any(|ext| ext.eq_ignore_ascii_case(claimed))
    {
        return None;
    }

    if config.has_explicit_extensions() {
        infer::is_supported(&canonical_extension(claimed)).then_some(Expected::Extensions(allowed))
    } else {
        expected_family(config.category).map(Expected::Family)
    }
}

/// Lowercased extension, with aliases resolved to the signature table's
/// spelling.
fn canonical_extension(ext: &str) -> String {
    let lower = ext.trim_start_matches('.').to_ascii_lowercase();
    EXTENSION_ALIASES
        .iter()
        .find(|(alias, _)| *alias == lower)
        .map_or(lower, |(_, canonical)| (*canonical).to_string())
}

/// Outcome of sniffing a header prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signature {
    /// Detected format is the expected one.
    Matches,
    /// Detected format is something else.
    Mismatch {
        /// MIME type of the detected format.
        detected: String,
    },
    /// No known signature was found.
    Unrecognized,
}

/// Sniffs `prefix` and compares it to `expected`.
///
/// An empty extension allow-list accepts any recognized format.
///
/// # Examples
///
/// ```
/// use infer::MatcherType;
/// use upcheck_core::inspection::content::{Expected, Signature, sniff};
///
/// let png = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
/// assert_eq!(sniff(png, Expected::Family(MatcherType::Image)), Signature::Matches);
/// assert!(matches!(
///     sniff(png, Expected::Family(MatcherType::Archive)),
///     Signature::Mismatch { .. }
/// ));
///
/// let allowed = vec!["PNG".to_string()];
/// assert_eq!(sniff(png, Expected::Extensions(&allowed)), Signature::Matches);
/// ```
#[must_use]
pub fn sniff(prefix: &[u8], expected: Expected<'_>) -> Signature {
    let Some(kind) = infer::get(prefix) else {
        return Signature::Unrecognized;
    };
    let matches = match expected {
        Expected::Family(family) => kind.matcher_type() == family,
        Expected::Extensions(allowed) => {
            allowed.is_empty()
                || allowed
                    .iter()
                    .any(|ext| canonical_extension(ext) == kind.extension())
        }
    };
    if matches {
        Signature::Matches
    } else {
        Signature::Mismatch {
            detected: kind.mime_type().to_string(),
        }
    }
}
