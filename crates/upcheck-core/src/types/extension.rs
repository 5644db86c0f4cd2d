//! File extension derived from a client-supplied file name.

use std::fmt;

/// Extension of an uploaded file, including its leading dot.
///
/// Derived from the final path component of the client's file name: the
/// substring starting at the last `.`. A name without a dot yields an empty
/// extension. Because only the final component is considered, the
/// extension never contains a path separator and is safe to append to a
/// destination file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Extension(String);

impl Extension {
    /// Derives the extension from an original file name.
    ///
    /// # Examples
    ///
    /// ```
    /// use upcheck_core::types::Extension;
    ///
    /// assert_eq!(Extension::from_file_name("photo.PNG").as_str(), ".PNG");
    /// assert_eq!(Extension::from_file_name("backup.tar.gz").as_str(), ".gz");
    /// assert_eq!(Extension::from_file_name("README").as_str(), "");
    /// assert_eq!(Extension::from_file_name("../x.d/evil").as_str(), "");
    /// ```
    #[must_use]
    pub fn from_file_name(original_name: &str) -> Self {
        let base = original_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(original_name);
        let ext = base.rfind('.').map_or("", |idx| &base[idx..]);
        if ext.contains('\0') {
            return Self::default();
        }
        Self(ext.to_string())
    }

    /// The extension including its leading dot, as the client sent it.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The extension without its leading dot.
    #[must_use]
    pub fn without_dot(&self) -> &str {
        self.0.strip_prefix('.').unwrap_or(&self.0)
    }

    /// Returns `true` if there is no extension.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Case-insensitive match against an allow-list.
    ///
    /// Allow-list entries may be written with or without a leading dot. An
    /// empty allow-list matches everything.
    #[must_use]
    pub fn is_allowed<S: AsRef<str>>(&self, allowed: &[S]) -> bool {
        if allowed.is_empty() {
            return true;
        }
        if self.is_empty() {
            return false;
        }
        let ours = self.without_dot();
        allowed
            .iter()
            .map(|entry| normalize_entry(entry.as_ref()))
            .any(|entry| entry.eq_ignore_ascii_case(ours))
    }
}

/// Strips surrounding whitespace and a leading dot from an allow-list entry.
pub(crate) fn normalize_entry(entry: &str) -> &str {
    let trimmed = entry.trim();
    trimmed.strip_prefix('.').unwrap_or(trimmed)
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Extension {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_dot_wins() {
        assert_eq!(Extension::from_file_name("a.b.c.jpg").as_str(), ".jpg");
    }

    #[test]
    fn test_dotfile() {
        let ext = Extension::from_file_name(".htaccess");
        assert_eq!(ext.as_str(), ".htaccess");
        assert_eq!(ext.without_dot(), "htaccess");
    }

    #[test]
    fn test_trailing_dot() {
        let ext = Extension::from_file_name("photo.");
        assert_eq!(ext.as_str(), ".");
        assert!(!ext.is_allowed(&["jpg"]));
    }

    #[test]
    fn test_only_final_component_is_used() {
        assert_eq!(Extension::from_file_name("dir.v2/photo").as_str(), "");
        assert_eq!(Extension::from_file_name("C:\\up.d\\photo.gif").as_str(), ".gif");
        assert_eq!(Extension::from_file_name("x./../../evil").as_str(), "");
    }

    #[test]
    fn test_case_insensitive_match() {
        let ext = Extension::from_file_name("photo.PNG");
        assert!(ext.is_allowed(&["png"]));
        assert!(ext.is_allowed(&[".Png"]));
        assert!(!ext.is_allowed(&["jpg", "gif"]));
    }

    #[test]
    fn test_empty_allow_list_matches_everything() {
        let empty: [&str; 0] = [];
        assert!(Extension::from_file_name("tool.exe").is_allowed(&empty));
        assert!(Extension::from_file_name("README").is_allowed(&empty));
    }

    #[test]
    fn test_missing_extension_rejected_by_non_empty_list() {
        assert!(!Extension::from_file_name("README").is_allowed(&["txt"]));
    }

    #[test]
    fn test_no_partial_matches() {
        let ext = Extension::from_file_name("photo.jpgx");
        assert!(!ext.is_allowed(&["jpg"]));
        let ext = Extension::from_file_name("photo.pn");
        assert!(!ext.is_allowed(&["png"]));
    }
}
