//! Ordered path/content collection.

use serde::{Deserialize, Serialize};

use super::ContentType;

// =============================================================================
// FileData
// =============================================================================

/// A single project file.
///
/// `path` is project-relative and forward-slash separated. It is an opaque
/// key: lookups are exact, case-sensitive string matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileData {
    /// Project-relative path (e.g. `"styles/main.css"`).
    pub path: String,
    /// Full text content.
    pub content: String,
}

impl FileData {
    /// Create a new file.
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Last path segment, used as a tab label.
    pub fn file_name(&self) -> &str {
        match self.path.rsplit('/').next() {
            Some(name) if !name.is_empty() => name,
            _ => &self.path,
        }
    }

    /// Lowercased extension (text after the last `.`), if any.
    pub fn extension(&self) -> Option<String> {
        extension_of(&self.path)
    }

    /// Editor language identifier for syntax highlighting.
    pub fn language(&self) -> &'static str {
        match self.extension().as_deref() {
            Some("js" | "jsx") => "javascript",
            Some("ts" | "tsx") => "typescript",
            Some("html") => "html",
            Some("css") => "css",
            Some("json") => "json",
            _ => "plaintext",
        }
    }

    /// Content type used when this file is materialized.
    #[inline]
    pub fn content_type(&self) -> ContentType {
        ContentType::from_path(&self.path)
    }
}

pub(crate) fn extension_of(path: &str) -> Option<String> {
    path.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase())
}

// =============================================================================
// VirtualFileSet
// =============================================================================

/// Ordered in-memory collection of project files.
///
/// Duplicate paths are not rejected; lookups return the first match in
/// iteration order. The set has no change events: callers hand a whole new
/// set to the [`RenderController`](crate::RenderController) on every change.
///
/// # Example
///
/// ```ignore
/// let files = VirtualFileSet::from_iter([
///     FileData::new("index.html", "<html><head></head></html>"),
///     FileData::new("app.js", "console.log(1)"),
/// ]);
///
/// assert_eq!(files.get("app.js").map(|f| f.content.as_str()), Some("console.log(1)"));
///
/// // Editor change: a new set, not an in-place patch
/// let edited = files.with_content("app.js", "console.log(2)");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VirtualFileSet {
    files: Vec<FileData>,
}

impl VirtualFileSet {
    /// Create an empty file set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact-match lookup; first match wins.
    pub fn get(&self, path: &str) -> Option<&FileData> {
        self.files.iter().find(|f| f.path == path)
    }

    /// Check if a path exists.
    #[inline]
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Return a new set where every file at `path` carries `content`.
    ///
    /// Files at other paths are carried over unchanged. If no file matches,
    /// the returned set equals `self`.
    pub fn with_content(&self, path: &str, content: &str) -> Self {
        self.files
            .iter()
            .map(|f| {
                if f.path == path {
                    FileData::new(f.path.clone(), content)
                } else {
                    f.clone()
                }
            })
            .collect()
    }

    /// Iterate over files in set order.
    pub fn iter(&self) -> std::slice::Iter<'_, FileData> {
        self.files.iter()
    }

    /// Iterate over all paths in set order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.path.as_str())
    }

    /// Get the number of files.
    #[inline]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Borrow the files as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[FileData] {
        &self.files
    }
}

impl From<Vec<FileData>> for VirtualFileSet {
    fn from(files: Vec<FileData>) -> Self {
        Self { files }
    }
}

impl FromIterator<FileData> for VirtualFileSet {
    fn from_iter<I: IntoIterator<Item = FileData>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a VirtualFileSet {
    type Item = &'a FileData;
    type IntoIter = std::slice::Iter<'a, FileData>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

impl IntoIterator for VirtualFileSet {
    type Item = FileData;
    type IntoIter = std::vec::IntoIter<FileData>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> VirtualFileSet {
        VirtualFileSet::from_iter([
            FileData::new("index.html", "<html></html>"),
            FileData::new("js/app.js", "one"),
            FileData::new("js/app.js", "two"),
        ])
    }

    #[test]
    fn test_lookup_is_exact_and_first_match() {
        let files = sample();
        assert_eq!(files.get("js/app.js").unwrap().content, "one");
        assert!(files.get("JS/app.js").is_none());
        assert!(files.get("./js/app.js").is_none());
        assert!(files.get("js\\app.js").is_none());
    }

    #[test]
    fn test_with_content_replaces_every_match() {
        let files = sample();
        let edited = files.with_content("js/app.js", "three");

        assert_eq!(edited.len(), 3);
        assert!(edited.iter().filter(|f| f.path == "js/app.js").all(|f| f.content == "three"));
        assert_eq!(files.get("js/app.js").unwrap().content, "one");
        assert_eq!(files.with_content("missing.js", "x"), files);
    }

    #[test]
    fn test_file_name() {
        assert_eq!(FileData::new("a/b/c.css", "").file_name(), "c.css");
        assert_eq!(FileData::new("c.css", "").file_name(), "c.css");
        assert_eq!(FileData::new("dir/", "").file_name(), "dir/");
    }

    #[test]
    fn test_language() {
        assert_eq!(FileData::new("a.JSX", "").language(), "javascript");
        assert_eq!(FileData::new("a.tsx", "").language(), "typescript");
        assert_eq!(FileData::new("index.html", "").language(), "html");
        assert_eq!(FileData::new("data.json", "").language(), "json");
        assert_eq!(FileData::new("README", "").language(), "plaintext");
    }

    #[test]
    fn test_serde_shape() {
        let files = VirtualFileSet::from_iter([FileData::new("a.js", "x")]);
        let json = serde_json::to_value(&files).unwrap();
        assert_eq!(json, serde_json::json!([{ "path": "a.js", "content": "x" }]));
    }
}
