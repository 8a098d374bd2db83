//! Entry document selection.

use crate::error::PreviewError;
use crate::file::{FileData, VirtualFileSet};

/// Name of the conventional entry document.
pub const INDEX_HTML: &str = "index.html";

/// Select the document to render.
///
/// Picks the first file (in set order) whose path ends with `.html`, falling
/// back to a file at exactly `index.html`.
///
/// # Errors
///
/// Returns [`PreviewError::NoEntryPoint`] if neither rule matches.
pub fn resolve_entry(files: &VirtualFileSet) -> Result<&FileData, PreviewError> {
    files
        .iter()
        .find(|f| f.path.ends_with(".html"))
        .or_else(|| files.get(INDEX_HTML))
        .ok_or(PreviewError::NoEntryPoint)
}
