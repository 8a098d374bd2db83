//! Extension → content-type table.

use std::fmt;

use super::set::extension_of;

/// Content type attached to a materialized resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// `js`
    Script,
    /// `css`
    Stylesheet,
    /// `html`
    Markup,
    /// `json`
    Data,
    /// `svg`
    VectorImage,
    /// Anything else.
    PlainText,
}

impl ContentType {
    /// Classify a path by its lowercased extension.
    pub fn from_path(path: &str) -> Self {
        match extension_of(path).as_deref() {
            Some("js") => Self::Script,
            Some("css") => Self::Stylesheet,
            Some("html") => Self::Markup,
            Some("json") => Self::Data,
            Some("svg") => Self::VectorImage,
            _ => Self::PlainText,
        }
    }

    /// MIME type string.
    pub const fn mime(self) -> &'static str {
        match self {
            Self::Script => "application/javascript",
            Self::Stylesheet => "text/css",
            Self::Markup => "text/html",
            Self::Data => "application/json",
            Self::VectorImage => "image/svg+xml",
            Self::PlainText => "text/plain",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime())
    }
}
