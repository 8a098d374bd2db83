//! Intra-project reference rewriting.
//!
//! Scans the entry document once for `src="…"` / `href="…"` assignments and
//! replaces values that name a project file with a materialized locator:
//!
//! ```text
//! <script src="app.js">        ─►  <script src="blob:live-preview/…">
//! <link href="https://cdn/x">  ─►  unchanged (external)
//! <img src="missing.png">      ─►  unchanged (unresolved, fails at load)
//! ```
//!
//! The rewrite is single-pass and flat: referenced files are materialized
//! verbatim and never scanned themselves.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::trace;

use crate::error::PreviewError;
use crate::file::{ContentType, VirtualFileSet};
use crate::resource::{GenerationResources, Locator, ResourceMaterializer};

/// `(src|href)=` + quote + lazy non-empty value + quote.
static REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(src|href)=["'](.+?)["']"#).expect("reference pattern is valid")
});

/// Prefixes of values that are already resolvable outside the project.
const PASSTHROUGH_PREFIXES: &[&str] = &["http", "data:", "#"];

// =============================================================================
// Outcome
// =============================================================================

/// What happened to a single reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceAction {
    /// Absolute URL, data URL or fragment; left as is.
    External,
    /// No project file at that path; left as is.
    Unresolved,
    /// Replaced with a materialized locator.
    Substituted {
        /// The substituted locator.
        locator: Locator,
        /// Type tag the file was materialized with.
        content_type: ContentType,
    },
}

/// A reference found in the entry document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// `src` or `href`.
    pub attribute: String,
    /// Original attribute value.
    pub value: String,
    /// Action taken.
    pub action: ReferenceAction,
}

/// Result of rewriting an entry document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewritten {
    /// Document text with project references substituted.
    pub html: String,
    /// Every reference encountered, in document order.
    pub references: Vec<Reference>,
}

impl Rewritten {
    /// References that were replaced with locators.
    pub fn substituted(&self) -> impl Iterator<Item = &Reference> {
        self.references
            .iter()
            .filter(|r| matches!(r.action, ReferenceAction::Substituted { .. }))
    }

    /// References naming paths absent from the file set.
    pub fn unresolved(&self) -> impl Iterator<Item = &Reference> {
        self.references
            .iter()
            .filter(|r| r.action == ReferenceAction::Unresolved)
    }
}

// =============================================================================
// Rewriting
// =============================================================================

/// Whether a reference value points outside the project.
pub fn is_external(value: &str) -> bool {
    PASSTHROUGH_PREFIXES.iter().any(|p| value.starts_with(p))
}

/// Rewrite project references in `html`.
///
/// Every minted locator is recorded in `resources` (including those minted
/// before a failure), so the caller can release them with the generation.
///
/// # Errors
///
/// Returns [`PreviewError::Materialize`] if the materializer refuses a file.
pub fn rewrite_references<M: ResourceMaterializer + ?Sized>(
    html: &str,
    files: &VirtualFileSet,
    materializer: &M,
    resources: &mut GenerationResources,
) -> Result<Rewritten, PreviewError> {
    let mut out = String::with_capacity(html.len());
    let mut references = Vec::new();
    let mut last = 0;

    for caps in REFERENCE.captures_iter(html) {
        let Some((whole, attribute, value)) = split_captures(&caps) else {
            continue;
        };
        let (action, replacement) = resolve_reference(attribute, value, files, materializer, resources)?;

        out.push_str(&html[last..whole.start()]);
        match replacement {
            Some(text) => out.push_str(&text),
            None => out.push_str(whole.as_str()),
        }
        last = whole.end();

        references.push(Reference {
            attribute: attribute.to_string(),
            value: value.to_string(),
            action,
        });
    }
    out.push_str(&html[last..]);

    Ok(Rewritten { html: out, references })
}

fn split_captures<'h>(caps: &Captures<'h>) -> Option<(regex::Match<'h>, &'h str, &'h str)> {
    Some((caps.get(0)?, caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

fn resolve_reference<M: ResourceMaterializer + ?Sized>(
    attribute: &str,
    value: &str,
    files: &VirtualFileSet,
    materializer: &M,
    resources: &mut GenerationResources,
) -> Result<(ReferenceAction, Option<String>), PreviewError> {
    if is_external(value) {
        trace!(attribute, value, "external reference");
        return Ok((ReferenceAction::External, None));
    }

    let Some(file) = files.get(value) else {
        trace!(attribute, value, "unresolved reference");
        return Ok((ReferenceAction::Unresolved, None));
    };

    let content_type = file.content_type();
    let locator = materializer
        .materialize(&file.content, content_type)
        .map_err(|e| PreviewError::materialize(&file.path, e.0))?;
    resources.track(locator.clone());

    trace!(attribute, value, %locator, %content_type, "substituted reference");
    let replacement = format!("{attribute}=\"{locator}\"");
    Ok((ReferenceAction::Substituted { locator, content_type }, Some(replacement)))
}
