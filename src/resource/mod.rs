//! Render-scoped resources.
//!
//! The rewriter never embeds file contents into the entry document. It asks
//! a [`ResourceMaterializer`] to turn each referenced file into an
//! independently dereferenceable [`Locator`] and substitutes that instead.
//!
//! ```text
//! generation N                       generation N+1
//! ┌──────────────────────┐           ┌──────────────────────┐
//! │ app.js   ─► blob:..1 │  begin()  │ app.js   ─► blob:..4 │
//! │ main.css ─► blob:..2 │ ────────► │ main.css ─► blob:..5 │
//! │ document ─► blob:..3 │  release  │ document ─► blob:..6 │
//! └──────────────────────┘  1, 2, 3  └──────────────────────┘
//! ```
//!
//! Locators from generation N are released when generation N+1 begins
//! (see [`GenerationResources`]).

mod blob;
mod data_url;
mod registry;

pub use blob::{Blob, BlobStore, BLOB_SCHEME};
pub use data_url::DataUrlMaterializer;
pub use registry::GenerationResources;

use std::fmt;

use thiserror::Error;

use crate::file::ContentType;

/// Address of a materialized resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator(String);

impl Locator {
    /// Wrap a locator string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the locator as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Locator {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Error raised by a [`ResourceMaterializer`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct MaterializeError(pub String);

/// Turns text content into dereferenceable, type-tagged resources.
///
/// Implementations back onto whatever the rendering platform offers
/// (object URLs in a browser, an in-memory store in tests).
pub trait ResourceMaterializer {
    /// Materialize `content` tagged with `content_type`.
    ///
    /// # Errors
    ///
    /// Returns [`MaterializeError`] if the platform refuses the content.
    fn materialize(&self, content: &str, content_type: ContentType) -> Result<Locator, MaterializeError>;

    /// Release a locator previously returned by [`materialize`](Self::materialize).
    ///
    /// Releasing an unknown or already-released locator is a no-op.
    fn release(&self, locator: &Locator);
}

impl<M: ResourceMaterializer + ?Sized> ResourceMaterializer for &M {
    fn materialize(&self, content: &str, content_type: ContentType) -> Result<Locator, MaterializeError> {
        (**self).materialize(content, content_type)
    }

    fn release(&self, locator: &Locator) {
        (**self).release(locator)
    }
}

impl<M: ResourceMaterializer + ?Sized> ResourceMaterializer for std::sync::Arc<M> {
    fn materialize(&self, content: &str, content_type: ContentType) -> Result<Locator, MaterializeError> {
        (**self).materialize(content, content_type)
    }

    fn release(&self, locator: &Locator) {
        (**self).release(locator)
    }
}
