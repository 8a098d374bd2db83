//! Isolated execution of the rendered document.
//!
//! The [`IsolationHost`] trait is the seam between the pipeline and the
//! platform's restricted frame. A host receives a finished
//! [`FrameDocument`], replaces whatever the frame was running, and reports
//! the [`ContextId`] that fault messages from that frame will carry.

mod headless;
mod sandbox;

pub use headless::HeadlessHost;
pub use sandbox::{Capability, SandboxPolicy};

use std::fmt;

use crate::error::PreviewError;
use crate::resource::Locator;

/// Identity of an execution context, as seen on inbound messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextId(pub u64);

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ctx#{}", self.0)
    }
}

/// A fully transformed document ready to be assigned to the frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameDocument {
    /// Render generation that produced this document.
    pub generation: u64,
    /// Materialized locator of the document (the frame's content source).
    pub locator: Locator,
    /// The document text behind `locator`.
    pub html: String,
    /// Capabilities granted to the frame.
    pub sandbox: SandboxPolicy,
}

/// Restricted execution frame.
///
/// Each call to [`assign`](Self::assign) discards the previous document
/// wholesale; there is no incremental update of a running context.
pub trait IsolationHost {
    /// Make `document` the frame's content source.
    ///
    /// # Errors
    ///
    /// Returns [`PreviewError::Host`] if the frame cannot take the document.
    fn assign(&mut self, document: &FrameDocument) -> Result<ContextId, PreviewError>;

    /// Unload the current document, leaving the frame empty.
    ///
    /// Called before the document's resources are released, whenever the
    /// preview is blocked or has nothing to show.
    fn clear(&mut self);
}

impl<H: IsolationHost + ?Sized> IsolationHost for Box<H> {
    fn assign(&mut self, document: &FrameDocument) -> Result<ContextId, PreviewError> {
        (**self).assign(document)
    }

    fn clear(&mut self) {
        (**self).clear();
    }
}
