//! In-memory isolation host.

use super::{ContextId, FrameDocument, IsolationHost};
use crate::error::PreviewError;

/// Host without a rendering engine.
///
/// Models a single long-lived frame: its [`ContextId`] survives document
/// reassignment, the way a browser frame's window proxy does. Assigned
/// documents are recorded for inspection.
#[derive(Debug)]
pub struct HeadlessHost {
    context: ContextId,
    history: Vec<FrameDocument>,
    loaded: bool,
    detached: bool,
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new(ContextId(1))
    }
}

impl HeadlessHost {
    /// Create a host whose frame reports `context`.
    pub fn new(context: ContextId) -> Self {
        Self {
            context,
            history: Vec::new(),
            loaded: false,
            detached: false,
        }
    }

    /// The frame's context identity.
    #[inline]
    pub fn context(&self) -> ContextId {
        self.context
    }

    /// Document currently loaded in the frame.
    pub fn current(&self) -> Option<&FrameDocument> {
        self.history.last().filter(|_| self.loaded)
    }

    /// Every document ever assigned, oldest first.
    pub fn history(&self) -> &[FrameDocument] {
        &self.history
    }

    /// Detach the frame; later assignments fail.
    pub fn detach(&mut self) {
        self.detached = true;
    }
}

impl IsolationHost for HeadlessHost {
    fn assign(&mut self, document: &FrameDocument) -> Result<ContextId, PreviewError> {
        if self.detached {
            return Err(PreviewError::host("frame is detached"));
        }
        self.history.push(document.clone());
        self.loaded = true;
        Ok(self.context)
    }

    fn clear(&mut self) {
        self.loaded = false;
    }
}
