//! Preview error type.

use thiserror::Error;

use crate::file::GenerationError;

/// Error type for preview pipeline failures.
///
/// [`PreviewError::NoEntryPoint`] is the configuration class: it blocks
/// rendering until a new file set arrives. Every other variant is an
/// unexpected failure that the [`RenderController`](crate::RenderController)
/// catches once and surfaces as the same blocking error text.
///
/// # Example
///
/// ```ignore
/// match resolve_entry(&files) {
///     Ok(entry) => println!("rendering {}", entry.path),
///     Err(PreviewError::NoEntryPoint) => eprintln!("nothing to render"),
///     Err(e) => eprintln!("{e}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum PreviewError {
    /// No file in the set can serve as the entry document.
    #[error("No HTML file found in the generated code.")]
    NoEntryPoint,

    /// The resource materializer refused a file's content.
    #[error("failed to materialize '{path}': {message}")]
    Materialize {
        /// Project path of the file being materialized.
        path: String,
        /// Reason reported by the materializer.
        message: String,
    },

    /// The isolation host refused the document.
    #[error("isolation host error: {message}")]
    Host {
        /// Reason reported by the host.
        message: String,
    },

    /// The generation service returned an unusable payload.
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl PreviewError {
    /// Create a materialization error.
    pub fn materialize(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Materialize {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an isolation host error.
    pub fn host(message: impl Into<String>) -> Self {
        Self::Host {
            message: message.into(),
        }
    }

    /// Whether this is the recoverable configuration class (no entry point).
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::NoEntryPoint)
    }

    /// Text shown in the blocking error state.
    pub fn visible_message(&self) -> String {
        match self {
            Self::NoEntryPoint => self.to_string(),
            other => format!("Preview error: {other}"),
        }
    }
}
