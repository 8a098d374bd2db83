//! Pipeline state machine.

use std::fmt;

/// Stage of the render pipeline.
///
/// ```text
/// IDLE ─► RESOLVING ─► REWRITING ─► INSTRUMENTING ─► RENDERING ─► READY
///              │            │              │              │
///              └────────────┴──────┬───────┴──────────────┘
///                                  ▼
///                                ERROR
/// ```
///
/// `READY` and `ERROR` return to `IDLE` only when a new file set arrives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PipelineState {
    /// Nothing rendered for the current file set yet.
    #[default]
    Idle,
    /// Selecting the entry document.
    Resolving,
    /// Substituting project references.
    Rewriting,
    /// Injecting the fault-capture preamble.
    Instrumenting,
    /// Handing the document to the isolation host.
    Rendering,
    /// The document is running in the frame.
    Ready,
    /// The pipeline failed; a blocking error is shown.
    Error,
}

impl PipelineState {
    /// Whether the pipeline may move from `self` to `to`.
    pub fn can_transition(self, to: PipelineState) -> bool {
        use PipelineState::*;
        matches!(
            (self, to),
            (Idle | Ready | Error, Idle)
                | (Idle, Resolving)
                | (Resolving, Rewriting)
                | (Rewriting, Instrumenting)
                | (Instrumenting, Rendering)
                | (Rendering, Ready)
                | (Resolving | Rewriting | Instrumenting | Rendering, Error)
        )
    }

    /// Whether the state only changes on new input.
    #[inline]
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Idle | Self::Ready | Self::Error)
    }

    /// Upper-case name, as used in logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Resolving => "RESOLVING",
            Self::Rewriting => "REWRITING",
            Self::Instrumenting => "INSTRUMENTING",
            Self::Rendering => "RENDERING",
            Self::Ready => "READY",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::PipelineState::*;

    #[test]
    fn test_happy_path() {
        let path = [Idle, Resolving, Rewriting, Instrumenting, Rendering, Ready, Idle];
        for pair in path.windows(2) {
            assert!(pair[0].can_transition(pair[1]), "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_error_is_terminal_until_new_input() {
        assert!(Resolving.can_transition(Error));
        assert!(!Error.can_transition(Resolving));
        assert!(!Error.can_transition(Ready));
        assert!(Error.can_transition(Idle));
        assert!(!Ready.can_transition(Error));
        assert!(!Idle.can_transition(Ready));
    }

    #[test]
    fn test_settled() {
        assert!(Ready.is_settled());
        assert!(Error.is_settled());
        assert!(!Rendering.is_settled());
    }
}
