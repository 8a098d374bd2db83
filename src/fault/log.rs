//! Append-only runtime fault log.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use super::format::FaultSummary;

/// One fault report, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaultEntry {
    /// Formatted fault description.
    pub message: String,
    /// Generation tag from the envelope, if any.
    pub generation: Option<u64>,
    /// When the host received the report. Informational only; ordering is
    /// always arrival order.
    pub received_at: DateTime<Utc>,
}

impl FaultEntry {
    /// Create an entry received now.
    pub fn new(message: impl Into<String>, generation: Option<u64>) -> Self {
        Self {
            message: message.into(),
            generation,
            received_at: Utc::now(),
        }
    }
}

/// Faults reported by the current render generation.
///
/// Shared between the [`RenderController`](crate::RenderController), which
/// clears it when a render attempt starts, and the
/// [`FaultBridge`](super::FaultBridge), which appends to it whenever a
/// message arrives.
#[derive(Debug, Default)]
pub struct RuntimeFaultLog {
    entries: Mutex<Vec<FaultEntry>>,
}

impl RuntimeFaultLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Returns the new length.
    pub fn push(&self, entry: FaultEntry) -> usize {
        let mut entries = self.entries.lock();
        entries.push(entry);
        entries.len()
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Copy of all entries.
    pub fn snapshot(&self) -> Vec<FaultEntry> {
        self.entries.lock().clone()
    }

    /// Fault descriptions in arrival order.
    pub fn messages(&self) -> Vec<String> {
        self.entries.lock().iter().map(|e| e.message.clone()).collect()
    }

    /// Number of faults.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Count summary for display.
    pub fn summary(&self) -> FaultSummary {
        FaultSummary { count: self.len() }
    }
}
