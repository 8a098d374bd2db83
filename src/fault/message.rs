//! Fault message protocol.

use serde::{Deserialize, Serialize};

use crate::host::ContextId;

/// Envelope kind carried by fault reports.
pub const RUNTIME_ERROR: &str = "runtime-error";

/// `{ "type": "runtime-error", "error": string, "generation"?: u64 }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultEnvelope {
    /// Message kind; only [`RUNTIME_ERROR`] is a fault.
    #[serde(rename = "type")]
    pub kind: String,
    /// Formatted fault description.
    pub error: String,
    /// Render generation, present when the preamble was generation-tagged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<u64>,
}

impl FaultEnvelope {
    /// Create a runtime-error envelope.
    pub fn runtime_error(error: impl Into<String>) -> Self {
        Self {
            kind: RUNTIME_ERROR.to_string(),
            error: error.into(),
            generation: None,
        }
    }

    /// Tag the envelope with a render generation.
    pub fn with_generation(mut self, generation: u64) -> Self {
        self.generation = Some(generation);
        self
    }

    /// Whether this envelope reports a runtime fault.
    #[inline]
    pub fn is_fault(&self) -> bool {
        self.kind == RUNTIME_ERROR
    }

    /// Read message data, returning `None` unless it is an object with a
    /// string `type`.
    ///
    /// The remaining fields are read leniently: a missing or `null` `error`
    /// becomes empty, any other non-string `error` keeps its JSON text, and
    /// a `generation` that is not an unsigned integer is ignored.
    pub fn from_value(data: &serde_json::Value) -> Option<Self> {
        let object = data.as_object()?;
        let kind = object.get("type")?.as_str()?.to_string();
        let error = match object.get("error") {
            None | Some(serde_json::Value::Null) => String::new(),
            Some(serde_json::Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
        };
        let generation = object.get("generation").and_then(serde_json::Value::as_u64);
        Some(Self { kind, error, generation })
    }
}

/// A message arriving on the host's inbound channel.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundMessage {
    /// Context that posted the message, if the platform reports one.
    pub source: Option<ContextId>,
    /// Structured-clone payload.
    pub data: serde_json::Value,
}

impl InboundMessage {
    /// Create a message from `source`.
    pub fn new(source: ContextId, data: serde_json::Value) -> Self {
        Self {
            source: Some(source),
            data,
        }
    }

    /// Create a message carrying a fault envelope.
    pub fn fault(source: ContextId, envelope: &FaultEnvelope) -> Self {
        Self::new(
            source,
            serde_json::to_value(envelope).unwrap_or(serde_json::Value::Null),
        )
    }
}

/// Format an uncaught error the way the preamble's `onerror` hook does.
pub fn format_error(message: &str, line: u32, col: u32) -> String {
    format!("Error: {message} (line {line}, col {col})")
}

/// Format an unhandled rejection the way the preamble's hook does.
pub fn format_rejection(reason: &str) -> String {
    format!("Unhandled Promise Rejection: {reason}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_wire_shape() {
        let envelope = FaultEnvelope::runtime_error("boom");
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({ "type": "runtime-error", "error": "boom" })
        );

        let tagged = envelope.with_generation(3);
        assert_eq!(serde_json::to_value(&tagged).unwrap()["generation"], 3);
    }

    #[test]
    fn test_from_value() {
        let parsed = FaultEnvelope::from_value(&json!({ "type": "runtime-error", "error": "x" })).unwrap();
        assert!(parsed.is_fault());
        assert_eq!(parsed.generation, None);

        let other = FaultEnvelope::from_value(&json!({ "type": "resize", "error": "" })).unwrap();
        assert!(!other.is_fault());

        assert!(FaultEnvelope::from_value(&json!("runtime-error")).is_none());
        assert!(FaultEnvelope::from_value(&json!({ "error": "x" })).is_none());
        assert!(FaultEnvelope::from_value(&json!({ "type": 7, "error": "x" })).is_none());
    }

    #[test]
    fn test_from_value_reads_fields_leniently() {
        let bare = FaultEnvelope::from_value(&json!({ "type": "runtime-error" })).unwrap();
        assert!(bare.is_fault());
        assert_eq!(bare.error, "");

        let object = FaultEnvelope::from_value(&json!({ "type": "runtime-error", "error": { "code": 1 } })).unwrap();
        assert_eq!(object.error, r#"{"code":1}"#);

        let number = FaultEnvelope::from_value(&json!({ "type": "runtime-error", "error": 42, "generation": "2" }))
            .unwrap();
        assert_eq!(number.error, "42");
        assert_eq!(number.generation, None);

        let negative = FaultEnvelope::from_value(&json!({ "type": "runtime-error", "error": "x", "generation": -1 }))
            .unwrap();
        assert_eq!(negative.generation, None);
    }

    #[test]
    fn test_formatters() {
        assert_eq!(
            format_error("x is not defined", 12, 5),
            "Error: x is not defined (line 12, col 5)"
        );
        assert_eq!(format_rejection("nope"), "Unhandled Promise Rejection: nope");
    }
}
