//! Wire shapes exchanged with the code-generation service.
//!
//! The HTTP client lives outside this crate. These types only describe the
//! payloads so a client can hand a validated [`VirtualFileSet`] to the
//! preview.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{FileData, VirtualFileSet};

/// Request body sent to the generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Natural-language instruction.
    pub instruction: String,
    /// Current project files, if the service should edit rather than create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<FileData>>,
}

impl GenerationRequest {
    /// Create a request without existing files.
    pub fn new(instruction: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            files: None,
        }
    }

    /// Attach the current file set.
    pub fn with_files(mut self, files: &VirtualFileSet) -> Self {
        self.files = Some(files.as_slice().to_vec());
        self
    }
}

/// Response body returned by the generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Generated files.
    pub files: Vec<FileData>,
    /// Service-reported failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Error when a generation payload cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The payload is not shaped like a [`GenerationResponse`].
    #[error("Invalid API response format: {0}")]
    InvalidFormat(String),

    /// The service answered with an explicit error.
    #[error("{0}")]
    Service(String),
}

/// Parse and validate a generation-service response body.
///
/// # Errors
///
/// - [`GenerationError::InvalidFormat`] if the body is not JSON, or `files`
///   is missing or not an array of `{path, content}` pairs.
/// - [`GenerationError::Service`] if the body carries an `error` message.
pub fn parse_generation_response(body: &str) -> Result<VirtualFileSet, GenerationError> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| GenerationError::InvalidFormat(e.to_string()))?;

    if let Some(message) = value.get("error").and_then(|e| e.as_str())
        && !message.is_empty()
    {
        return Err(GenerationError::Service(message.to_string()));
    }

    if !value.get("files").is_some_and(|f| f.is_array()) {
        return Err(GenerationError::InvalidFormat(
            "missing or invalid files array".into(),
        ));
    }

    let response: GenerationResponse = serde_json::from_value(value)
        .map_err(|e| GenerationError::InvalidFormat(e.to_string()))?;
    Ok(response.files.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_response() {
        let body = r#"{"files":[{"path":"index.html","content":"<p>hi</p>"}]}"#;
        let files = parse_generation_response(body).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files.get("index.html").unwrap().content, "<p>hi</p>");
    }

    #[test]
    fn test_missing_files_array() {
        let err = parse_generation_response(r#"{"files":"nope"}"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid API response format: missing or invalid files array"
        );
        assert!(parse_generation_response("{}").is_err());
    }

    #[test]
    fn test_service_error() {
        let err = parse_generation_response(r#"{"files":[],"error":"quota exceeded"}"#).unwrap_err();
        assert_eq!(err, GenerationError::Service("quota exceeded".into()));
    }

    #[test]
    fn test_request_omits_absent_files() {
        let json = serde_json::to_string(&GenerationRequest::new("make a clock")).unwrap();
        assert_eq!(json, r#"{"instruction":"make a clock"}"#);
    }
}
