//! Self-contained `data:` locators.

use base64::Engine;

use super::{Locator, MaterializeError, ResourceMaterializer};
use crate::file::ContentType;

/// Materializer that inlines content as base64 `data:` URLs.
///
/// Useful when the rendering surface cannot share an object store with the
/// host. Nothing is retained, so release is a no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataUrlMaterializer;

impl DataUrlMaterializer {
    /// Decode a locator produced by this materializer.
    pub fn decode(locator: &Locator) -> Option<(String, String)> {
        let rest = locator.as_str().strip_prefix("data:")?;
        let (mime, payload) = rest.split_once(";base64,")?;
        let bytes = base64::engine::general_purpose::STANDARD.decode(payload).ok()?;
        let text = String::from_utf8(bytes).ok()?;
        Some((mime.to_string(), text))
    }
}

impl ResourceMaterializer for DataUrlMaterializer {
    fn materialize(&self, content: &str, content_type: ContentType) -> Result<Locator, MaterializeError> {
        let payload = base64::engine::general_purpose::STANDARD.encode(content.as_bytes());
        Ok(Locator::new(format!("data:{};base64,{payload}", content_type.mime())))
    }

    fn release(&self, _locator: &Locator) {}
}
