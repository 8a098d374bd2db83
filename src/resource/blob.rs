//! In-memory object store with `blob:` locators.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::{Locator, MaterializeError, ResourceMaterializer};
use crate::file::ContentType;

/// Locator prefix minted by [`BlobStore`].
pub const BLOB_SCHEME: &str = "blob:live-preview/";

/// A materialized resource: content plus its type tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    /// Content type the resource was materialized with.
    pub content_type: ContentType,
    /// Resource text.
    pub content: Arc<str>,
}

/// In-memory materializer, the headless counterpart of object URLs.
///
/// Every call to [`materialize`](ResourceMaterializer::materialize) mints a
/// fresh, single-use locator even for identical content. Locators stay
/// dereferenceable via [`get`](Self::get) until released.
///
/// # Example
///
/// ```ignore
/// let store = BlobStore::new();
/// let locator = store.materialize("body {}", ContentType::Stylesheet)?;
///
/// assert_eq!(store.get(&locator).unwrap().content.as_ref(), "body {}");
/// store.release(&locator);
/// assert!(store.get(&locator).is_none());
/// ```
#[derive(Debug, Default)]
pub struct BlobStore {
    blobs: RwLock<FxHashMap<String, Blob>>,
}

impl BlobStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Dereference a locator.
    pub fn get(&self, locator: &Locator) -> Option<Blob> {
        self.blobs.read().get(locator.as_str()).cloned()
    }

    /// Number of locators not yet released.
    pub fn live_count(&self) -> usize {
        self.blobs.read().len()
    }
}

impl ResourceMaterializer for BlobStore {
    fn materialize(&self, content: &str, content_type: ContentType) -> Result<Locator, MaterializeError> {
        let key = format!("{BLOB_SCHEME}{}", uuid::Uuid::new_v4());
        let blob = Blob {
            content_type,
            content: Arc::from(content),
        };
        self.blobs.write().insert(key.clone(), blob);
        Ok(Locator::new(key))
    }

    fn release(&self, locator: &Locator) {
        self.blobs.write().remove(locator.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_materialize_and_get() {
        let store = BlobStore::new();
        let locator = store.materialize("console.log(1)", ContentType::Script).unwrap();

        assert!(locator.as_str().starts_with(BLOB_SCHEME));
        let blob = store.get(&locator).unwrap();
        assert_eq!(blob.content.as_ref(), "console.log(1)");
        assert_eq!(blob.content_type, ContentType::Script);
    }

    #[test]
    fn test_locators_are_single_use() {
        let store = BlobStore::new();
        let a = store.materialize("same", ContentType::PlainText).unwrap();
        let b = store.materialize("same", ContentType::PlainText).unwrap();
        assert_ne!(a, b);
        assert_eq!(store.live_count(), 2);
    }

    #[test]
    fn test_release() {
        let store = BlobStore::new();
        let locator = store.materialize("x", ContentType::Data).unwrap();
        store.release(&locator);
        store.release(&locator);
        assert!(store.get(&locator).is_none());
        assert_eq!(store.live_count(), 0);
    }
}
