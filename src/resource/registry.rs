//! Per-generation ownership of materialized locators.

use tracing::debug;

use super::{Locator, ResourceMaterializer};

/// Locators owned by the current render generation.
///
/// Every locator minted while rendering generation N is recorded here. When
/// generation N+1 begins, all of them are handed back to the materializer,
/// so at most one generation's worth of resources is alive at a time.
#[derive(Debug, Default)]
pub struct GenerationResources {
    generation: u64,
    held: Vec<Locator>,
}

impl GenerationResources {
    /// Create an empty registry at generation 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generation the held locators belong to.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of locators held for the current generation.
    #[inline]
    pub fn len(&self) -> usize {
        self.held.len()
    }

    /// Check if no locators are held.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    /// Record a locator minted during the current generation.
    pub fn track(&mut self, locator: Locator) {
        self.held.push(locator);
    }

    /// Start `generation`, releasing everything held for the previous one.
    ///
    /// Returns the number of locators released.
    pub fn begin<M: ResourceMaterializer + ?Sized>(&mut self, generation: u64, materializer: &M) -> usize {
        let released = self.release_all(materializer);
        self.generation = generation;
        released
    }

    /// Release every held locator without advancing the generation.
    pub fn release_all<M: ResourceMaterializer + ?Sized>(&mut self, materializer: &M) -> usize {
        let count = self.held.len();
        for locator in self.held.drain(..) {
            materializer.release(&locator);
        }
        if count > 0 {
            debug!(generation = self.generation, count, "released render resources");
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::ContentType;
    use crate::resource::BlobStore;

    #[test]
    fn test_begin_releases_previous_generation() {
        let store = BlobStore::new();
        let mut resources = GenerationResources::new();

        resources.begin(1, &store);
        let first = store.materialize("a", ContentType::Script).unwrap();
        resources.track(first.clone());
        assert_eq!(store.live_count(), 1);

        let released = resources.begin(2, &store);
        assert_eq!(released, 1);
        assert_eq!(resources.generation(), 2);
        assert!(resources.is_empty());
        assert!(store.get(&first).is_none());
    }

    #[test]
    fn test_release_all_keeps_generation() {
        let store = BlobStore::new();
        let mut resources = GenerationResources::new();
        resources.begin(7, &store);
        resources.track(store.materialize("a", ContentType::Data).unwrap());
        resources.track(store.materialize("b", ContentType::Data).unwrap());

        assert_eq!(resources.release_all(&store), 2);
        assert_eq!(resources.generation(), 7);
        assert_eq!(store.live_count(), 0);
    }
}
