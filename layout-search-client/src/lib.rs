pub mod client;
pub mod deduplication;
mod error;
pub mod layout;
pub mod selection;
pub mod store;


pub use client::glove80::{Glove80, DEFAULT_BASE_URL};
pub use client::LayoutProvider;
pub use deduplication::{DeduplicationConfig, DeduplicationStats, LayoutDeduplicator};
pub use error::{Error, Result};
pub use layout::{LayoutMeta, LayoutRecord, SemanticKey};
pub use store::{LayoutStore, StoreStats, CACHE_FILE_NAME};

/// What to do when a single layout cannot be fetched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop at the first failure and return its error.
    #[default]
    Abort,
    /// Log the failure and move on to the next id.
    Skip,
}

/// Looks layouts up in a [`LayoutStore`] first and falls back to the
/// provider, writing every fetched layout through to the store.
#[derive(Clone)]
pub struct LayoutClient<P = Glove80> {
    provider: P,
}

impl LayoutClient<Glove80> {
    /// Client for the public Glove80 layout library
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Ok(Self::with_provider(Glove80::new(base_url)?))
    }
}

impl<P: LayoutProvider> LayoutClient<P> {
    pub fn with_provider(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Ids of published layouts carrying any of `tags` (all layouts when
    /// `tags` is empty).
    pub async fn search(&self, tags: &[String]) -> Result<Vec<String>> {
        let ids = self.provider.search(tags).await?;
        log::debug!("Search returned {} layout ids", ids.len());
        Ok(ids)
    }

    /// Return the layout for `id`, from the store if it has been seen before.
    /// Cached layouts are trusted as-is; there is no revalidation.
    pub async fn resolve(&self, store: &mut LayoutStore, id: &str) -> Result<LayoutRecord> {
        if let Some(cached) = store.get(id) {
            log::debug!("Cache hit for layout: {}", id);
            return Ok(cached.clone());
        }

        log::debug!("Cache miss for layout: {}", id);
        let record = self.provider.fetch_layout(id).await?;
        store.put(id, record.clone());
        Ok(record)
    }

    /// Resolve `ids` one after the other, in order.
    pub async fn resolve_all(
        &self,
        store: &mut LayoutStore,
        ids: &[String],
        policy: FailurePolicy,
    ) -> Result<Vec<LayoutRecord>> {
        let mut records = Vec::with_capacity(ids.len());
        for id in ids {
            match self.resolve(store, id).await {
                Ok(record) => records.push(record),
                Err(err) if policy == FailurePolicy::Skip => {
                    log::warn!("Skipping layout {}: {}", id, err);
                }
                Err(err) => return Err(err),
            }
        }
        Ok(records)
    }
}
