pub mod glove80;

use crate::error::Result;
use crate::layout::LayoutRecord;
use async_trait::async_trait;

/// A remote service that publishes shared layouts.
#[async_trait]
pub trait LayoutProvider: Send + Sync {
    /// Ids of the published layouts, optionally restricted to those carrying
    /// any of `tags`. Order is the service's.
    async fn search(&self, tags: &[String]) -> Result<Vec<String>>;

    /// Metadata document of a single layout.
    async fn fetch_layout(&self, id: &str) -> Result<LayoutRecord>;
}
