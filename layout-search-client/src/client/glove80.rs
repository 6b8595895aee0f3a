use super::LayoutProvider;
use crate::error::{Error, Result};
use crate::layout::LayoutRecord;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use surf::Client;
use utils::surf_logging::SurfLogging;
use utils::url::Url;
use utils::UrlBuilder;

pub const DEFAULT_BASE_URL: &str = "https://my.glove80.com/api/layouts/v1/";

/// The public Glove80 layout library.
#[derive(Clone)]
pub struct Glove80 {
    http: Client,
    base_url: Url,
}

impl Glove80 {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            http: Client::new().with(SurfLogging),
            base_url: Url::parse(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn search_url(&self, tags: &[String]) -> Result<Url> {
        let mut builder = UrlBuilder::new(self.base_url.clone());
        if !tags.is_empty() {
            builder = builder.param("tags", tags.join(","));
        }
        Ok(builder.build()?)
    }

    pub(crate) fn layout_url(&self, id: &str) -> Result<Url> {
        Ok(UrlBuilder::new(self.base_url.clone())
            .segment(id)
            .segment("meta")
            .build()?)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let url = url.to_string();
        let http_err = |err: surf::Error| Error::Http {
            url: url.clone(),
            message: err.to_string(),
        };

        let mut response = self.http.get(&url).await.map_err(http_err)?;
        if !response.status().is_success() {
            return Err(Error::Status {
                url: url.clone(),
                status: response.status().into(),
            });
        }
        let body = response.body_string().await.map_err(http_err)?;

        serde_json::from_str(&body).map_err(|source| Error::Parse { url, source })
    }
}

#[async_trait]
impl LayoutProvider for Glove80 {
    async fn search(&self, tags: &[String]) -> Result<Vec<String>> {
        let url = self.search_url(tags)?;
        log::info!("Requesting layout unique IDs: {}", url);
        self.get_json(url).await
    }

    async fn fetch_layout(&self, id: &str) -> Result<LayoutRecord> {
        let url = self.layout_url(id)?;
        log::info!("Requesting layout: {}", url);
        self.get_json(url).await
    }
}
