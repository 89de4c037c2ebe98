//! Movie details scraped from the metadata site for the detail view.

pub mod imdb;

pub use imdb::TitlePageParser;

use std::sync::Arc;

use url::Url;

use crate::app::{Result, YtsError};
use crate::config::MetadataConfig;
use crate::domain::EnrichedMetadata;
use crate::fetcher::{endpoint, Fetcher, RetryPolicy};

pub struct ImdbScraper {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    base: Url,
    policy: RetryPolicy,
    parser: TitlePageParser,
}

impl ImdbScraper {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>, config: &MetadataConfig) -> Result<Self> {
        Ok(Self {
            fetcher,
            base: Url::parse(&config.base_url)?,
            policy: RetryPolicy::transfer().with_budget(config.budget()),
            parser: TitlePageParser::new(config.cast_limit)?,
        })
    }

    /// `https://www.imdb.com/title/<id>/`
    pub fn title_url(&self, imdb_id: &str) -> Result<Url> {
        endpoint(&self.base, &["title", imdb_id, ""])
    }

    /// Fetch and parse the title page for `imdb_id`.
    ///
    /// Missing fields on the page become placeholders; only transport
    /// failures and a blank id are errors.
    pub async fn get_movie(&self, imdb_id: &str) -> Result<EnrichedMetadata> {
        let imdb_id = imdb_id.trim();
        if imdb_id.is_empty() {
            return Err(YtsError::NotFound("movie has no IMDb code".into()));
        }

        let url = self.title_url(imdb_id)?;
        tracing::info!("Fetching metadata for {} from {}", imdb_id, url);

        let fetcher = &self.fetcher;
        let target = &url;
        let body = self
            .policy
            .run(url.as_str(), move || fetcher.fetch(target))
            .await?;

        let html = String::from_utf8_lossy(&body);
        Ok(self.parser.parse(&html))
    }
}
