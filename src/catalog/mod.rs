//! The torrent catalog: JSON search and listing, and the language browse
//! pipeline that scrapes titles and resolves them through search.

pub mod browse;
pub mod resources;
pub mod tables;

pub use browse::{strip_language_tag, TitleExtractor};
pub use resources::{BrowseResource, ListingResource, SearchResource};
pub use tables::{ListingFilter, GENRES, LANGUAGES};

use std::sync::Arc;

use async_stream::try_stream;
use async_trait::async_trait;
use futures::{pin_mut, Stream, StreamExt};
use url::Url;

use crate::app::Result;
use crate::config::CatalogConfig;
use crate::domain::{MovieRecord, Page};
use crate::fetcher::{
    endpoint, pages, Fetcher, PagedFetcher, ParallelResolver, RetryPolicy, TitleLookup,
};

pub struct YtsCatalog {
    paged: Arc<PagedFetcher>,
    site: Url,
    api: Url,
    extractor: TitleExtractor,
    exact_match_max_pages: usize,
}

impl YtsCatalog {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>, config: &CatalogConfig) -> Result<Self> {
        let site = Url::parse(&config.base_url)?;
        let api = endpoint(&site, &["api", "v2", "list_movies.json"])?;
        let policy = RetryPolicy::catalog().with_budget(config.budget());

        Ok(Self {
            paged: Arc::new(PagedFetcher::new(fetcher, policy)),
            site,
            api,
            extractor: TitleExtractor::new()?,
            exact_match_max_pages: config.exact_match_max_pages.max(1),
        })
    }

    /// Pages of records matching free text.
    pub fn search(
        &self,
        query: &str,
    ) -> impl Stream<Item = Result<Page<MovieRecord>>> + Send + 'static {
        tracing::info!("Searching catalog for '{}'", query);
        pages(self.paged.clone(), SearchResource::new(self.api.clone(), query))
    }

    /// Pages of records for a listing filter.
    pub fn list(
        &self,
        filter: ListingFilter,
    ) -> impl Stream<Item = Result<Page<MovieRecord>>> + Send + 'static {
        tracing::info!("Listing catalog with {}", filter);
        pages(self.paged.clone(), ListingResource::new(self.api.clone(), filter))
    }

    /// Scan search results for a record whose title equals `title` exactly.
    ///
    /// Stops at the first match, at the first empty page, or after the
    /// configured page cap, whichever comes first.
    pub async fn find_exact(&self, title: &str) -> Result<Option<MovieRecord>> {
        let results = pages(self.paged.clone(), SearchResource::new(self.api.clone(), title))
            .take(self.exact_match_max_pages);
        pin_mut!(results);

        while let Some(page) = results.next().await {
            let page = page?;
            if let Some(movie) = page.into_iter().find(|m| m.matches_title(title)) {
                return Ok(Some(movie));
            }
        }
        Ok(None)
    }

    /// Movies in one language, yielded one record per batch as they resolve.
    ///
    /// Browse pages are walked in order; each page's titles are resolved
    /// concurrently and the next page is only requested once the current one
    /// has drained. A page without titles ends the stream. Titles that fail
    /// to resolve are logged and skipped; browse-page errors end the stream.
    pub fn by_language(
        self: &Arc<Self>,
        language: &str,
    ) -> impl Stream<Item = Result<Page<MovieRecord>>> + Send + 'static {
        let browse = BrowseResource::new(self.site.clone(), language, self.extractor.clone());
        let titles = pages(self.paged.clone(), browse);
        let resolver = ParallelResolver::new(self.clone());
        let language = language.to_string();

        try_stream! {
            pin_mut!(titles);
            while let Some(page) = titles.next().await {
                let page = page?;
                let number = page.number();
                tracing::info!(
                    "Resolving {} titles from '{}' browse page {}",
                    page.len(),
                    language,
                    number
                );

                let resolved = resolver.resolve_all(page.into_items());
                pin_mut!(resolved);

                let mut found = 0usize;
                let mut failed = 0usize;
                while let Some(resolution) = resolved.next().await {
                    match resolution {
                        Ok(movie) => {
                            found += 1;
                            yield Page::single(number, movie);
                        }
                        Err(failure) => {
                            failed += 1;
                            tracing::warn!("Error processing movie {}", failure);
                        }
                    }
                }

                tracing::info!(
                    "Browse page {} resolved: {} found, {} skipped",
                    number,
                    found,
                    failed
                );
            }
        }
    }
}

#[async_trait]
impl TitleLookup for YtsCatalog {
    async fn lookup(&self, title: &str) -> Result<Option<MovieRecord>> {
        self.find_exact(title).await
    }
}
