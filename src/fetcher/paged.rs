use std::sync::Arc;

use async_stream::try_stream;
use futures::Stream;
use url::Url;

use crate::app::{Result, YtsError};
use crate::domain::{Page, PageResult};
use crate::fetcher::{Fetcher, RetryPolicy};

/// A paginated remote resource: how to address page `n` and how to decode it.
pub trait PagedResource: Send + Sync {
    type Item: Send + 'static;

    fn page_url(&self, page: u32) -> Result<Url>;

    /// Decode one page body. An empty vector means there are no more pages.
    fn decode(&self, url: &Url, body: &[u8]) -> Result<Vec<Self::Item>>;
}

/// Fetches single pages under a time-budget retry policy.
pub struct PagedFetcher {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    policy: RetryPolicy,
}

impl PagedFetcher {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>, policy: RetryPolicy) -> Self {
        Self { fetcher, policy }
    }

    pub async fn fetch<R>(&self, resource: &R, page: u32) -> Result<PageResult<R::Item>>
    where
        R: PagedResource + ?Sized,
    {
        if page == 0 {
            return Err(YtsError::Other("page numbers start at 1".into()));
        }

        let url = resource.page_url(page)?;
        let fetcher = &self.fetcher;
        let target = &url;
        let body = self
            .policy
            .run(url.as_str(), move || fetcher.fetch(target))
            .await?;

        let items = resource.decode(&url, &body)?;
        tracing::debug!("Page {} of {} has {} items", page, url, items.len());
        Ok(PageResult::from_items(page, items))
    }
}

/// Lazily walk a resource from page 1 until the first exhausted page.
///
/// Nothing is requested until the stream is polled, and page `n + 1` is only
/// requested after page `n` has been handed to the consumer. The first error
/// is yielded and ends the stream. Each call starts a fresh walk.
pub fn pages<R>(
    fetcher: Arc<PagedFetcher>,
    resource: R,
) -> impl Stream<Item = Result<Page<R::Item>>> + Send + 'static
where
    R: PagedResource + 'static,
{
    try_stream! {
        let mut number: u32 = 1;
        loop {
            match fetcher.fetch(&resource, number).await? {
                PageResult::Page(page) => {
                    yield page;
                    number += 1;
                }
                PageResult::Exhausted => {
                    tracing::debug!("No more pages after page {}", number - 1);
                    break;
                }
            }
        }
    }
}
