pub mod http_fetcher;
pub mod paged;
pub mod parallel;
pub mod retry;

use async_trait::async_trait;
use url::Url;

use crate::app::{Result, YtsError};

pub use http_fetcher::HttpFetcher;
pub use paged::{pages, PagedFetcher, PagedResource};
pub use parallel::{ParallelResolver, TitleLookup, DEFAULT_WORKERS};
pub use retry::RetryPolicy;

/// A single GET attempt.
///
/// Implementations return the response body, or an error for network
/// failures and non-2xx statuses. Retrying is the caller's concern.
#[async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>>;
}

/// Append path segments to a base URL, tolerating a trailing slash on the base.
pub fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.set_query(None);
    url.path_segments_mut()
        .map_err(|_| YtsError::Config(format!("{} cannot be used as a base URL", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
