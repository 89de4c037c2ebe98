use serde::Deserialize;
use url::Url;

use crate::app::{Result, YtsError};
use crate::catalog::browse::TitleExtractor;
use crate::catalog::tables::ListingFilter;
use crate::domain::movie::lenient;
use crate::domain::MovieRecord;
use crate::fetcher::{endpoint, PagedResource};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ListMoviesResponse {
    #[serde(deserialize_with = "lenient")]
    status: String,
    #[serde(deserialize_with = "lenient")]
    status_message: String,
    #[serde(deserialize_with = "lenient")]
    data: ListMoviesData,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ListMoviesData {
    #[serde(deserialize_with = "lenient")]
    movie_count: u64,
    #[serde(deserialize_with = "lenient")]
    movies: Vec<serde_json::Value>,
}

/// Decode a `list_movies.json` envelope into its movie records.
///
/// An absent or empty `movies` array decodes to no records. Entries that are
/// not objects are dropped.
pub fn decode_movies(url: &Url, body: &[u8]) -> Result<Vec<MovieRecord>> {
    let response: ListMoviesResponse =
        serde_json::from_slice(body).map_err(|e| YtsError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })?;

    if !response.status.is_empty() && response.status != "ok" {
        tracing::warn!(
            "Catalog answered '{}' for {}: {}",
            response.status,
            url,
            response.status_message
        );
    }

    let total = response.data.movie_count;
    let movies: Vec<MovieRecord> = response
        .data
        .movies
        .into_iter()
        .filter(serde_json::Value::is_object)
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(movie) => Some(movie),
            Err(e) => {
                tracing::debug!("Dropping undecodable movie entry from {}: {}", url, e);
                None
            }
        })
        .collect();

    tracing::debug!("{} movies on page ({} in total) from {}", movies.len(), total, url);
    Ok(movies)
}

/// `list_movies.json?query_term=<text>&page=<n>`
#[derive(Debug, Clone)]
pub struct SearchResource {
    api: Url,
    query: String,
}

impl SearchResource {
    pub fn new(api: Url, query: impl Into<String>) -> Self {
        Self {
            api,
            query: query.into(),
        }
    }
}

impl PagedResource for SearchResource {
    type Item = MovieRecord;

    fn page_url(&self, page: u32) -> Result<Url> {
        let mut url = self.api.clone();
        url.query_pairs_mut()
            .append_pair("query_term", &self.query)
            .append_pair("page", &page.to_string());
        Ok(url)
    }

    fn decode(&self, url: &Url, body: &[u8]) -> Result<Vec<MovieRecord>> {
        decode_movies(url, body)
    }
}

/// `list_movies.json?<filter>&page=<n>`
#[derive(Debug, Clone)]
pub struct ListingResource {
    api: Url,
    filter: ListingFilter,
}

impl ListingResource {
    pub fn new(api: Url, filter: ListingFilter) -> Self {
        Self { api, filter }
    }
}

impl PagedResource for ListingResource {
    type Item = MovieRecord;

    fn page_url(&self, page: u32) -> Result<Url> {
        let (key, value) = self.filter.query_pair();
        let mut url = self.api.clone();
        url.query_pairs_mut()
            .append_pair(key, value)
            .append_pair("page", &page.to_string());
        Ok(url)
    }

    fn decode(&self, url: &Url, body: &[u8]) -> Result<Vec<MovieRecord>> {
        decode_movies(url, body)
    }
}

/// HTML browse listing filtered by language; pages decode to titles.
#[derive(Debug, Clone)]
pub struct BrowseResource {
    site: Url,
    language: String,
    extractor: TitleExtractor,
}

impl BrowseResource {
    pub fn new(site: Url, language: impl Into<String>, extractor: TitleExtractor) -> Self {
        Self {
            site,
            language: language.into(),
            extractor,
        }
    }
}

impl PagedResource for BrowseResource {
    type Item = String;

    fn page_url(&self, page: u32) -> Result<Url> {
        let mut url = endpoint(
            &self.site,
            &[
                "browse-movies",
                "0",
                "all",
                "all",
                "0",
                "latest",
                "0",
                &self.language,
            ],
        )?;
        if page > 1 {
            url.query_pairs_mut().append_pair("page", &page.to_string());
        }
        Ok(url)
    }

    fn decode(&self, _url: &Url, body: &[u8]) -> Result<Vec<String>> {
        let html = String::from_utf8_lossy(body);
        Ok(self.extractor.extract(&html, &self.language))
    }
}
