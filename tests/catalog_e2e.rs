//! End-to-end tests for catalog search, listings and the language browse
//! pipeline against a mock YTS server.

use futures::StreamExt;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

use yts_cli::app::YtsError;
use yts_cli::catalog::{ListingFilter, YtsCatalog};
use yts_cli::config::{CatalogConfig, DEFAULT_USER_AGENT};
use yts_cli::domain::{MovieRecord, Page};
use yts_cli::fetcher::HttpFetcher;

const API: &str = "/api/v2/list_movies.json";
const FR_BROWSE: &str = "/browse-movies/0/all/all/0/latest/0/fr";

fn catalog(server: &MockServer, budget_secs: u64) -> Arc<YtsCatalog> {
    let config = CatalogConfig {
        base_url: server.uri(),
        budget_secs,
        ..Default::default()
    };
    let fetcher = Arc::new(HttpFetcher::new(DEFAULT_USER_AGENT).unwrap());
    Arc::new(YtsCatalog::new(fetcher, &config).unwrap())
}

fn movies_body(movies: &[(u64, &str)]) -> serde_json::Value {
    let movies: Vec<_> = movies
        .iter()
        .map(|(id, title)| {
            json!({
                "id": id,
                "imdb_code": format!("tt{:07}", id),
                "title": title,
                "title_english": title,
                "title_long": format!("{} (2021)", title),
                "slug": format!("{}-2021", title.to_lowercase().replace(' ', "-")),
                "torrents": [{
                    "url": format!("https://yts.test/t/{}", id),
                    "quality": "720p",
                    "type": "web",
                    "size": "800 MB"
                }]
            })
        })
        .collect();
    json!({
        "status": "ok",
        "status_message": "Query was successful",
        "data": {"movie_count": movies.len(), "movies": movies}
    })
}

fn browse_html(titles: &[&str]) -> String {
    let cards: String = titles
        .iter()
        .map(|t| {
            format!(
                r#"<div class="browse-movie-wrap"><div class="browse-movie-bottom"><a href="/movies/x" class="browse-movie-title">{}</a><div class="browse-movie-year">2021</div></div></div>"#,
                t
            )
        })
        .collect();
    format!("<!DOCTYPE html><html><body><section>{}</section></body></html>", cards)
}

async fn mount_search(server: &MockServer, term: &str, page: &str, movies: &[(u64, &str)]) {
    Mock::given(method("GET"))
        .and(path(API))
        .and(query_param("query_term", term))
        .and(query_param("page", page))
        .respond_with(ResponseTemplate::new(200).set_body_json(movies_body(movies)))
        .mount(server)
        .await;
}

type PageResult = yts_cli::app::Result<Page<MovieRecord>>;

async fn collect(stream: impl futures::Stream<Item = PageResult>) -> Vec<PageResult> {
    stream.collect().await
}

#[tokio::test]
async fn test_search_walks_pages_until_empty() {
    let server = MockServer::start().await;
    mount_search(&server, "heat", "1", &[(1, "Heat"), (2, "Heat Wave")]).await;
    mount_search(&server, "heat", "2", &[(3, "White Heat")]).await;
    mount_search(&server, "heat", "3", &[]).await;

    let catalog = catalog(&server, 3);
    let pages = collect(catalog.search("heat")).await;

    assert_eq!(pages.len(), 2);
    let pages: Vec<Page<MovieRecord>> = pages.into_iter().map(Result::unwrap).collect();
    assert_eq!(pages[0].number(), 1);
    assert_eq!(pages[0].len(), 2);
    assert_eq!(pages[1].items()[0].title, "White Heat");
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_search_is_lazy() {
    let server = MockServer::start().await;
    mount_search(&server, "heat", "1", &[(1, "Heat")]).await;
    mount_search(&server, "heat", "2", &[(2, "Heat 2")]).await;

    let catalog = catalog(&server, 3);
    let first: Vec<_> = catalog.search("heat").take(1).collect().await;

    assert_eq!(first.len(), 1);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_listing_filters_reach_the_api() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(API))
        .and(query_param("genre", "Sci-Fi"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(movies_body(&[(7, "Solaris")])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(API))
        .and(query_param("genre", "Sci-Fi"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(movies_body(&[])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(API))
        .and(query_param("limit", "50"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "ok", "data": {"movie_count": 0}})),
        )
        .mount(&server)
        .await;

    let catalog = catalog(&server, 3);

    let genre = collect(catalog.list(ListingFilter::Genre("Sci-Fi".into()))).await;
    assert_eq!(genre.len(), 1);
    assert_eq!(genre[0].as_ref().unwrap().items()[0].title, "Solaris");

    // An envelope without a movie list is an empty page.
    let latest = collect(catalog.list(ListingFilter::Latest)).await;
    assert!(latest.is_empty());
}

#[tokio::test]
async fn test_malformed_json_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(API))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let catalog = catalog(&server, 3);
    let pages = collect(catalog.search("heat")).await;

    assert_eq!(pages.len(), 1);
    assert!(matches!(pages[0], Err(YtsError::Decode { .. })));
}

#[tokio::test]
async fn test_browse_resolves_titles_and_survives_transient_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FR_BROWSE))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(browse_html(&[])))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(FR_BROWSE))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(browse_html(&["Le Film [FR]", "Autre Film"])),
        )
        .mount(&server)
        .await;

    // The first lookup for "Le Film" hits a server error and is retried.
    Mock::given(method("GET"))
        .and(path(API))
        .and(query_param("query_term", "Le Film"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    mount_search(&server, "Le Film", "1", &[(1, "Le Film")]).await;
    mount_search(&server, "Autre Film", "1", &[(9, "Autre Film 2"), (2, "Autre Film")]).await;

    let catalog = catalog(&server, 3);
    let batches = collect(catalog.by_language("fr")).await;

    assert_eq!(batches.len(), 2);
    let mut titles: Vec<String> = batches
        .into_iter()
        .map(|b| {
            let page = b.unwrap();
            assert_eq!(page.number(), 1);
            assert_eq!(page.len(), 1);
            page.into_items().remove(0).title
        })
        .collect();
    titles.sort();
    assert_eq!(titles, vec!["Autre Film", "Le Film"]);
}

#[tokio::test]
async fn test_browse_with_no_titles_ends_immediately() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/browse-movies/0/all/all/0/latest/0/xx"))
        .respond_with(ResponseTemplate::new(200).set_body_string(browse_html(&[])))
        .mount(&server)
        .await;

    let catalog = catalog(&server, 3);
    let batches = collect(catalog.by_language("xx")).await;

    assert!(batches.is_empty());
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_unreachable_catalog_gives_up_within_budget() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let catalog = catalog(&server, 1);
    let started = std::time::Instant::now();
    let batches = collect(catalog.by_language("fr")).await;

    assert_eq!(batches.len(), 1);
    let err = tokio_test::assert_err!(batches.into_iter().next().unwrap());
    assert!(matches!(err, YtsError::FetchTimeout { .. }));
    assert!(started.elapsed() < Duration::from_secs(3));
    assert!(server.received_requests().await.unwrap().len() > 1);
}
