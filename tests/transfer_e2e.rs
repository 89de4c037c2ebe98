//! End-to-end tests for the detail-view scrape and torrent downloads.

use std::sync::Arc;
use tempfile::TempDir;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

use yts_cli::app::YtsError;
use yts_cli::config::{DownloadConfig, MetadataConfig, DEFAULT_USER_AGENT};
use yts_cli::domain::metadata::{NO_POSTER, NO_RATING};
use yts_cli::domain::{MovieRecord, TorrentVariant};
use yts_cli::download::Downloader;
use yts_cli::fetcher::{Fetcher, HttpFetcher};
use yts_cli::metadata::ImdbScraper;

fn fetcher() -> Arc<dyn Fetcher + Send + Sync> {
    Arc::new(HttpFetcher::new(DEFAULT_USER_AGENT).unwrap())
}

const TITLE_PAGE: &str = r#"
<!DOCTYPE html>
<html><body>
  <h1 data-testid="hero__pageTitle"><span data-testid="hero__primary-text">Le Film</span></h1>
  <span data-testid="plot-l">Two strangers share a train.</span>
  <ul>
    <li><a class="ipc-metadata-list-item__list-content-item--link" href="/name/nm0000001/">Jeanne Réal</a></li>
  </ul>
  <a data-testid="title-cast-item__actor" href="/name/nm1/">Un</a>
  <a data-testid="title-cast-item__actor" href="/name/nm2/">Deux</a>
</body></html>
"#;

#[tokio::test]
async fn test_metadata_scrape_fills_missing_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/title/tt0000042/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(TITLE_PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let config = MetadataConfig {
        base_url: server.uri(),
        ..Default::default()
    };
    let scraper = ImdbScraper::new(fetcher(), &config).unwrap();
    let meta = tokio_test::assert_ok!(scraper.get_movie("tt0000042").await);

    assert_eq!(meta.name, "Le Film");
    assert_eq!(meta.director, "Jeanne Réal");
    assert_eq!(meta.synopsis, "Two strangers share a train.");
    assert_eq!(meta.cast_line(), "Un,Deux");
    assert_eq!(meta.rating, NO_RATING);
    assert_eq!(meta.poster, NO_POSTER);
}

#[tokio::test]
async fn test_metadata_missing_title_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let config = MetadataConfig {
        base_url: server.uri(),
        budget_secs: 2,
        ..Default::default()
    };
    let scraper = ImdbScraper::new(fetcher(), &config).unwrap();

    let err = scraper.get_movie("tt9999999").await.unwrap_err();
    assert!(matches!(err, YtsError::FetchTimeout { .. }));
}

#[tokio::test]
async fn test_download_saves_torrent_under_slug() {
    let server = MockServer::start().await;
    let torrent = b"d8:announce30:udp://tracker.test:1337/announcee".to_vec();
    Mock::given(method("GET"))
        .and(path("/torrent/download/ABCDEF"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(torrent.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let config = DownloadConfig {
        dir: Some(temp.path().join("torrents")),
        ..Default::default()
    };
    let downloader = Downloader::new(fetcher(), &config);

    let variant = TorrentVariant {
        url: format!("{}/torrent/download/ABCDEF", server.uri()),
        quality: "1080p".into(),
        kind: "bluray".into(),
        size: "1.9 GB".into(),
        ..Default::default()
    };
    let movie = MovieRecord {
        id: 42,
        title: "Le Film".into(),
        slug: "le-film-2021".into(),
        torrents: vec![variant.clone()],
        ..Default::default()
    };

    let chosen = movie.variant_for_option("1080p bluray 1.9 GB").unwrap();
    let saved = downloader.download(&movie, chosen).await.unwrap();

    assert_eq!(saved, temp.path().join("torrents").join("le-film-2021.torrent"));
    assert_eq!(std::fs::read(&saved).unwrap(), torrent);
}
