//! Saving `.torrent` files for a chosen variant.

use std::path::PathBuf;
use std::sync::Arc;

use url::Url;

use crate::app::{Result, YtsError};
use crate::config::DownloadConfig;
use crate::domain::{MovieRecord, TorrentVariant};
use crate::fetcher::{Fetcher, RetryPolicy};

pub struct Downloader {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    dir: PathBuf,
    policy: RetryPolicy,
}

impl Downloader {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>, config: &DownloadConfig) -> Self {
        Self {
            fetcher,
            dir: config.resolved_dir(),
            policy: RetryPolicy::transfer().with_budget(config.budget()),
        }
    }

    /// Fetch the variant's torrent and write it to `<dir>/<slug>.torrent`.
    ///
    /// The file is only written once the whole body has arrived, replacing
    /// any earlier download of the same movie.
    pub async fn download(&self, movie: &MovieRecord, variant: &TorrentVariant) -> Result<PathBuf> {
        if variant.url.trim().is_empty() {
            return Err(YtsError::NotFound(format!(
                "no torrent link for {} {}",
                variant.quality, variant.kind
            )));
        }
        let url = Url::parse(variant.url.trim())?;

        let fetcher = &self.fetcher;
        let target = &url;
        let body = self
            .policy
            .run(url.as_str(), move || fetcher.fetch(target))
            .await?;

        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(movie.torrent_file_name());
        tokio::fs::write(&path, &body).await?;

        tracing::info!(
            "Saved {} {} torrent for '{}' to {} ({} bytes)",
            variant.quality,
            variant.kind,
            movie.display_title(),
            path.display(),
            body.len()
        );
        Ok(path)
    }
}
