use std::path::PathBuf;
use std::sync::Arc;

use crate::app::error::{Result, YtsError};
use crate::catalog::YtsCatalog;
use crate::config::Config;
use crate::download::Downloader;
use crate::fetcher::{Fetcher, HttpFetcher};
use crate::metadata::ImdbScraper;

/// Everything a menu flow needs, built once at startup.
pub struct AppContext {
    pub config: Config,
    pub catalog: Arc<YtsCatalog>,
    pub metadata: ImdbScraper,
    pub downloader: Downloader,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> =
            Arc::new(HttpFetcher::new(&config.user_agent)?);
        Self::with_fetcher(config, fetcher)
    }

    /// Wire the services around an existing fetcher.
    pub fn with_fetcher(config: Config, fetcher: Arc<dyn Fetcher + Send + Sync>) -> Result<Self> {
        let catalog = Arc::new(YtsCatalog::new(fetcher.clone(), &config.catalog)?);
        let metadata = ImdbScraper::new(fetcher.clone(), &config.metadata)?;
        let downloader = Downloader::new(fetcher, &config.download);

        Ok(Self {
            config,
            catalog,
            metadata,
            downloader,
        })
    }

    /// `<data dir>/yts-cli/yts-cli.log`, creating the directory.
    pub fn log_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| YtsError::Config("Could not find data directory".into()))?;
        let app_dir = data_dir.join("yts-cli");
        std::fs::create_dir_all(&app_dir)?;
        Ok(app_dir.join("yts-cli.log"))
    }
}
