//! # yts-cli
//!
//! A terminal browser for the YTS torrent catalog.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → Paged Fetcher → Catalog / Metadata / Download → Menus → Picker
//! ```
//!
//! Every remote page goes through a [`Fetcher`](fetcher::Fetcher) wrapped in a
//! time-budget [`RetryPolicy`](fetcher::RetryPolicy). Paginated resources are
//! walked lazily as streams, so the picker can show results while later
//! pages are still loading.
//!
//! ## Modules
//!
//! - [`app`]: Application context and error types
//! - [`catalog`]: Search, listings and the language browse pipeline
//! - [`cli`]: The interactive menu loop
//! - [`config`]: TOML configuration
//! - [`domain`]: Movie records, torrent variants, pages, metadata
//! - [`download`]: Saving `.torrent` files
//! - [`fetcher`]: HTTP, retry, pagination and bounded parallel resolution
//! - [`metadata`]: Title-page scraping for the detail view
//! - [`tui`]: Streaming fuzzy picker built with ratatui

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the catalog,
/// metadata scraper and downloader around one shared fetcher.
pub mod app;

/// Catalog access.
///
/// - [`YtsCatalog::search`](catalog::YtsCatalog::search): free-text search
/// - [`YtsCatalog::list`](catalog::YtsCatalog::list): latest or by genre
/// - [`YtsCatalog::by_language`](catalog::YtsCatalog::by_language): browse
///   pages scraped for titles, each resolved to a record concurrently
pub mod catalog;

/// Interactive menus: list, search, detail view and download.
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/yts-cli/config.toml`, supporting:
/// - Catalog and metadata base URLs and time budgets
/// - Download directory
/// - Custom colors (named or hex)
pub mod config;

/// Core domain models.
///
/// - [`MovieRecord`](domain::MovieRecord): a catalog entry
/// - [`TorrentVariant`](domain::TorrentVariant): one downloadable quality
/// - [`Page`](domain::Page): a non-empty page of results
/// - [`EnrichedMetadata`](domain::EnrichedMetadata): details for the detail view
pub mod domain;

/// Torrent file downloads.
pub mod download;

/// HTTP fetching, retry and pagination.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for GET requests
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
/// - [`PagedFetcher`](fetcher::paged::PagedFetcher): one page under a retry budget
/// - [`ParallelResolver`](fetcher::parallel::ParallelResolver): Concurrent lookups with semaphore
pub mod fetcher;

/// Movie details scraped from IMDb title pages.
pub mod metadata;

/// Terminal user interface.
///
/// A single full-screen fuzzy picker used for menus, text prompts and
/// movie lists that keep growing while pages load.
///
/// Keybindings: type to filter, ↑/↓ move, Enter selects, Esc goes back.
pub mod tui;
