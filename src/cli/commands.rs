use std::sync::{Arc, Mutex};

use crossterm::style::Stylize;
use futures::{pin_mut, Stream, StreamExt};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use tokio::sync::mpsc::{self, UnboundedSender};

use crate::app::{AppContext, Result, YtsError};
use crate::catalog::ListingFilter;
use crate::config::ColorConfig;
use crate::domain::{EnrichedMetadata, MovieRecord, Page};
use crate::tui::{self, Feed};

pub async fn search(ctx: &AppContext) -> Result<()> {
    let Some(term) = tui::input("Enter search term", &ctx.config.colors).await? else {
        return Ok(());
    };
    let term = term.trim();
    if term.is_empty() {
        return Ok(());
    }

    let results = ctx.catalog.search(term);
    select_and_show(ctx, results).await
}

pub async fn list(ctx: &AppContext, filter: ListingFilter) -> Result<()> {
    let results = ctx.catalog.list(filter);
    select_and_show(ctx, results).await
}

pub async fn browse_language(ctx: &AppContext, language: &str) -> Result<()> {
    let results = ctx.catalog.by_language(language);
    select_and_show(ctx, results).await
}

async fn select_and_show<S>(ctx: &AppContext, results: S) -> Result<()>
where
    S: Stream<Item = Result<Page<MovieRecord>>> + Send + 'static,
{
    match select_movie(results, &ctx.config.colors).await? {
        Some(movie) => show_movie(ctx, &movie).await,
        None => Ok(()),
    }
}

/// Stream movie labels into the picker and return the chosen record.
///
/// Closing the picker stops the producer, so no further pages are pulled.
async fn select_movie<S>(results: S, colors: &ColorConfig) -> Result<Option<MovieRecord>>
where
    S: Stream<Item = Result<Page<MovieRecord>>> + Send + 'static,
{
    let movies = Arc::new(Mutex::new(Vec::new()));
    let (tx, rx) = mpsc::unbounded_channel();
    let producer = tokio::spawn(feed_movies(results, movies.clone(), tx));

    let choice = tui::pick_streaming("Select a movie", None, rx, colors).await;
    producer.abort();

    let Some(index) = choice? else {
        return Ok(None);
    };
    let movies = movies
        .lock()
        .map_err(|_| YtsError::Other("movie list lock poisoned".into()))?;
    Ok(movies.get(index).cloned())
}

async fn feed_movies<S>(results: S, movies: Arc<Mutex<Vec<MovieRecord>>>, tx: UnboundedSender<Feed>)
where
    S: Stream<Item = Result<Page<MovieRecord>>>,
{
    pin_mut!(results);
    let mut total = 0usize;

    while let Some(page) = results.next().await {
        let page = match page {
            Ok(page) => page,
            Err(e) => {
                tracing::error!("Stopped loading movies after {}: {}", total, e);
                let _ = tx.send(Feed::Failed(format!("Error: {}", e)));
                return;
            }
        };

        let labels: Vec<String> = page
            .items()
            .iter()
            .map(|m| m.display_title().to_string())
            .collect();
        total += labels.len();
        // Records and labels must land in the same order.
        match movies.lock() {
            Ok(mut list) => {
                list.extend(page.into_items());
                if tx.send(Feed::Entries(labels)).is_err() {
                    return;
                }
            }
            Err(_) => return,
        }
    }

    tracing::info!("Loaded {} movies", total);
    let _ = tx.send(Feed::Done);
}

async fn show_movie(ctx: &AppContext, movie: &MovieRecord) -> Result<()> {
    let colors = &ctx.config.colors;
    tracing::info!("Selected '{}' ({})", movie.display_title(), movie.imdb_code);

    let meta = ctx.metadata.get_movie(&movie.imdb_code).await?;
    let header = detail_header(&meta, colors);

    let confirm = tui::pick(
        "Download torrent? (y/n)",
        Some(header.clone()),
        vec!["y".to_string(), "n".to_string()],
        colors,
    )
    .await?;
    if confirm != Some(0) {
        return Ok(());
    }

    let options = movie.torrent_options();
    if options.is_empty() {
        return Err(YtsError::NotFound(format!(
            "no torrents listed for {}",
            movie.display_title()
        )));
    }

    let choice = tui::pick("Select quality", Some(header), options.clone(), colors).await?;
    let Some(index) = choice else {
        return Ok(());
    };
    let variant = movie
        .variant_for_option(&options[index])
        .ok_or_else(|| YtsError::NotFound(format!("no torrent matches '{}'", options[index])))?;

    let path = ctx.downloader.download(movie, variant).await?;
    println!("{}", format!("Downloaded to {}", path.display()).green());
    Ok(())
}

fn detail_header(meta: &EnrichedMetadata, colors: &ColorConfig) -> Text<'static> {
    Text::from(vec![
        field("Name", &meta.name, colors.heading_name),
        field("Director", &meta.director, colors.heading_director),
        field("Synopsis", &meta.synopsis, colors.heading_synopsis),
        field("Rating", &meta.rating, colors.heading_rating),
        field("Cast", &meta.cast_line(), colors.heading_cast),
    ])
}

fn field(heading: &str, value: &str, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{}: ", heading),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::raw(value.to_string()),
    ])
}
