//! The interactive menu loop.

pub mod commands;

use crossterm::style::Stylize;

use crate::app::{AppContext, Result};
use crate::catalog::{ListingFilter, GENRES, LANGUAGES};
use crate::tui;

pub const BANNER: &str = "Welcome to YTS-CLI";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainOption {
    List,
    Search,
}

impl MainOption {
    pub const ALL: [MainOption; 2] = [MainOption::List, MainOption::Search];

    pub fn label(self) -> &'static str {
        match self {
            MainOption::List => "1. List Movies",
            MainOption::Search => "2. Search Movies",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOption {
    Latest,
    Genre,
    Language,
}

impl ListOption {
    pub const ALL: [ListOption; 3] = [ListOption::Latest, ListOption::Genre, ListOption::Language];

    pub fn label(self) -> &'static str {
        match self {
            ListOption::Latest => "1. Latest",
            ListOption::Genre => "2. Genre",
            ListOption::Language => "3. Language",
        }
    }
}

fn labels<T: Copy>(options: &[T], label: fn(T) -> &'static str) -> Vec<String> {
    options.iter().map(|&o| label(o).to_string()).collect()
}

/// Show the main menu until the user backs out of it.
pub async fn run(ctx: &AppContext) -> Result<()> {
    println!("{}", BANNER.bold().cyan());
    tracing::info!("Session started");

    loop {
        let choice = tui::pick(
            "Main menu",
            None,
            labels(&MainOption::ALL, MainOption::label),
            &ctx.config.colors,
        )
        .await?;

        let Some(index) = choice else {
            tracing::info!("Session ended");
            return Ok(());
        };

        let outcome = match MainOption::ALL[index] {
            MainOption::List => list_menu(ctx).await,
            MainOption::Search => commands::search(ctx).await,
        };

        if let Err(e) = outcome {
            tracing::error!("Flow failed: {}", e);
            eprintln!("{}", format!("Error: {}", e).red());
        }
    }
}

async fn list_menu(ctx: &AppContext) -> Result<()> {
    let colors = &ctx.config.colors;
    let Some(index) = tui::pick(
        "List movies",
        None,
        labels(&ListOption::ALL, ListOption::label),
        colors,
    )
    .await?
    else {
        return Ok(());
    };

    match ListOption::ALL[index] {
        ListOption::Latest => commands::list(ctx, ListingFilter::Latest).await,
        ListOption::Genre => {
            let genres = GENRES.iter().map(|g| g.to_string()).collect();
            match tui::pick("Select a genre", None, genres, colors).await? {
                Some(i) => commands::list(ctx, ListingFilter::Genre(GENRES[i].to_string())).await,
                None => Ok(()),
            }
        }
        ListOption::Language => {
            let names = LANGUAGES.iter().map(|(name, _)| name.to_string()).collect();
            let Some(i) = tui::pick("Select a language", None, names, colors).await? else {
                return Ok(());
            };
            let (_, code) = LANGUAGES[i];
            commands::browse_language(ctx, code).await
        }
    }
}
