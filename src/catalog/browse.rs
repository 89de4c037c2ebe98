use scraper::{Html, Selector};

use crate::app::{Result, YtsError};

/// Anchor class carried by every movie title on a browse page.
pub const TITLE_SELECTOR: &str = "a.browse-movie-title";

/// Pulls movie titles out of a language browse page.
#[derive(Debug, Clone)]
pub struct TitleExtractor {
    selector: Selector,
}

impl TitleExtractor {
    pub fn new() -> Result<Self> {
        Self::with_selector(TITLE_SELECTOR)
    }

    pub fn with_selector(css: &str) -> Result<Self> {
        let selector =
            Selector::parse(css).map_err(|e| YtsError::Selector(format!("{}: {}", css, e)))?;
        Ok(Self { selector })
    }

    /// Titles in document order, duplicates kept, with the `[LANG]` tag removed.
    ///
    /// Anchors without text are skipped. A page without any anchors yields an
    /// empty list, which callers treat as the end of the listing.
    pub fn extract(&self, html: &str, language: &str) -> Vec<String> {
        let document = Html::parse_document(html);

        document
            .select(&self.selector)
            .filter_map(|anchor| {
                let label = anchor
                    .text()
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ");
                let title = strip_language_tag(&label, language);
                if title.is_empty() {
                    None
                } else {
                    Some(title.to_string())
                }
            })
            .collect()
    }
}

/// Remove a leading and/or trailing `[lang]` tag, ignoring ASCII case.
pub fn strip_language_tag<'a>(label: &'a str, language: &str) -> &'a str {
    let mut rest = label.trim();
    if language.is_empty() {
        return rest;
    }

    let tag = format!("[{}]", language);
    let n = tag.len();

    if rest.get(..n).is_some_and(|head| head.eq_ignore_ascii_case(&tag)) {
        rest = rest[n..].trim_start();
    }
    if let Some(split) = rest.len().checked_sub(n) {
        if rest.get(split..).is_some_and(|tail| tail.eq_ignore_ascii_case(&tag)) {
            rest = rest[..split].trim_end();
        }
    }
    rest
}
