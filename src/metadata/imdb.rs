//! Selectors and parsing for IMDb title pages.

use scraper::{ElementRef, Html, Selector};

use crate::app::{Result, YtsError};
use crate::domain::EnrichedMetadata;

const NAME: &str = r#"span[data-testid="hero__primary-text"]"#;
const SYNOPSIS: &str = r#"span[data-testid="plot-l"]"#;
const POSTER: &str = "img.ipc-image";
const RATING: &str = r#"div[data-testid="hero-rating-bar__aggregate-rating__score"]"#;
const CREDIT: &str = "a.ipc-metadata-list-item__list-content-item--link";
const CAST: &str = r#"a[data-testid="title-cast-item__actor"]"#;

#[derive(Debug, Clone)]
pub struct TitlePageParser {
    name: Selector,
    synopsis: Selector,
    poster: Selector,
    rating: Selector,
    credit: Selector,
    cast: Selector,
    cast_limit: usize,
}

impl TitlePageParser {
    pub fn new(cast_limit: usize) -> Result<Self> {
        Ok(Self {
            name: selector(NAME)?,
            synopsis: selector(SYNOPSIS)?,
            poster: selector(POSTER)?,
            rating: selector(RATING)?,
            credit: selector(CREDIT)?,
            cast: selector(CAST)?,
            cast_limit,
        })
    }

    /// Every field falls back to its placeholder when missing or blank.
    pub fn parse(&self, html: &str) -> EnrichedMetadata {
        let document = Html::parse_document(html);
        let mut meta = EnrichedMetadata::default();

        if let Some(name) = first_text(&document, &self.name) {
            meta.name = name;
        }
        if let Some(synopsis) = first_text(&document, &self.synopsis) {
            meta.synopsis = synopsis;
        }
        if let Some(rating) = first_text(&document, &self.rating) {
            meta.rating = rating;
        }
        if let Some(director) = first_text(&document, &self.credit) {
            meta.director = director;
        }
        if let Some(poster) = document
            .select(&self.poster)
            .next()
            .and_then(|img| img.value().attr("src"))
            .map(str::trim)
            .filter(|src| !src.is_empty())
        {
            meta.poster = poster.to_string();
        }

        meta.cast = document
            .select(&self.cast)
            .filter_map(text_of)
            .take(self.cast_limit)
            .collect();

        meta
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| YtsError::Selector(format!("{}: {}", css, e)))
}

fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document.select(selector).next().and_then(text_of)
}

fn text_of(element: ElementRef<'_>) -> Option<String> {
    let text = element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metadata::{NO_CREDIT, NO_POSTER, NO_RATING, NO_SYNOPSIS, UNKNOWN_TITLE};

    const PAGE: &str = r#"
<html><body>
  <h1><span data-testid="hero__primary-text">  Le Film  </span></h1>
  <img class="ipc-image" src="https://img.test/poster.jpg">
  <div data-testid="hero-rating-bar__aggregate-rating__score"><span>7.4</span><span>/10</span></div>
  <span data-testid="plot-l">A quiet story.</span>
  <ul>
    <li><a class="ipc-metadata-list-item__list-content-item--link" href="/name/nm1">Jeanne Réal</a></li>
    <li><a class="ipc-metadata-list-item__list-content-item--link" href="/name/nm2">Autre Nom</a></li>
  </ul>
  <a data-testid="title-cast-item__actor">Actor 1</a>
  <a data-testid="title-cast-item__actor">  </a>
  <a data-testid="title-cast-item__actor">Actor 2</a>
  <a data-testid="title-cast-item__actor">Actor 3</a>
</body></html>
"#;

    #[test]
    fn test_parse_full_page() {
        let meta = TitlePageParser::new(9).unwrap().parse(PAGE);

        assert_eq!(meta.name, "Le Film");
        assert_eq!(meta.synopsis, "A quiet story.");
        assert_eq!(meta.rating, "7.4 /10");
        assert_eq!(meta.poster, "https://img.test/poster.jpg");
        assert_eq!(meta.director, "Jeanne Réal");
        assert_eq!(meta.cast, vec!["Actor 1", "Actor 2", "Actor 3"]);
    }

    #[test]
    fn test_cast_is_capped() {
        let meta = TitlePageParser::new(2).unwrap().parse(PAGE);
        assert_eq!(meta.cast, vec!["Actor 1", "Actor 2"]);
    }

    #[test]
    fn test_missing_fields_use_placeholders() {
        let meta = TitlePageParser::new(9)
            .unwrap()
            .parse(r#"<html><body><span data-testid="plot-l">   </span></body></html>"#);

        assert_eq!(meta.name, UNKNOWN_TITLE);
        assert_eq!(meta.synopsis, NO_SYNOPSIS);
        assert_eq!(meta.rating, NO_RATING);
        assert_eq!(meta.poster, NO_POSTER);
        assert_eq!(meta.director, NO_CREDIT);
        assert!(meta.cast.is_empty());
    }
}
