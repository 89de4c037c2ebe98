pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const NO_SYNOPSIS: &str = "Synopsis not available";
pub const NO_RATING: &str = "NA";
pub const NO_POSTER: &str = "No Poster Available";
pub const NO_CREDIT: &str = "NA";

/// Descriptive fields scraped from a title page.
///
/// Always fully populated: each field missing from the page is replaced by
/// its fallback value, so callers never deal with a partial record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedMetadata {
    pub name: String,
    pub synopsis: String,
    /// Free-form; the source does not guarantee a numeric format.
    pub rating: String,
    pub poster: String,
    /// At most the configured cast limit, in page order.
    pub cast: Vec<String>,
    pub director: String,
}

impl Default for EnrichedMetadata {
    fn default() -> Self {
        Self {
            name: UNKNOWN_TITLE.to_string(),
            synopsis: NO_SYNOPSIS.to_string(),
            rating: NO_RATING.to_string(),
            poster: NO_POSTER.to_string(),
            cast: Vec::new(),
            director: NO_CREDIT.to_string(),
        }
    }
}

impl EnrichedMetadata {
    pub fn cast_line(&self) -> String {
        self.cast.join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_fully_populated() {
        let meta = EnrichedMetadata::default();
        assert_eq!(meta.name, "Unknown Title");
        assert_eq!(meta.synopsis, "Synopsis not available");
        assert_eq!(meta.rating, "NA");
        assert_eq!(meta.director, "NA");
        assert_eq!(meta.poster, NO_POSTER);
        assert!(meta.cast.is_empty());
    }

    #[test]
    fn test_cast_line_joins_with_commas() {
        let meta = EnrichedMetadata {
            cast: vec!["Audrey Tautou".into(), "Mathieu Kassovitz".into()],
            ..Default::default()
        };
        assert_eq!(meta.cast_line(), "Audrey Tautou,Mathieu Kassovitz");
    }
}
