use std::fmt;

/// Genres offered by the catalog's `genre` filter.
pub const GENRES: &[&str] = &[
    "Action",
    "Adventure",
    "Animation",
    "Biography",
    "Comedy",
    "Crime",
    "Documentary",
    "Drama",
    "Family",
    "Fantasy",
    "Film-Noir",
    "History",
    "Horror",
    "Music",
    "Musical",
    "Mystery",
    "Romance",
    "Sci-Fi",
    "Sport",
    "Thriller",
    "War",
    "Western",
];

/// Display name and browse-page code for each language.
pub const LANGUAGES: &[(&str, &str)] = &[
    ("English", "en"),
    ("French", "fr"),
    ("German", "de"),
    ("Spanish", "es"),
    ("Italian", "it"),
    ("Japanese", "ja"),
    ("Korean", "ko"),
    ("Chinese", "zh"),
    ("Hindi", "hi"),
    ("Russian", "ru"),
    ("Portuguese", "pt"),
    ("Swedish", "sv"),
    ("Danish", "da"),
    ("Norwegian", "no"),
    ("Dutch", "nl"),
    ("Polish", "pl"),
    ("Turkish", "tr"),
    ("Thai", "th"),
    ("Arabic", "ar"),
    ("Finnish", "fi"),
];

/// Filter expression for the catalog listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingFilter {
    /// Most recent uploads, 50 per page.
    Latest,
    Genre(String),
}

impl ListingFilter {
    pub fn query_pair(&self) -> (&str, &str) {
        match self {
            ListingFilter::Latest => ("limit", "50"),
            ListingFilter::Genre(genre) => ("genre", genre.as_str()),
        }
    }
}

impl fmt::Display for ListingFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (key, value) = self.query_pair();
        write!(f, "{}={}", key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_table_entries() {
        assert_eq!(LANGUAGES.len(), 20);
        assert!(LANGUAGES.contains(&("French", "fr")));
        assert!(LANGUAGES.contains(&("Japanese", "ja")));
    }

    #[test]
    fn test_language_codes_are_unique() {
        let mut codes: Vec<_> = LANGUAGES.iter().map(|(_, c)| *c).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), LANGUAGES.len());
    }

    #[test]
    fn test_filter_expressions() {
        assert_eq!(ListingFilter::Latest.to_string(), "limit=50");
        assert_eq!(ListingFilter::Genre("Sci-Fi".into()).to_string(), "genre=Sci-Fi");
    }
}
