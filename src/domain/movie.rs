use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// A catalog entry as returned by `list_movies.json`.
///
/// Every field is optional on the wire. Absent, null or wrong-typed values
/// decode to the field's default instead of failing the whole record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovieRecord {
    #[serde(deserialize_with = "lenient")]
    pub id: u64,
    #[serde(deserialize_with = "lenient")]
    pub url: String,
    #[serde(deserialize_with = "lenient")]
    pub imdb_code: String,
    #[serde(deserialize_with = "lenient")]
    pub title: String,
    #[serde(deserialize_with = "lenient")]
    pub title_english: String,
    #[serde(deserialize_with = "lenient")]
    pub title_long: String,
    #[serde(deserialize_with = "lenient")]
    pub slug: String,
    #[serde(deserialize_with = "lenient")]
    pub year: u32,
    #[serde(deserialize_with = "lenient")]
    pub rating: f64,
    #[serde(deserialize_with = "lenient")]
    pub runtime: u32,
    #[serde(deserialize_with = "lenient")]
    pub genres: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub summary: String,
    #[serde(deserialize_with = "lenient")]
    pub language: String,
    #[serde(deserialize_with = "lenient")]
    pub torrents: Vec<TorrentVariant>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TorrentVariant {
    #[serde(deserialize_with = "lenient")]
    pub url: String,
    #[serde(deserialize_with = "lenient")]
    pub hash: String,
    #[serde(deserialize_with = "lenient")]
    pub quality: String,
    #[serde(rename = "type", deserialize_with = "lenient")]
    pub kind: String,
    #[serde(deserialize_with = "lenient")]
    pub seeds: u32,
    #[serde(deserialize_with = "lenient")]
    pub peers: u32,
    #[serde(deserialize_with = "lenient")]
    pub size: String,
    #[serde(deserialize_with = "lenient")]
    pub size_bytes: u64,
}

impl TorrentVariant {
    /// Label shown in the quality selector: `"<quality> <type> <size>"`.
    pub fn option_label(&self) -> String {
        format!("{} {} {}", self.quality, self.kind, self.size)
    }
}

impl MovieRecord {
    /// Label used in the movie selector, falling back to the bare title.
    pub fn display_title(&self) -> &str {
        if self.title_long.is_empty() {
            &self.title
        } else {
            &self.title_long
        }
    }

    /// Exact comparison against a title scraped from a browse page.
    pub fn matches_title(&self, title: &str) -> bool {
        (!self.title_english.is_empty() && self.title_english == title)
            || (!self.title.is_empty() && self.title == title)
    }

    pub fn torrent_options(&self) -> Vec<String> {
        self.torrents.iter().map(TorrentVariant::option_label).collect()
    }

    /// Map a selected option label back to its variant.
    ///
    /// The full label decides when it is unique to one variant; otherwise the
    /// trailing size field does.
    pub fn variant_for_option(&self, option: &str) -> Option<&TorrentVariant> {
        self.torrents
            .iter()
            .find(|t| t.option_label() == option)
            .or_else(|| {
                self.torrents.iter().find(|t| {
                    !t.size.is_empty()
                        && option
                            .strip_suffix(t.size.as_str())
                            .is_some_and(|rest| rest.is_empty() || rest.ends_with(' '))
                })
            })
    }

    /// File name for the downloaded `.torrent`, safe to join onto a directory.
    pub fn torrent_file_name(&self) -> String {
        let stem: String = self
            .slug
            .trim()
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' => '-',
                c if c.is_control() => '-',
                c => c,
            })
            .collect();
        let stem = stem.trim_start_matches('.');
        if stem.is_empty() {
            format!("{}.torrent", self.id)
        } else {
            format!("{}.torrent", stem)
        }
    }
}

pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}
