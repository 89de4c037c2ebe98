//! Colors for the selector and the movie detail view.

use ratatui::style::Color;
use serde::{de, Deserialize, Deserializer};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    #[serde(deserialize_with = "deserialize_color")]
    pub prompt: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub query: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub match_highlight: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_bg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub border: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub status_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub status_bg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub heading_name: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub heading_director: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub heading_synopsis: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub heading_rating: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub heading_cast: Color,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            prompt: Color::Cyan,
            query: Color::White,
            match_highlight: Color::Yellow,
            selection_fg: Color::Black,
            selection_bg: Color::Cyan,
            border: Color::DarkGray,
            status_fg: Color::White,
            status_bg: Color::DarkGray,
            heading_name: Color::Yellow,
            heading_director: Color::Rgb(255, 165, 0),
            heading_synopsis: Color::Blue,
            heading_rating: Color::Magenta,
            heading_cast: Color::Green,
        }
    }
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_color(&raw).map_err(de::Error::custom)
}

/// Parse a named color (case-insensitive) or a `#RRGGBB` / `#RGB` hex code.
pub fn parse_color(raw: &str) -> Result<Color, String> {
    let raw = raw.trim();

    if let Some(hex) = raw.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| format!("Invalid hex color: {}", raw));
    }

    let color = match raw.to_ascii_lowercase().replace(['_', '-', ' '], "").as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" | "purple" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "lightyellow" => Color::LightYellow,
        "lightblue" => Color::LightBlue,
        "lightmagenta" => Color::LightMagenta,
        "lightcyan" => Color::LightCyan,
        "white" => Color::White,
        "orange" => Color::Rgb(255, 165, 0),
        "reset" => Color::Reset,
        _ => return Err(format!("Unknown color: {}", raw)),
    };
    Ok(color)
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |digits: &str| u8::from_str_radix(digits, 16).ok();
    match hex.len() {
        6 => Some(Color::Rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        3 => Some(Color::Rgb(
            channel(&hex[0..1])? * 17,
            channel(&hex[1..2])? * 17,
            channel(&hex[2..3])? * 17,
        )),
        _ => None,
    }
}
