use std::time::Duration;

use thiserror::Error;

use crate::domain::ResolutionFailure;

#[derive(Error, Debug)]
pub enum YtsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Gave up on {url} after {attempts} attempts in {budget:?}: {last_error}")]
    FetchTimeout {
        url: String,
        budget: Duration,
        attempts: u32,
        last_error: String,
    },

    #[error("Could not decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid selector: {0}")]
    Selector(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Could not resolve '{title}': {cause}")]
    Resolution { title: String, cause: String },

    #[error("{0}")]
    Other(String),
}

impl YtsError {
    /// Network failures and non-2xx responses may succeed on a later attempt.
    pub fn is_transient(&self) -> bool {
        matches!(self, YtsError::Http(_) | YtsError::Status { .. })
    }
}

impl From<ResolutionFailure> for YtsError {
    fn from(failure: ResolutionFailure) -> Self {
        YtsError::Resolution {
            title: failure.title,
            cause: failure.cause,
        }
    }
}

pub type Result<T> = std::result::Result<T, YtsError>;
