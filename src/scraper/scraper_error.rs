use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum ScrapeError {
    Config(String),
    Network(String),
    JsonParse(String),
    UnexpectedShape(String),
    Store(String),
}

impl fmt::Display for ScrapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrapeError::Config(msg) => write!(f, "Config error: {msg}"),
            ScrapeError::Network(msg) => write!(f, "Network error: {msg}"),
            ScrapeError::JsonParse(msg) => write!(f, "JSON parse error: {msg}"),
            ScrapeError::UnexpectedShape(msg) => write!(f, "Unexpected data shape: {msg}"),
            ScrapeError::Store(msg) => write!(f, "Store error: {msg}"),
        }
    }
}

impl Error for ScrapeError {}
