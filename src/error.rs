use crate::models::PartialMetar;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("No results found for station: {station}")]
    StationNotFound { station: String },

    #[error("METAR currently unavailable for station: {station}")]
    ReportUnavailable { station: String },

    #[error("Incomplete METAR for station {station}: expected at least 3 tokens, found {found}")]
    Incomplete {
        station: String,
        found: usize,
        partial: PartialMetar,
    },

    #[error("Malformed METAR for station {station} at token {index}: {reason}")]
    MalformedReport {
        station: String,
        index: usize,
        reason: &'static str,
    },
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to fetch data: {status}")]
    Status { status: reqwest::StatusCode },

    #[error("Unexpected provider response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No METAR data found for airport {station}")]
    NoReport { station: String },

    #[error("An API key is required for the CheckWX provider")]
    MissingApiKey,
}

#[derive(Error, Debug)]
pub enum MetarError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration error: {message}")]
    Invalid { message: String },

    #[error("Invalid bind address {addr}: {source}")]
    BindAddress {
        addr: String,
        source: std::net::AddrParseError,
    },
}

impl DecodeError {
    pub(crate) fn malformed(station: &str, index: usize, reason: &'static str) -> Self {
        DecodeError::MalformedReport {
            station: station.to_string(),
            index,
            reason,
        }
    }
}

pub type Result<T> = std::result::Result<T, MetarError>;
