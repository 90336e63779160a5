/// Error types for the BWR core library
use thiserror::Error;

/// Main error type for data fetching and decoding
#[derive(Error, Debug)]
pub enum BwrError {
    /// HTTP request failed
    #[cfg(feature = "api")]
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("Unexpected HTTP status {status} from {url}")]
    HttpStatus { status: u16, url: String },

    /// Failed to decode a JSON payload
    #[error("Failed to decode JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Year/month outside the time slider range
    #[error("Time cursor out of range: {year}-{month:02}")]
    InvalidTimeCursor { year: i32, month: u32 },

    /// Month label that is not a Bulgarian month name
    #[error("Unknown month: {0}")]
    UnknownMonth(String),

    /// Reservoir not found
    #[error("Reservoir not found: {0}")]
    ReservoirNotFound(String),

    /// Autocomplete place without address components or geometry
    #[error("Selected place is missing address components or geometry")]
    PlaceIncomplete,
}

/// Type alias for Results using BwrError
pub type Result<T> = std::result::Result<T, BwrError>;
