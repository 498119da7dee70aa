//! Error types for tileset resolution.

use thiserror::Error;

/// Result type alias using TilesError.
pub type TilesResult<T> = Result<T, TilesError>;

/// Primary error type for OGC API Tiles resolution.
#[derive(Debug, Error)]
pub enum TilesError {
    // === Unsupported input ===
    #[error("Unsupported CRS: {0}")]
    UnsupportedCrs(String),

    #[error("Unknown projection: {0}")]
    UnknownProjection(String),

    #[error("Expected tileset data type to be \"map\" or \"vector\", got \"{0}\"")]
    UnsupportedDataType(String),

    // === Missing links ===
    #[error("Could not find \"item\" link")]
    MissingItemLink,

    #[error("Expected {0} link or tileMatrixSet")]
    MissingTilingScheme(&'static str),

    // === Document errors ===
    #[error("Invalid tile matrix set: {0}")]
    InvalidTileMatrixSet(String),

    #[error("Invalid tile grid: {0}")]
    InvalidGrid(String),

    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    // === Fetch errors ===
    #[error("Failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("Failed to decode document: {0}")]
    Decode(String),
}

impl TilesError {
    pub fn invalid_url(url: impl Into<String>, message: impl ToString) -> Self {
        TilesError::InvalidUrl {
            url: url.into(),
            message: message.to_string(),
        }
    }

    pub fn fetch(url: impl Into<String>, message: impl ToString) -> Self {
        TilesError::Fetch {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Whether repeating the same call could succeed.
    ///
    /// Only transport failures qualify; everything else is a property of
    /// the documents themselves.
    pub fn is_retryable(&self) -> bool {
        matches!(self, TilesError::Fetch { .. })
    }
}

impl From<serde_json::Error> for TilesError {
    fn from(err: serde_json::Error) -> Self {
        TilesError::Decode(err.to_string())
    }
}
