//! Caller-supplied configuration.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::Url;
use tiles_common::{Projection, TilesError, TilesResult};

/// What the caller asks of a tileset.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceInfo {
    /// URL of the tileset metadata document; also the base for relative links.
    pub url: String,

    /// Preferred tile media type.
    pub media_type: Option<String>,

    /// Vector media types the caller can decode, most preferred first.
    pub supported_media_types: Vec<String>,

    /// Projection to use instead of resolving the tile matrix set CRS.
    pub projection: Option<Projection>,

    /// Static values for URL template placeholders.
    pub context: BTreeMap<String, String>,

    /// Collections to request from a multi-collection endpoint.
    pub collections: Vec<String>,
}

impl SourceInfo {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            media_type: None,
            supported_media_types: Vec::new(),
            projection: None,
            context: BTreeMap::new(),
            collections: Vec::new(),
        }
    }

    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    pub fn with_supported_media_types<I, S>(mut self, media_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supported_media_types = media_types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = Some(projection);
        self
    }

    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    pub fn with_collections<I, S>(mut self, collections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.collections = collections.into_iter().map(Into::into).collect();
        self
    }

    /// The tileset URL, parsed.
    pub fn base_url(&self) -> TilesResult<Url> {
        Url::parse(&self.url).map_err(|e| TilesError::invalid_url(&self.url, e))
    }
}

/// HTTP settings for fetching metadata documents.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchConfig {
    pub timeout: Duration,
    pub user_agent: String,
    /// `Accept` header sent with every request.
    pub accept: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("ogc-tiles/{}", env!("CARGO_PKG_VERSION")),
            accept: "application/json".to_string(),
        }
    }
}

impl FetchConfig {
    /// Create from environment variables (TILES_FETCH_TIMEOUT_SECS,
    /// TILES_USER_AGENT). Unset or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let timeout = std::env::var("TILES_FETCH_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        let user_agent = std::env::var("TILES_USER_AGENT").unwrap_or(defaults.user_agent);

        Self {
            timeout,
            user_agent,
            accept: defaults.accept,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
