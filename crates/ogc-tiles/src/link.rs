//! Hyperlinks as they appear in OGC API documents.

use serde::{Deserialize, Serialize};

/// Link relation of a tile URL template.
pub const REL_ITEM: &str = "item";

/// Link relation pointing at a tile matrix set definition.
pub const REL_TILING_SCHEME: &str = "http://www.opengis.net/def/rel/ogc/1.0/tiling-scheme";

/// Short form some servers emit instead of [`REL_TILING_SCHEME`].
pub const REL_TILING_SCHEME_SHORT: &str = "tiling-scheme";

/// A hyperlink to a related resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Link {
    /// The URI (or URI template) of the linked resource.
    pub href: String,

    /// The relationship type (e.g., "item", "self").
    pub rel: String,

    /// The media type of the linked resource.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    /// A human-readable title for the link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Whether the link is a URI template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templated: Option<bool>,
}

impl Link {
    /// Create a new link with required fields.
    pub fn new(href: impl Into<String>, rel: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            rel: rel.into(),
            type_: None,
            title: None,
            templated: None,
        }
    }

    /// Set the media type.
    pub fn with_type(mut self, type_: impl Into<String>) -> Self {
        self.type_ = Some(type_.into());
        self
    }

    /// Mark as a URI template.
    pub fn templated(mut self) -> Self {
        self.templated = Some(true);
        self
    }

    pub fn media_type(&self) -> Option<&str> {
        self.type_.as_deref()
    }

    pub fn is_item(&self) -> bool {
        self.rel == REL_ITEM
    }

    pub fn is_tiling_scheme(&self) -> bool {
        self.rel == REL_TILING_SCHEME || self.rel == REL_TILING_SCHEME_SHORT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_type_field() {
        let link: Link = serde_json::from_str(
            r#"{"rel":"item","href":"tiles/{tileMatrix}/{tileRow}/{tileCol}","type":"image/png","templated":true}"#,
        )
        .unwrap();

        assert!(link.is_item());
        assert_eq!(link.media_type(), Some("image/png"));
        assert_eq!(link.templated, Some(true));
    }

    #[test]
    fn test_missing_type_is_none() {
        let link: Link = serde_json::from_str(r#"{"rel":"self","href":"."}"#).unwrap();
        assert_eq!(link.media_type(), None);
        assert!(!link.is_item());
    }

    #[test]
    fn test_tiling_scheme_relations() {
        assert!(Link::new("tms", REL_TILING_SCHEME).is_tiling_scheme());
        assert!(Link::new("tms", "tiling-scheme").is_tiling_scheme());
        assert!(!Link::new("tms", "describedby").is_tiling_scheme());
    }
}
