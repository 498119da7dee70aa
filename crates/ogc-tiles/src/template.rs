//! Tile URL templates.
//!
//! A template such as `tiles/{tileMatrix}/{tileRow}/{tileCol}.png` is
//! compiled once into literal text and typed placeholders. Recognized names
//! are `tileMatrix`/`z`, `tileCol`/`x` and `tileRow`/`y`. Static context
//! values supplied by the caller take precedence over those names and may
//! add new ones. Any other placeholder expands to an empty string.

use std::collections::BTreeMap;
use std::fmt::Write;

use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    TileMatrix,
    TileCol,
    TileRow,
    Static(String),
    Unknown(String),
}

/// A compiled tile URL template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    source: String,
    segments: Vec<Segment>,
}

fn is_placeholder_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

fn placeholder(name: &str, context: &BTreeMap<String, String>) -> Segment {
    if let Some(value) = context.get(name) {
        return Segment::Static(value.clone());
    }
    match name {
        "tileMatrix" | "z" => Segment::TileMatrix,
        "tileCol" | "x" => Segment::TileCol,
        "tileRow" | "y" => Segment::TileRow,
        _ => Segment::Unknown(name.to_string()),
    }
}

impl UrlTemplate {
    /// Compile `template`, binding caller `context` values.
    pub fn compile(template: &str, context: &BTreeMap<String, String>) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            literal.push_str(&rest[..open]);
            let after = &rest[open + 1..];

            match after.find('}') {
                Some(close) if is_placeholder_name(&after[..close]) => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(placeholder(&after[..close], context));
                    rest = &after[close + 1..];
                }
                _ => {
                    literal.push('{');
                    rest = after;
                }
            }
        }
        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        let compiled = Self {
            source: template.to_string(),
            segments,
        };
        let unknown = compiled.unknown_placeholders();
        if !unknown.is_empty() {
            warn!(
                template = %template,
                placeholders = ?unknown,
                "Tile URL template has unrecognized placeholders; they expand to empty strings"
            );
        }
        compiled
    }

    /// The template text as given.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Names of placeholders that are neither recognized nor in the context.
    pub fn unknown_placeholders(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Unknown(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Substitute one tile address.
    pub fn expand(&self, tile_matrix: &str, tile_col: i64, tile_row: i64) -> String {
        let mut out = String::with_capacity(self.source.len() + 16);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) | Segment::Static(text) => out.push_str(text),
                Segment::TileMatrix => out.push_str(tile_matrix),
                Segment::TileCol => {
                    let _ = write!(out, "{}", tile_col);
                }
                Segment::TileRow => {
                    let _ = write!(out, "{}", tile_row);
                }
                Segment::Unknown(_) => {}
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_context() -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    #[test]
    fn test_long_and_short_names() {
        let t = UrlTemplate::compile("tiles/{tileMatrix}/{tileRow}/{tileCol}.png", &no_context());
        assert_eq!(t.expand("5", 10, 12), "tiles/5/12/10.png");

        let t = UrlTemplate::compile("{z}/{x}/{y}", &no_context());
        assert_eq!(t.expand("EPSG:3857:5", 10, 12), "EPSG:3857:5/10/12");
    }

    #[test]
    fn test_context_overrides_and_extends() {
        let mut context = BTreeMap::new();
        context.insert("z".to_string(), "fixed".to_string());
        context.insert("style".to_string(), "night".to_string());

        let t = UrlTemplate::compile("{style}/{z}/{tileMatrix}/{x}", &context);
        assert_eq!(t.expand("3", 1, 2), "night/fixed/3/1");
        assert!(t.unknown_placeholders().is_empty());
    }

    #[test]
    fn test_unknown_placeholder_expands_empty() {
        let t = UrlTemplate::compile("tiles/{datetime}/{z}", &no_context());
        assert_eq!(t.unknown_placeholders(), vec!["datetime"]);
        assert_eq!(t.expand("1", 0, 0), "tiles//1");
    }

    #[test]
    fn test_non_word_braces_are_literal() {
        let t = UrlTemplate::compile("a/{not-a-name}/{}/{{z}/end{", &no_context());
        assert_eq!(t.expand("7", 0, 0), "a/{not-a-name}/{}/{7/end{");
    }

    #[test]
    fn test_negative_indices() {
        let t = UrlTemplate::compile("{x},{y}", &no_context());
        assert_eq!(t.expand("0", -3, -1), "-3,-1");
    }
}
