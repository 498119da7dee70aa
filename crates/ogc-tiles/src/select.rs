//! Choosing the tile URL template among a tileset's links.
//!
//! Candidates are ranked through a fixed priority chain. Within one rank
//! the link listed first wins, so an exact media type match is taken from
//! its first occurrence even when other acceptable links precede it.

use std::collections::HashMap;

use tiles_common::{TilesError, TilesResult};
use tracing::debug;

use crate::collections::append_collections_query_param;
use crate::link::Link;
use crate::media::{is_map_media_type, is_vector_media_type};

/// Why a map link qualified, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum MapRank {
    Preferred,
    KnownRaster,
    AnyImage,
}

/// Why a vector link qualified, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum VectorRank {
    Preferred,
    KnownVector,
}

fn rank_map_link(link: &Link, preferred: Option<&str>) -> Option<MapRank> {
    if !link.is_item() {
        return None;
    }
    let media_type = link.media_type()?;

    if preferred == Some(media_type) {
        Some(MapRank::Preferred)
    } else if is_map_media_type(media_type) {
        Some(MapRank::KnownRaster)
    } else if media_type.starts_with("image/") {
        Some(MapRank::AnyImage)
    } else {
        None
    }
}

fn rank_vector_link(link: &Link, preferred: Option<&str>) -> Option<VectorRank> {
    if !link.is_item() {
        return None;
    }
    let media_type = link.media_type()?;

    if preferred == Some(media_type) {
        Some(VectorRank::Preferred)
    } else if is_vector_media_type(media_type) {
        Some(VectorRank::KnownVector)
    } else {
        None
    }
}

/// Lowest rank wins; `min_by_key` keeps the first of equal elements.
fn best_ranked<R: Ord + Copy>(
    links: &[Link],
    rank: impl Fn(&Link) -> Option<R>,
) -> Option<(R, &Link)> {
    links
        .iter()
        .filter_map(|link| rank(link).map(|r| (r, link)))
        .min_by_key(|(r, _)| *r)
}

fn finish(href: &str, collections: &[String]) -> String {
    if collections.is_empty() {
        href.to_string()
    } else {
        append_collections_query_param(href, collections)
    }
}

/// Pick the URL template for raster tiles.
///
/// Order: an `item` link of the preferred media type, then the first
/// `item` link of a known raster type, then the first `item` link of any
/// `image/*` type.
pub fn select_map_template(
    links: &[Link],
    preferred: Option<&str>,
    collections: &[String],
) -> TilesResult<String> {
    let (rank, link) =
        best_ranked(links, |l| rank_map_link(l, preferred)).ok_or(TilesError::MissingItemLink)?;

    debug!(?rank, href = %link.href, media_type = ?link.type_, "Selected map tile template");
    Ok(finish(&link.href, collections))
}

/// Pick the URL template for vector tiles.
///
/// Order: an `item` link of the preferred media type, then the first
/// `item` link of a known vector type, then the first entry of `supported`
/// offered by any link (whatever its relation; the last link of a given
/// type wins).
pub fn select_vector_template(
    links: &[Link],
    preferred: Option<&str>,
    supported: &[String],
    collections: &[String],
) -> TilesResult<String> {
    if let Some((rank, link)) = best_ranked(links, |l| rank_vector_link(l, preferred)) {
        debug!(?rank, href = %link.href, media_type = ?link.type_, "Selected vector tile template");
        return Ok(finish(&link.href, collections));
    }

    let mut href_by_type: HashMap<&str, &str> = HashMap::new();
    for link in links {
        if let Some(media_type) = link.media_type() {
            href_by_type.insert(media_type, &link.href);
        }
    }

    let (media_type, href) = supported
        .iter()
        .find_map(|t| href_by_type.get(t.as_str()).map(|href| (t, *href)))
        .ok_or(TilesError::MissingItemLink)?;

    debug!(href = %href, media_type = %media_type, "Selected vector tile template from supported media types");
    Ok(finish(href, collections))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(href: &str, media_type: &str) -> Link {
        Link::new(href, "item").with_type(media_type)
    }

    #[test]
    fn test_map_exact_match_wins_over_earlier_fallback() {
        let links = vec![item("A", "image/png"), item("B", "image/jpeg")];
        assert_eq!(
            select_map_template(&links, Some("image/jpeg"), &[]).unwrap(),
            "B"
        );
    }

    #[test]
    fn test_map_first_exact_match_wins() {
        let links = vec![item("A", "image/jpeg"), item("B", "image/jpeg")];
        assert_eq!(
            select_map_template(&links, Some("image/jpeg"), &[]).unwrap(),
            "A"
        );
    }

    #[test]
    fn test_map_known_raster_beats_loose_image() {
        let links = vec![item("A", "image/tiff"), item("B", "image/png"), item("C", "image/webp")];
        assert_eq!(select_map_template(&links, None, &[]).unwrap(), "B");
    }

    #[test]
    fn test_map_loose_image_fallback() {
        let links = vec![item("A", "image/tiff"), item("B", "image/x-raw")];
        assert_eq!(select_map_template(&links, Some("image/png"), &[]).unwrap(), "A");
    }

    #[test]
    fn test_map_ignores_non_item_links() {
        let links = vec![
            Link::new("self", "self").with_type("image/png"),
            item("C", "application/x-unknown"),
        ];
        assert!(matches!(
            select_map_template(&links, None, &[]),
            Err(TilesError::MissingItemLink)
        ));
    }

    #[test]
    fn test_map_appends_collections() {
        let links = vec![item("map/tiles/{tileMatrix}/{tileRow}/{tileCol}", "image/png")];
        let collections = vec!["roads".to_string()];
        assert_eq!(
            select_map_template(&links, None, &collections).unwrap(),
            "map/tiles/{tileMatrix}/{tileRow}/{tileCol}?collections=roads"
        );
    }

    #[test]
    fn test_vector_supported_types_fallback() {
        let links = vec![
            Link::new("tiles/{z}/{x}/{y}.mvt", "alternate")
                .with_type("application/vnd.mapbox-vector-tile"),
        ];
        let supported = vec![
            "application/geo+json".to_string(),
            "application/vnd.mapbox-vector-tile".to_string(),
        ];
        assert_eq!(
            select_vector_template(&links, None, &supported, &[]).unwrap(),
            "tiles/{z}/{x}/{y}.mvt"
        );
    }

    #[test]
    fn test_vector_lookup_last_write_wins() {
        let links = vec![
            Link::new("first", "alternate").with_type("application/x-protobuf"),
            Link::new("second", "describedby").with_type("application/x-protobuf"),
        ];
        let supported = vec!["application/x-protobuf".to_string()];
        assert_eq!(
            select_vector_template(&links, None, &supported, &[]).unwrap(),
            "second"
        );
    }

    #[test]
    fn test_vector_preferred_then_known() {
        let links = vec![
            item("mvt", "application/vnd.mapbox-vector-tile"),
            item("json", "application/geo+json"),
        ];
        assert_eq!(
            select_vector_template(&links, Some("application/geo+json"), &[], &[]).unwrap(),
            "json"
        );
        assert_eq!(
            select_vector_template(&links, Some("text/plain"), &[], &[]).unwrap(),
            "mvt"
        );
    }

    #[test]
    fn test_vector_missing_item_link() {
        let links = vec![item("png", "image/png")];
        assert!(matches!(
            select_vector_template(&links, None, &[], &[]),
            Err(TilesError::MissingItemLink)
        ));
    }
}
