//! Common test fixtures for tileset resolution tests.
//!
//! Documents are built as `serde_json::Value` so tests can tweak single
//! members before handing them to a fetcher or deserializer.

use serde_json::{json, Value};

/// Well-known URLs used by the fixtures.
pub mod urls {
    /// Tileset metadata document of a map collection.
    pub const MAP_TILESET: &str =
        "https://maps.example.com/ogcapi/collections/roads/map/tiles/WebMercatorQuad";

    /// Tileset metadata document of a vector collection.
    pub const VECTOR_TILESET: &str =
        "https://maps.example.com/ogcapi/collections/roads/tiles/WebMercatorQuad";

    /// Multi-collection tileset at the dataset root.
    pub const DATASET_TILESET: &str = "https://maps.example.com/ogcapi/map/tiles/WebMercatorQuad";

    /// Where the tiling-scheme links of the fixtures point.
    pub const WEB_MERCATOR_QUAD: &str =
        "https://maps.example.com/ogcapi/tileMatrixSets/WebMercatorQuad";
}

/// Relation URIs used in fixture links.
pub mod rels {
    pub const ITEM: &str = "item";
    pub const SELF: &str = "self";
    pub const TILING_SCHEME: &str = "http://www.opengis.net/def/rel/ogc/1.0/tiling-scheme";
}

/// CRS URIs used in fixture matrix sets.
pub mod crs {
    pub const EPSG_3857: &str = "http://www.opengis.net/def/crs/EPSG/0/3857";
    pub const EPSG_4326: &str = "http://www.opengis.net/def/crs/EPSG/0/4326";
    pub const CRS_84: &str = "http://www.opengis.net/def/crs/OGC/1.3/CRS84";
}

/// Web Mercator constants.
pub mod mercator {
    /// Half the side of the square world, in metres.
    pub const HALF_WORLD: f64 = 20037508.3427892;

    /// Cell size of level 0 with 256 pixel tiles.
    pub const LEVEL0_CELL_SIZE: f64 = 156543.03392804097;
}

/// A link object.
pub fn link(href: &str, rel: &str, media_type: Option<&str>) -> Value {
    match media_type {
        Some(t) => json!({ "href": href, "rel": rel, "type": t }),
        None => json!({ "href": href, "rel": rel }),
    }
}

/// An `item` link carrying a tile URL template.
pub fn item_link(href: &str, media_type: &str) -> Value {
    json!({ "href": href, "rel": rels::ITEM, "type": media_type, "templated": true })
}

/// Link to the WebMercatorQuad definition.
pub fn tiling_scheme_link() -> Value {
    link(
        urls::WEB_MERCATOR_QUAD,
        rels::TILING_SCHEME,
        Some("application/json"),
    )
}

/// A tile matrix entry.
#[allow(clippy::too_many_arguments)]
pub fn tile_matrix(
    id: &str,
    cell_size: f64,
    origin: [f64; 2],
    corner_of_origin: &str,
    matrix_width: u32,
    matrix_height: u32,
    tile_width: u32,
    tile_height: u32,
) -> Value {
    json!({
        "id": id,
        "cellSize": cell_size,
        "pointOfOrigin": origin,
        "cornerOfOrigin": corner_of_origin,
        "matrixWidth": matrix_width,
        "matrixHeight": matrix_height,
        "tileWidth": tile_width,
        "tileHeight": tile_height
    })
}

/// A tile matrix set limit entry.
pub fn limit(tile_matrix: &str, min_row: i64, max_row: i64, min_col: i64, max_col: i64) -> Value {
    json!({
        "tileMatrix": tile_matrix,
        "minTileRow": min_row,
        "maxTileRow": max_row,
        "minTileCol": min_col,
        "maxTileCol": max_col
    })
}

/// WebMercatorQuad with levels `0..=max_level`.
pub fn web_mercator_quad(max_level: u32) -> Value {
    let matrices: Vec<Value> = (0..=max_level)
        .map(|z| {
            let n = 1u32 << z;
            tile_matrix(
                &z.to_string(),
                mercator::LEVEL0_CELL_SIZE / n as f64,
                [-mercator::HALF_WORLD, mercator::HALF_WORLD],
                "topLeft",
                n,
                n,
                256,
                256,
            )
        })
        .collect();

    json!({
        "id": "WebMercatorQuad",
        "title": "Google Maps Compatible for the World",
        "uri": "http://www.opengis.net/def/tilematrixset/OGC/1.0/WebMercatorQuad",
        "crs": crs::EPSG_3857,
        "orderedAxes": ["X", "Y"],
        "tileMatrices": matrices
    })
}

/// A latitude-first EPSG:4326 quad with two columns at level 0.
///
/// Origins are written `[lat, lon]`; `orderedAxes` is omitted so the axis
/// order comes from the projection.
pub fn world_epsg4326_quad(max_level: u32) -> Value {
    let matrices: Vec<Value> = (0..=max_level)
        .map(|z| {
            let n = 1u32 << z;
            tile_matrix(
                &z.to_string(),
                0.703125 / n as f64,
                [90.0, -180.0],
                "topLeft",
                2 * n,
                n,
                256,
                256,
            )
        })
        .collect();

    json!({
        "id": "WorldEPSG4326Quad",
        "crs": crs::EPSG_4326,
        "tileMatrices": matrices
    })
}

/// A small matrix set whose tiles count upward from a bottom-left origin.
///
/// Every level covers 512 x 512 map units above and right of the origin at
/// `(0, 0)`; level `z` has `2^(z+1)` tiles per side and matrix id `Lz`.
pub fn bottom_left_matrix_set(max_level: u32) -> Value {
    let matrices: Vec<Value> = (0..=max_level)
        .map(|z| {
            let n = 2u32 << z;
            tile_matrix(
                &format!("L{}", z),
                1.0 / (1u32 << z) as f64,
                [0.0, 0.0],
                "bottomLeft",
                n,
                n,
                256,
                256,
            )
        })
        .collect();

    json!({
        "id": "BottomLeftTest",
        "crs": crs::EPSG_3857,
        "orderedAxes": ["E", "N"],
        "tileMatrices": matrices
    })
}

/// Links of a typical map tileset.
pub fn map_links() -> Vec<Value> {
    vec![
        link(urls::MAP_TILESET, rels::SELF, Some("application/json")),
        tiling_scheme_link(),
        item_link(
            "WebMercatorQuad/{tileMatrix}/{tileRow}/{tileCol}?f=png",
            "image/png",
        ),
        item_link(
            "WebMercatorQuad/{tileMatrix}/{tileRow}/{tileCol}?f=jpeg",
            "image/jpeg",
        ),
    ]
}

/// Links of a typical vector tileset.
pub fn vector_links() -> Vec<Value> {
    vec![
        link(urls::VECTOR_TILESET, rels::SELF, Some("application/json")),
        tiling_scheme_link(),
        item_link(
            "WebMercatorQuad/{tileMatrix}/{tileRow}/{tileCol}?f=mvt",
            "application/vnd.mapbox-vector-tile",
        ),
        item_link(
            "WebMercatorQuad/{tileMatrix}/{tileRow}/{tileCol}?f=json",
            "application/geo+json",
        ),
    ]
}

/// A tileset document.
pub fn tileset(data_type: &str, links: Vec<Value>) -> Value {
    json!({
        "title": "Roads",
        "dataType": data_type,
        "crs": crs::EPSG_3857,
        "links": links
    })
}

/// Map tileset referencing WebMercatorQuad by link.
pub fn map_tileset() -> Value {
    tileset("map", map_links())
}

/// Vector tileset referencing WebMercatorQuad by link.
pub fn vector_tileset() -> Value {
    tileset("vector", vector_links())
}

/// `tileset` with the matrix set embedded and the tiling-scheme link removed.
pub fn with_inline_matrix_set(mut tileset: Value, matrix_set: Value) -> Value {
    if let Some(links) = tileset.get_mut("links").and_then(Value::as_array_mut) {
        links.retain(|l| l["rel"] != rels::TILING_SCHEME);
    }
    tileset["tileMatrixSet"] = matrix_set;
    tileset
}

/// `tileset` with `tileMatrixSetLimits`.
pub fn with_limits(mut tileset: Value, limits: Vec<Value>) -> Value {
    tileset["tileMatrixSetLimits"] = Value::Array(limits);
    tileset
}
