//! OGC API - Tiles metadata documents.
//!
//! Only the members needed to build a grid and tile URLs are modelled;
//! everything else in the documents is ignored during deserialization.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tiles_common::{BoundingBox, TilesError};

use crate::link::Link;

/// Kind of tiles a tileset serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Map,
    Vector,
}

impl FromStr for DataType {
    type Err = TilesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "map" => Ok(DataType::Map),
            "vector" => Ok(DataType::Vector),
            other => Err(TilesError::UnsupportedDataType(other.to_string())),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Map => write!(f, "map"),
            DataType::Vector => write!(f, "vector"),
        }
    }
}

/// A tileset metadata document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileSet {
    /// Raw `dataType`; see [`TileSet::data_type`].
    #[serde(rename = "dataType", default)]
    pub data_type_raw: String,

    #[serde(default)]
    pub links: Vec<Link>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile_matrix_set: Option<TileMatrixSet>,

    /// Canonical URI of the tile matrix set the tileset uses.
    #[serde(
        rename = "tileMatrixSetURI",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub tile_matrix_set_uri: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile_matrix_set_limits: Option<Vec<TileMatrixSetLimit>>,

    /// CRS of the tileset as declared by the tileset itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crs: Option<CrsRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl TileSet {
    pub fn data_type(&self) -> Result<DataType, TilesError> {
        self.data_type_raw.parse()
    }

    /// First link pointing at the tile matrix set definition.
    pub fn tiling_scheme_link(&self) -> Option<&Link> {
        self.links.iter().find(|l| l.is_tiling_scheme())
    }
}

/// CRS member of a tile matrix set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CrsRef {
    /// A bare URI or `AUTHORITY:CODE` string.
    Uri(String),
    /// An object carrying a `uri` member.
    Object { uri: String },
    /// WKT or a reference-system object; cannot be resolved.
    Other(Value),
}

impl CrsRef {
    /// Identifier to look up in a projection registry, if there is one.
    pub fn uri(&self) -> Option<&str> {
        match self {
            CrsRef::Uri(uri) | CrsRef::Object { uri } => Some(uri.as_str()),
            CrsRef::Other(_) => None,
        }
    }
}

impl fmt::Display for CrsRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => write!(f, "{}", json),
            Err(_) => write!(f, "{:?}", self),
        }
    }
}

/// Which corner of the matrix the point of origin designates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CornerOfOrigin {
    #[default]
    TopLeft,
    BottomLeft,
}

/// A tile matrix set definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileMatrixSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    pub crs: CrsRef,

    /// Axis abbreviations in the order coordinates are written, e.g. `["Lat", "Lon"]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordered_axes: Option<Vec<String>>,

    pub tile_matrices: Vec<TileMatrix>,
}

impl TileMatrixSet {
    /// Get a tile matrix by identifier.
    pub fn matrix(&self, id: &str) -> Option<&TileMatrix> {
        self.tile_matrices.iter().find(|m| m.id == id)
    }
}

/// A single tile matrix (zoom level) definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileMatrix {
    /// Opaque identifier; the join key against limits
    pub id: String,

    /// Map units per pixel
    pub cell_size: f64,

    /// Origin as written in the document (declared axis order)
    pub point_of_origin: [f64; 2],

    #[serde(default)]
    pub corner_of_origin: CornerOfOrigin,

    /// Number of tile columns
    pub matrix_width: u32,

    /// Number of tile rows
    pub matrix_height: u32,

    /// Tile width in pixels
    pub tile_width: u32,

    /// Tile height in pixels
    pub tile_height: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_denominator: Option<f64>,
}

impl TileMatrix {
    /// Width and height of one tile in map units.
    pub fn tile_span(&self) -> (f64, f64) {
        (
            self.cell_size * self.tile_width as f64,
            self.cell_size * self.tile_height as f64,
        )
    }

    /// Extent covered by the tiles `limit` admits, given the easting-first origin.
    pub fn limited_extent(&self, origin: (f64, f64), limit: &TileMatrixSetLimit) -> BoundingBox {
        let (span_x, span_y) = self.tile_span();

        let min_x = origin.0 + limit.min_tile_col as f64 * span_x;
        let max_x = origin.0 + (limit.max_tile_col as f64 + 1.0) * span_x;

        let (min_y, max_y) = match self.corner_of_origin {
            CornerOfOrigin::BottomLeft => (
                origin.1 + limit.min_tile_row as f64 * span_y,
                origin.1 + (limit.max_tile_row as f64 + 1.0) * span_y,
            ),
            CornerOfOrigin::TopLeft => (
                origin.1 - (limit.max_tile_row as f64 + 1.0) * span_y,
                origin.1 - limit.min_tile_row as f64 * span_y,
            ),
        };

        BoundingBox::new(min_x, min_y, max_x, max_y)
    }
}

/// Inclusive range of available tiles in one tile matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileMatrixSetLimit {
    pub tile_matrix: String,
    pub min_tile_row: i64,
    pub max_tile_row: i64,
    pub min_tile_col: i64,
    pub max_tile_col: i64,
}

impl TileMatrixSetLimit {
    /// Whether an origin-relative column/row falls inside the range.
    pub fn contains(&self, tile_col: i64, tile_row: i64) -> bool {
        tile_col >= self.min_tile_col
            && tile_col <= self.max_tile_col
            && tile_row >= self.min_tile_row
            && tile_row <= self.max_tile_row
    }
}
