//! Tile matrix set to tile grid and URL function.

use reqwest::Url;
use tiles_common::{
    AxisOrder, BoundingBox, GridLevel, Projection, ProjectionRegistry, TileGrid, TilesError,
    TilesResult,
};
use tracing::{debug, warn};

use crate::config::SourceInfo;
use crate::template::UrlTemplate;
use crate::tileset::{CrsRef, TileMatrix, TileMatrixSet, TileMatrixSetLimit};
use crate::urls::{LevelAddress, TileUrlFunction};

/// Everything needed to request tiles of one tileset.
#[derive(Debug, Clone)]
pub struct TileSetInfo {
    pub grid: TileGrid,
    pub projection: Projection,
    /// The selected template, after the collections parameter was applied.
    pub url_template: String,
    pub urls: TileUrlFunction,
}

/// Projection of the matrix set, unless the caller fixed one.
pub fn resolve_projection(
    source: &SourceInfo,
    crs: &CrsRef,
    registry: &ProjectionRegistry,
) -> TilesResult<Projection> {
    if let Some(projection) = &source.projection {
        return Ok(projection.clone());
    }

    let uri = crs
        .uri()
        .ok_or_else(|| TilesError::UnsupportedCrs(crs.to_string()))?;

    registry
        .lookup(uri)
        .ok_or_else(|| TilesError::UnknownProjection(uri.to_string()))
}

fn axis_letter(axis: &str) -> Option<char> {
    let axis = axis.trim().to_ascii_lowercase();
    match axis.as_str() {
        "e" | "x" => Some('e'),
        "n" | "y" => Some('n'),
        a if a.starts_with("east") || a.starts_with("lon") => Some('e'),
        a if a.starts_with("north") || a.starts_with("lat") => Some('n'),
        _ => None,
    }
}

/// Orientation code such as `en` from `orderedAxes`, if it names two known axes.
pub fn ordered_axes_orientation(axes: &[String]) -> Option<String> {
    match axes {
        [first, second, ..] => Some([axis_letter(first)?, axis_letter(second)?].iter().collect()),
        _ => None,
    }
}

fn axis_order(matrix_set: &TileMatrixSet, projection: &Projection) -> AxisOrder {
    let declared = matrix_set
        .ordered_axes
        .as_deref()
        .and_then(ordered_axes_orientation);

    match declared {
        Some(orientation) => AxisOrder::from_orientation(&orientation),
        None => projection.axis_order(),
    }
}

/// Levels in grid order, each paired with its limit when limits are given.
fn ordered_levels<'a>(
    matrix_set: &'a TileMatrixSet,
    limits: Option<&'a [TileMatrixSetLimit]>,
) -> Vec<(&'a TileMatrix, Option<&'a TileMatrixSetLimit>)> {
    match limits {
        Some(limits) => limits
            .iter()
            .filter_map(|limit| match matrix_set.matrix(&limit.tile_matrix) {
                Some(matrix) => Some((matrix, Some(limit))),
                None => {
                    warn!(
                        tile_matrix = %limit.tile_matrix,
                        "Limit references an unknown tile matrix; level dropped"
                    );
                    None
                }
            })
            .collect(),
        None => matrix_set.tile_matrices.iter().map(|m| (m, None)).collect(),
    }
}

/// Build the grid and URL function for a tile matrix set.
///
/// `limits`, when given, select and order the levels and bound the grid
/// extent; otherwise every matrix is used in document order and the grid is
/// unbounded.
pub fn parse_tile_matrix_set(
    source: &SourceInfo,
    matrix_set: &TileMatrixSet,
    url_template: &str,
    limits: Option<&[TileMatrixSetLimit]>,
    registry: &ProjectionRegistry,
) -> TilesResult<TileSetInfo> {
    let projection = resolve_projection(source, &matrix_set.crs, registry)?;
    let backwards = axis_order(matrix_set, &projection).is_backwards();

    let ordered = ordered_levels(matrix_set, limits);
    if ordered.is_empty() {
        return Err(TilesError::InvalidTileMatrixSet(format!(
            "no usable tile matrices in {}",
            matrix_set.id.as_deref().unwrap_or("tile matrix set")
        )));
    }

    let mut levels = Vec::with_capacity(ordered.len());
    let mut addresses = Vec::with_capacity(ordered.len());
    let mut extent = BoundingBox::infinite();

    for (matrix, limit) in ordered {
        let [a, b] = matrix.point_of_origin;
        let origin = if backwards { (b, a) } else { (a, b) };

        if let Some(limit) = limit {
            extent = extent.intersect(&matrix.limited_extent(origin, limit));
        }

        levels.push(GridLevel {
            origin,
            resolution: matrix.cell_size,
            matrix_size: (matrix.matrix_width, matrix.matrix_height),
            tile_size: (matrix.tile_width, matrix.tile_height),
        });
        addresses.push(LevelAddress {
            matrix_id: matrix.id.clone(),
            corner_of_origin: matrix.corner_of_origin,
            limit: limit.cloned(),
        });
    }

    let grid = TileGrid::new(levels, limits.map(|_| extent))?;
    let base = Url::parse(&source.url).map_err(|e| TilesError::invalid_url(&source.url, e))?;
    let template = UrlTemplate::compile(url_template, &source.context);

    debug!(
        projection = %projection.code,
        levels = grid.len(),
        swapped_axes = backwards,
        "Parsed tile matrix set"
    );

    Ok(TileSetInfo {
        grid,
        projection,
        url_template: url_template.to_string(),
        urls: TileUrlFunction::new(addresses, template, base),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tileset::CornerOfOrigin;
    use tiles_common::TileCoord;

    fn matrix(id: &str, cell_size: f64, origin: [f64; 2], corner: CornerOfOrigin) -> TileMatrix {
        TileMatrix {
            id: id.to_string(),
            cell_size,
            point_of_origin: origin,
            corner_of_origin: corner,
            matrix_width: 4,
            matrix_height: 4,
            tile_width: 256,
            tile_height: 256,
            scale_denominator: None,
        }
    }

    fn matrix_set(crs: &str, matrices: Vec<TileMatrix>) -> TileMatrixSet {
        TileMatrixSet {
            id: Some("Test".to_string()),
            title: None,
            uri: None,
            crs: CrsRef::Uri(crs.to_string()),
            ordered_axes: None,
            tile_matrices: matrices,
        }
    }

    fn source() -> SourceInfo {
        SourceInfo::new("https://example.com/tiles/Test")
    }

    #[test]
    fn test_ordered_axes_orientation() {
        let axes = |a: &str, b: &str| vec![a.to_string(), b.to_string()];
        assert_eq!(ordered_axes_orientation(&axes("Lat", "Lon")).as_deref(), Some("ne"));
        assert_eq!(ordered_axes_orientation(&axes("E", "N")).as_deref(), Some("en"));
        assert_eq!(ordered_axes_orientation(&axes("x", "y")).as_deref(), Some("en"));
        assert_eq!(ordered_axes_orientation(&axes("latitude", "longitude")).as_deref(), Some("ne"));
        assert_eq!(ordered_axes_orientation(&axes("Easting", "Northing")).as_deref(), Some("en"));
        assert_eq!(ordered_axes_orientation(&axes("north", "EAST")).as_deref(), Some("ne"));
        assert_eq!(ordered_axes_orientation(&axes("Elevation", "N")), None);
        assert_eq!(ordered_axes_orientation(&["E".to_string()]), None);
    }

    #[test]
    fn test_projection_from_registry() {
        let registry = ProjectionRegistry::with_builtin();
        let set = matrix_set(
            "http://www.opengis.net/def/crs/EPSG/0/3857",
            vec![matrix("0", 1.0, [0.0, 0.0], CornerOfOrigin::TopLeft)],
        );

        let info = parse_tile_matrix_set(&source(), &set, "{z}/{x}/{y}", None, &registry).unwrap();
        assert_eq!(info.projection.code, "EPSG:3857");
        assert!(info.grid.extent().is_none());
    }

    #[test]
    fn test_unknown_and_unsupported_crs() {
        let registry = ProjectionRegistry::new();
        let set = matrix_set(
            "EPSG:2056",
            vec![matrix("0", 1.0, [0.0, 0.0], CornerOfOrigin::TopLeft)],
        );
        assert!(matches!(
            parse_tile_matrix_set(&source(), &set, "{z}", None, &registry),
            Err(TilesError::UnknownProjection(id)) if id == "EPSG:2056"
        ));

        let mut wkt = set.clone();
        wkt.crs = CrsRef::Other(serde_json::json!({"wkt": "PROJCS[...]"}));
        assert!(matches!(
            parse_tile_matrix_set(&source(), &wkt, "{z}", None, &registry),
            Err(TilesError::UnsupportedCrs(_))
        ));

        // A caller-supplied projection bypasses the CRS entirely.
        let fixed = source().with_projection(Projection::new("EPSG:2056", "enu"));
        assert!(parse_tile_matrix_set(&fixed, &wkt, "{z}", None, &registry).is_ok());
    }

    #[test]
    fn test_north_first_origin_swapped() {
        let registry = ProjectionRegistry::with_builtin();
        let set = matrix_set(
            "EPSG:4326",
            vec![matrix("0", 0.7, [90.0, -180.0], CornerOfOrigin::TopLeft)],
        );

        let info = parse_tile_matrix_set(&source(), &set, "{z}", None, &registry).unwrap();
        assert_eq!(info.grid.origin(0), Some((-180.0, 90.0)));
    }

    #[test]
    fn test_ordered_axes_override_projection() {
        let registry = ProjectionRegistry::with_builtin();
        let mut set = matrix_set(
            "EPSG:4326",
            vec![matrix("0", 0.7, [-180.0, 90.0], CornerOfOrigin::TopLeft)],
        );
        set.ordered_axes = Some(vec!["Lon".to_string(), "Lat".to_string()]);

        let info = parse_tile_matrix_set(&source(), &set, "{z}", None, &registry).unwrap();
        assert_eq!(info.grid.origin(0), Some((-180.0, 90.0)));
    }

    #[test]
    fn test_spelled_out_axes_keep_easting_first_origin() {
        let registry = ProjectionRegistry::with_builtin();
        let mut set = matrix_set(
            "EPSG:4326",
            vec![matrix("0", 0.7, [-180.0, 90.0], CornerOfOrigin::TopLeft)],
        );
        set.ordered_axes = Some(vec!["Easting".to_string(), "Northing".to_string()]);

        let info = parse_tile_matrix_set(&source(), &set, "{z}", None, &registry).unwrap();
        assert_eq!(info.grid.origin(0), Some((-180.0, 90.0)));
    }

    #[test]
    fn test_limits_order_and_extent() {
        let registry = ProjectionRegistry::with_builtin();
        let set = matrix_set(
            "EPSG:3857",
            vec![
                matrix("a", 4.0, [0.0, 1024.0], CornerOfOrigin::TopLeft),
                matrix("b", 2.0, [0.0, 1024.0], CornerOfOrigin::TopLeft),
            ],
        );
        let limits = vec![
            TileMatrixSetLimit {
                tile_matrix: "b".to_string(),
                min_tile_row: 0,
                max_tile_row: 0,
                min_tile_col: 0,
                max_tile_col: 1,
            },
            TileMatrixSetLimit {
                tile_matrix: "missing".to_string(),
                min_tile_row: 0,
                max_tile_row: 0,
                min_tile_col: 0,
                max_tile_col: 0,
            },
        ];

        let info =
            parse_tile_matrix_set(&source(), &set, "{z}/{x}/{y}", Some(limits.as_slice()), &registry).unwrap();

        assert_eq!(info.grid.len(), 1);
        assert_eq!(info.grid.resolution(0), Some(2.0));
        assert_eq!(info.urls.matrix_id(0), Some("b"));
        assert_eq!(
            info.grid.extent(),
            Some(&BoundingBox::new(0.0, 512.0, 1024.0, 1024.0))
        );
        assert!(info.urls.tile_url(Some(TileCoord::new(0, 2, 0))).is_none());
        assert_eq!(
            info.urls.tile_url(Some(TileCoord::new(0, 1, 0))).as_deref(),
            Some("https://example.com/tiles/b/1/0")
        );
    }

    #[test]
    fn test_limit_at_integer_bounds() {
        let registry = ProjectionRegistry::with_builtin();
        let set = matrix_set(
            "EPSG:3857",
            vec![matrix("a", 1.0, [0.0, 0.0], CornerOfOrigin::TopLeft)],
        );
        let limits = vec![TileMatrixSetLimit {
            tile_matrix: "a".to_string(),
            min_tile_row: 0,
            max_tile_row: i64::MAX,
            min_tile_col: 0,
            max_tile_col: i64::MAX,
        }];

        let info =
            parse_tile_matrix_set(&source(), &set, "{z}/{x}/{y}", Some(limits.as_slice()), &registry).unwrap();

        let extent = info.grid.extent().unwrap();
        assert_eq!(extent.min_x, 0.0);
        assert!(extent.max_x > 0.0 && extent.max_x.is_finite());
        assert!(extent.min_y < 0.0 && extent.min_y.is_finite());
        assert_eq!(
            info.urls.tile_url(Some(TileCoord::new(0, 1, 0))).as_deref(),
            Some("https://example.com/tiles/a/1/0")
        );
    }

    #[test]
    fn test_no_usable_levels() {
        let registry = ProjectionRegistry::with_builtin();
        let set = matrix_set(
            "EPSG:3857",
            vec![matrix("a", 4.0, [0.0, 0.0], CornerOfOrigin::TopLeft)],
        );
        assert!(matches!(
            parse_tile_matrix_set(&source(), &set, "{z}", Some(&[][..]), &registry),
            Err(TilesError::InvalidTileMatrixSet(_))
        ));
    }
}
