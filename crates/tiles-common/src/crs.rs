//! Coordinate reference system identifiers and the projection registry.
//!
//! Tile matrix sets name their CRS in several spellings (`EPSG:3857`,
//! OGC definition URIs, URNs). The registry folds these onto one canonical
//! code and answers with a [`Projection`] that knows its axis orientation.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::BoundingBox;

/// Well-known CRS codes the built-in registry resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrsCode {
    /// OGC CRS84 (lon/lat in degrees)
    Crs84,
    /// WGS84 Geographic (lat/lon in degrees)
    Epsg4326,
    /// Web Mercator (meters)
    Epsg3857,
    /// NAD83 Geographic
    Epsg4269,
    /// CONUS Albers Equal Area
    Epsg5070,
    /// Polar Stereographic North
    Epsg3413,
    /// Polar Stereographic South
    Epsg3031,
}

impl CrsCode {
    pub const ALL: [CrsCode; 7] = [
        CrsCode::Crs84,
        CrsCode::Epsg4326,
        CrsCode::Epsg3857,
        CrsCode::Epsg4269,
        CrsCode::Epsg5070,
        CrsCode::Epsg3413,
        CrsCode::Epsg3031,
    ];

    /// Axis orientation code: `enu` for easting-first, `neu` for northing-first.
    pub fn axis_orientation(&self) -> &'static str {
        match self {
            CrsCode::Epsg4326 | CrsCode::Epsg4269 => "neu",
            _ => "enu",
        }
    }

    /// Approximate valid bounds, easting-first.
    pub fn valid_bounds(&self) -> BoundingBox {
        match self {
            CrsCode::Crs84 | CrsCode::Epsg4326 | CrsCode::Epsg4269 => {
                BoundingBox::new(-180.0, -90.0, 180.0, 90.0)
            }
            CrsCode::Epsg3857 => {
                // Web Mercator bounds (approx ±85.06° latitude)
                let max_extent = 20037508.342789244;
                BoundingBox::new(-max_extent, -max_extent, max_extent, max_extent)
            }
            CrsCode::Epsg5070 => BoundingBox::new(-2500000.0, -2500000.0, 2500000.0, 2500000.0),
            CrsCode::Epsg3413 | CrsCode::Epsg3031 => {
                BoundingBox::new(-4000000.0, -4000000.0, 4000000.0, 4000000.0)
            }
        }
    }

    pub fn projection(&self) -> Projection {
        Projection::new(self.to_string(), self.axis_orientation())
            .with_extent(self.valid_bounds())
    }
}

impl fmt::Display for CrsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            CrsCode::Crs84 => "OGC:CRS84",
            CrsCode::Epsg4326 => "EPSG:4326",
            CrsCode::Epsg3857 => "EPSG:3857",
            CrsCode::Epsg4269 => "EPSG:4269",
            CrsCode::Epsg5070 => "EPSG:5070",
            CrsCode::Epsg3413 => "EPSG:3413",
            CrsCode::Epsg3031 => "EPSG:3031",
        };
        write!(f, "{}", code)
    }
}

/// Canonical `AUTHORITY:CODE` form of an identifier, e.g. `EPSG:3857`.
///
/// Returns `None` when the identifier is not in one of the known spellings.
pub fn canonical_identifier(s: &str) -> Option<String> {
    split_identifier(s.trim()).map(|(authority, code)| format!("{}:{}", authority, code))
}

fn split_identifier(s: &str) -> Option<(String, String)> {
    let lower = s.to_ascii_lowercase();

    for prefix in [
        "http://www.opengis.net/def/crs/",
        "https://www.opengis.net/def/crs/",
    ] {
        if let Some(rest) = lower.strip_prefix(prefix) {
            // authority/version/code
            let parts: Vec<&str> = rest.trim_end_matches('/').split('/').collect();
            if parts.len() != 3 || parts[2].is_empty() {
                return None;
            }
            return Some((parts[0].to_ascii_uppercase(), parts[2].to_ascii_uppercase()));
        }
    }

    if let Some(rest) = lower.strip_prefix("urn:ogc:def:crs:") {
        // authority:version:code, version may be empty
        let parts: Vec<&str> = rest.split(':').collect();
        if parts.len() != 3 || parts[2].is_empty() {
            return None;
        }
        return Some((parts[0].to_ascii_uppercase(), parts[2].to_ascii_uppercase()));
    }

    let (authority, code) = lower.split_once(':')?;
    if authority.is_empty() || code.is_empty() || code.contains(':') {
        return None;
    }
    Some((authority.to_ascii_uppercase(), code.to_ascii_uppercase()))
}

/// Axis order for coordinate interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrder {
    /// Easting (x, longitude) first
    EastNorth,
    /// Northing (y, latitude) first
    NorthEast,
}

impl AxisOrder {
    /// Interpret an orientation code such as `enu` or `neu`.
    ///
    /// Anything that does not start with `en` counts as northing-first.
    pub fn from_orientation(orientation: &str) -> Self {
        if orientation.starts_with("en") {
            AxisOrder::EastNorth
        } else {
            AxisOrder::NorthEast
        }
    }

    pub fn is_backwards(&self) -> bool {
        *self == AxisOrder::NorthEast
    }
}

/// A resolved projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// Canonical code, e.g. `EPSG:3857`
    pub code: String,
    /// Axis orientation code (`enu`, `neu`, ...)
    pub axis_orientation: String,
    /// Valid extent, easting-first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extent: Option<BoundingBox>,
}

impl Projection {
    pub fn new(code: impl Into<String>, axis_orientation: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            axis_orientation: axis_orientation.into(),
            extent: None,
        }
    }

    pub fn with_extent(mut self, extent: BoundingBox) -> Self {
        self.extent = Some(extent);
        self
    }

    pub fn axis_order(&self) -> AxisOrder {
        AxisOrder::from_orientation(&self.axis_orientation)
    }
}

/// Lookup table from CRS identifiers to projections.
///
/// Identifiers are matched verbatim first, then by canonical code, so a
/// projection registered as `EPSG:2056` is also found through its OGC URI.
#[derive(Debug, Clone, Default)]
pub struct ProjectionRegistry {
    projections: HashMap<String, Projection>,
}

impl ProjectionRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-populated with every [`CrsCode`].
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        for code in CrsCode::ALL {
            registry.register(code.to_string(), code.projection());
        }
        registry.register("EPSG:900913", CrsCode::Epsg3857.projection());
        registry
    }

    /// Add or replace a projection under `identifier`.
    pub fn register(&mut self, identifier: impl Into<String>, projection: Projection) {
        let identifier = identifier.into();
        let key = canonical_identifier(&identifier).unwrap_or(identifier);
        self.projections.insert(key, projection);
    }

    pub fn lookup(&self, identifier: &str) -> Option<Projection> {
        if let Some(projection) = self.projections.get(identifier) {
            return Some(projection.clone());
        }
        let canonical = canonical_identifier(identifier)?;
        if canonical == "CRS:84" {
            return self.projections.get("OGC:CRS84").cloned();
        }
        self.projections.get(&canonical).cloned()
    }

    pub fn len(&self) -> usize {
        self.projections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_identifier_spellings() {
        let canonical = |s: &str| canonical_identifier(s);
        assert_eq!(canonical("EPSG:4326").as_deref(), Some("EPSG:4326"));
        assert_eq!(canonical("epsg:3857").as_deref(), Some("EPSG:3857"));
        assert_eq!(canonical("CRS:84").as_deref(), Some("CRS:84"));
        assert_eq!(
            canonical("http://www.opengis.net/def/crs/EPSG/0/3857").as_deref(),
            Some("EPSG:3857")
        );
        assert_eq!(
            canonical("https://www.opengis.net/def/crs/OGC/1.3/CRS84").as_deref(),
            Some("OGC:CRS84")
        );
        assert_eq!(canonical("urn:ogc:def:crs:EPSG::4326").as_deref(), Some("EPSG:4326"));
        assert_eq!(canonical("not a crs"), None);
    }

    #[test]
    fn test_builtin_registry_spellings() {
        let registry = ProjectionRegistry::with_builtin();
        let code = |s: &str| registry.lookup(s).map(|p| p.code);
        assert_eq!(code("urn:ogc:def:crs:EPSG::4326").as_deref(), Some("EPSG:4326"));
        assert_eq!(code("EPSG:900913").as_deref(), Some("EPSG:3857"));
        assert_eq!(code("EPSG:99999"), None);
    }

    #[test]
    fn test_axis_order() {
        assert_eq!(
            AxisOrder::from_orientation(CrsCode::Epsg4326.axis_orientation()),
            AxisOrder::NorthEast
        );
        assert_eq!(
            AxisOrder::from_orientation(CrsCode::Epsg3857.axis_orientation()),
            AxisOrder::EastNorth
        );
        assert_eq!(
            AxisOrder::from_orientation(CrsCode::Crs84.axis_orientation()),
            AxisOrder::EastNorth
        );
        assert!(AxisOrder::from_orientation("wsu").is_backwards());
    }

    #[test]
    fn test_registry_lookup_by_uri() {
        let registry = ProjectionRegistry::with_builtin();
        let projection = registry
            .lookup("http://www.opengis.net/def/crs/EPSG/0/3857")
            .unwrap();
        assert_eq!(projection.code, "EPSG:3857");
        assert_eq!(projection.axis_orientation, "enu");

        let crs84 = registry.lookup("CRS:84").unwrap();
        assert_eq!(crs84.code, "OGC:CRS84");
    }

    #[test]
    fn test_registry_custom_projection() {
        let mut registry = ProjectionRegistry::new();
        registry.register("EPSG:2056", Projection::new("EPSG:2056", "enu"));

        assert!(registry
            .lookup("http://www.opengis.net/def/crs/EPSG/0/2056")
            .is_some());
        assert!(registry.lookup("EPSG:3857").is_none());
    }
}
