//! Regular tile grid built from per-level geometry.

use serde::{Deserialize, Serialize};

use crate::{BoundingBox, TileCoord, TilesError, TilesResult};

/// Geometry of one level of a [`TileGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLevel {
    /// Level origin, easting-first
    pub origin: (f64, f64),

    /// Map units per pixel
    pub resolution: f64,

    /// Number of tile columns and rows
    pub matrix_size: (u32, u32),

    /// Tile width and height in pixels
    pub tile_size: (u32, u32),
}

impl GridLevel {
    /// Width and height of one tile in map units.
    pub fn tile_span(&self) -> (f64, f64) {
        (
            self.resolution * self.tile_size.0 as f64,
            self.resolution * self.tile_size.1 as f64,
        )
    }
}

/// An indexed hierarchy of tile levels, optionally bounded by an extent.
///
/// Tile rows grow downward from each level's origin: row `0` spans
/// `[origin.y - tile_height, origin.y]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileGrid {
    levels: Vec<GridLevel>,
    extent: Option<BoundingBox>,
}

impl TileGrid {
    pub fn new(levels: Vec<GridLevel>, extent: Option<BoundingBox>) -> TilesResult<Self> {
        if levels.is_empty() {
            return Err(TilesError::InvalidGrid("grid has no levels".to_string()));
        }
        for (z, level) in levels.iter().enumerate() {
            if level.resolution <= 0.0 || !level.resolution.is_finite() {
                return Err(TilesError::InvalidGrid(format!(
                    "level {} has invalid resolution {}",
                    z, level.resolution
                )));
            }
            if level.tile_size.0 == 0 || level.tile_size.1 == 0 {
                return Err(TilesError::InvalidGrid(format!(
                    "level {} has zero tile size",
                    z
                )));
            }
        }

        Ok(Self { levels, extent })
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn levels(&self) -> &[GridLevel] {
        &self.levels
    }

    pub fn level(&self, z: u32) -> Option<&GridLevel> {
        self.levels.get(z as usize)
    }

    pub fn resolutions(&self) -> Vec<f64> {
        self.levels.iter().map(|l| l.resolution).collect()
    }

    pub fn origin(&self, z: u32) -> Option<(f64, f64)> {
        self.level(z).map(|l| l.origin)
    }

    pub fn resolution(&self, z: u32) -> Option<f64> {
        self.level(z).map(|l| l.resolution)
    }

    pub fn matrix_size(&self, z: u32) -> Option<(u32, u32)> {
        self.level(z).map(|l| l.matrix_size)
    }

    pub fn tile_size(&self, z: u32) -> Option<(u32, u32)> {
        self.level(z).map(|l| l.tile_size)
    }

    /// Overall extent, present only when the grid was bounded.
    pub fn extent(&self) -> Option<&BoundingBox> {
        self.extent.as_ref()
    }

    /// Map-unit extent of a tile.
    pub fn tile_extent(&self, coord: &TileCoord) -> Option<BoundingBox> {
        let level = self.level(coord.z)?;
        let (span_x, span_y) = level.tile_span();

        let min_x = level.origin.0 + coord.x as f64 * span_x;
        let max_y = level.origin.1 - coord.y as f64 * span_y;

        Some(BoundingBox::new(min_x, max_y - span_y, min_x + span_x, max_y))
    }

    /// The tile at level `z` containing the point `(x, y)`.
    ///
    /// Returns `None` for unknown levels and for points outside the grid
    /// extent when one is set.
    pub fn tile_coord_at(&self, z: u32, x: f64, y: f64) -> Option<TileCoord> {
        let level = self.level(z)?;
        if let Some(extent) = &self.extent {
            if !extent.contains_point(x, y) {
                return None;
            }
        }
        let (span_x, span_y) = level.tile_span();

        let col = ((x - level.origin.0) / span_x).floor() as i64;
        let row = ((level.origin.1 - y) / span_y).floor() as i64;

        Some(TileCoord::new(z, col, row))
    }

    /// Level whose resolution is nearest to `resolution`.
    pub fn closest_level(&self, resolution: f64) -> u32 {
        let mut best = 0;
        let mut best_delta = f64::INFINITY;
        for (z, level) in self.levels.iter().enumerate() {
            let delta = (level.resolution - resolution).abs();
            if delta < best_delta {
                best = z;
                best_delta = delta;
            }
        }
        best as u32
    }
}
