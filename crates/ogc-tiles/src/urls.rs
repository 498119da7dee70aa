//! Tile coordinate to request URL.

use reqwest::Url;
use tiles_common::TileCoord;
use tracing::debug;

use crate::template::UrlTemplate;
use crate::tileset::{CornerOfOrigin, TileMatrixSetLimit};

/// Addressing data of one grid level.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelAddress {
    pub matrix_id: String,
    pub corner_of_origin: CornerOfOrigin,
    pub limit: Option<TileMatrixSetLimit>,
}

impl LevelAddress {
    /// Row as counted from the matrix's own corner of origin.
    ///
    /// Grid rows always count downward; a bottom-left matrix counts upward
    /// from the row just above its origin.
    pub fn origin_relative_row(&self, row: i64) -> Option<i64> {
        match self.corner_of_origin {
            CornerOfOrigin::TopLeft => Some(row),
            CornerOfOrigin::BottomLeft => row.checked_add(1).map(|r| -r),
        }
    }
}

/// Builds request URLs for tiles of one resolved tileset.
///
/// Owns everything it needs: per-level matrix ids, corners and limits, the
/// compiled template, and the base URL relative templates resolve against.
#[derive(Debug, Clone)]
pub struct TileUrlFunction {
    levels: Vec<LevelAddress>,
    template: UrlTemplate,
    base: Url,
}

impl TileUrlFunction {
    pub fn new(levels: Vec<LevelAddress>, template: UrlTemplate, base: Url) -> Self {
        Self {
            levels,
            template,
            base,
        }
    }

    pub fn template(&self) -> &UrlTemplate {
        &self.template
    }

    pub fn levels(&self) -> &[LevelAddress] {
        &self.levels
    }

    /// Matrix id addressed by grid level `z`.
    pub fn matrix_id(&self, z: u32) -> Option<&str> {
        self.levels.get(z as usize).map(|l| l.matrix_id.as_str())
    }

    /// URL of the tile at `coord`.
    ///
    /// `None` when there is no coordinate, the level is unknown, or the
    /// tile lies outside the level's declared limits.
    pub fn tile_url(&self, coord: Option<TileCoord>) -> Option<String> {
        let coord = coord?;
        let level = self.levels.get(coord.z as usize)?;
        let tile_row = level.origin_relative_row(coord.y)?;

        if let Some(limit) = &level.limit {
            if !limit.contains(coord.x, tile_row) {
                return None;
            }
        }

        let url = self.template.expand(&level.matrix_id, coord.x, tile_row);
        match self.base.join(&url) {
            Ok(resolved) => Some(resolved.into()),
            Err(e) => {
                debug!(url = %url, error = %e, "Cannot resolve tile URL");
                None
            }
        }
    }
}
