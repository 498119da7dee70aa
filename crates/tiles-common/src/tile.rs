//! Tile addressing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A tile coordinate (level/column/row) in grid space.
///
/// `z` indexes the levels of a [`TileGrid`](crate::TileGrid). Rows count
/// downward from the level origin, so tiles above a bottom-left origin have
/// negative `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    /// Level index
    pub z: u32,
    /// Column (x)
    pub x: i64,
    /// Row (y)
    pub y: i64,
}

impl TileCoord {
    pub fn new(z: u32, x: i64, y: i64) -> Self {
        Self { z, x, y }
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

impl From<(u32, i64, i64)> for TileCoord {
    fn from((z, x, y): (u32, i64, i64)) -> Self {
        Self { z, x, y }
    }
}
