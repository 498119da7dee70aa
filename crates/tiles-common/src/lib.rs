//! Common types shared by the OGC API Tiles crates.

pub mod bbox;
pub mod crs;
pub mod error;
pub mod grid;
pub mod tile;

pub use bbox::BoundingBox;
pub use crs::{AxisOrder, CrsCode, Projection, ProjectionRegistry};
pub use error::{TilesError, TilesResult};
pub use grid::{GridLevel, TileGrid};
pub use tile::TileCoord;
