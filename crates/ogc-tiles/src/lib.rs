//! OGC API - Tiles tileset resolution.
//!
//! Turns a tileset metadata document, and the tile matrix set it embeds or
//! links to, into a [`TileGrid`](tiles_common::TileGrid) and a
//! [`TileUrlFunction`] that maps tile coordinates to request URLs.
//!
//! ```no_run
//! use ogc_tiles::{FetchConfig, SourceInfo, TileSetResolver};
//! use tiles_common::TileCoord;
//!
//! # async fn run() -> tiles_common::TilesResult<()> {
//! let resolver = TileSetResolver::http(&FetchConfig::from_env())?;
//! let source = SourceInfo::new("https://maps.example.com/collections/roads/map/tiles/WebMercatorQuad")
//!     .with_media_type("image/png");
//!
//! let info = resolver.resolve(&source).await?;
//! let url = info.urls.tile_url(Some(TileCoord::new(3, 4, 2)));
//! # Ok(())
//! # }
//! ```

pub mod collections;
pub mod config;
pub mod fetch;
pub mod link;
pub mod media;
pub mod parser;
pub mod resolver;
pub mod select;
pub mod template;
pub mod tileset;
pub mod urls;

pub use collections::append_collections_query_param;
pub use config::{FetchConfig, SourceInfo};
pub use fetch::{HttpFetcher, JsonFetcher, MemoryFetcher};
pub use link::Link;
pub use media::{is_map_media_type, is_vector_media_type};
pub use parser::{parse_tile_matrix_set, TileSetInfo};
pub use resolver::{parse_tile_set, resolve_tile_set, TileSetResolver};
pub use select::{select_map_template, select_vector_template};
pub use template::UrlTemplate;
pub use tileset::{
    CornerOfOrigin, CrsRef, DataType, TileMatrix, TileMatrixSet, TileMatrixSetLimit, TileSet,
};
pub use urls::{LevelAddress, TileUrlFunction};
