//! Tileset resolution: metadata document in, grid and tile URLs out.

use std::sync::Arc;

use reqwest::Url;
use tiles_common::{ProjectionRegistry, TilesError, TilesResult};
use tracing::{debug, info, instrument};

use crate::config::{FetchConfig, SourceInfo};
use crate::fetch::{HttpFetcher, JsonFetcher};
use crate::link::REL_TILING_SCHEME;
use crate::parser::{parse_tile_matrix_set, TileSetInfo};
use crate::select::{select_map_template, select_vector_template};
use crate::tileset::{DataType, TileMatrixSet, TileSet};

/// Tile URL template for the tileset's data type.
pub fn select_template(source: &SourceInfo, tileset: &TileSet) -> TilesResult<String> {
    let preferred = source.media_type.as_deref();

    match tileset.data_type()? {
        DataType::Map => select_map_template(&tileset.links, preferred, &source.collections),
        DataType::Vector => select_vector_template(
            &tileset.links,
            preferred,
            &source.supported_media_types,
            &source.collections,
        ),
    }
}

/// Fetch the tileset at `source.url` and resolve it.
#[instrument(skip_all, fields(url = %source.url))]
pub async fn resolve_tile_set(
    source: &SourceInfo,
    fetcher: &dyn JsonFetcher,
    registry: &ProjectionRegistry,
) -> TilesResult<TileSetInfo> {
    let base = source.base_url()?;
    let document = fetcher.fetch_json(&base).await?;
    let tileset: TileSet = serde_json::from_value(document)?;

    let info = parse_tile_set(source, &base, &tileset, fetcher, registry).await?;
    info!(
        projection = %info.projection.code,
        levels = info.grid.len(),
        template = %info.url_template,
        "Resolved tileset"
    );
    Ok(info)
}

/// Resolve an already fetched tileset document.
///
/// The tile matrix set is taken inline when present; otherwise it is
/// fetched from the tiling-scheme link, resolved against `base`.
pub async fn parse_tile_set(
    source: &SourceInfo,
    base: &Url,
    tileset: &TileSet,
    fetcher: &dyn JsonFetcher,
    registry: &ProjectionRegistry,
) -> TilesResult<TileSetInfo> {
    let template = select_template(source, tileset)?;
    let limits = tileset.tile_matrix_set_limits.as_deref();

    if let Some(matrix_set) = &tileset.tile_matrix_set {
        debug!("Using inline tile matrix set");
        return parse_tile_matrix_set(source, matrix_set, &template, limits, registry);
    }

    let link = tileset
        .tiling_scheme_link()
        .ok_or(TilesError::MissingTilingScheme(REL_TILING_SCHEME))?;
    let url = base
        .join(&link.href)
        .map_err(|e| TilesError::invalid_url(&link.href, e))?;

    debug!(url = %url, "Fetching tile matrix set");
    let document = fetcher.fetch_json(&url).await?;
    let matrix_set: TileMatrixSet = serde_json::from_value(document)?;

    parse_tile_matrix_set(source, &matrix_set, &template, limits, registry)
}

/// Resolves tilesets with a shared fetcher and projection registry.
#[derive(Clone)]
pub struct TileSetResolver {
    fetcher: Arc<dyn JsonFetcher>,
    registry: ProjectionRegistry,
}

impl TileSetResolver {
    /// Resolver over `fetcher` with the built-in projections.
    pub fn new(fetcher: Arc<dyn JsonFetcher>) -> Self {
        Self {
            fetcher,
            registry: ProjectionRegistry::with_builtin(),
        }
    }

    /// Resolver fetching over HTTP.
    pub fn http(config: &FetchConfig) -> TilesResult<Self> {
        Ok(Self::new(Arc::new(HttpFetcher::new(config)?)))
    }

    pub fn with_registry(mut self, registry: ProjectionRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn registry(&self) -> &ProjectionRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ProjectionRegistry {
        &mut self.registry
    }

    pub async fn resolve(&self, source: &SourceInfo) -> TilesResult<TileSetInfo> {
        resolve_tile_set(source, self.fetcher.as_ref(), &self.registry).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::Link;

    fn tileset(data_type: &str, links: Vec<Link>) -> TileSet {
        TileSet {
            data_type_raw: data_type.to_string(),
            links,
            tile_matrix_set: None,
            tile_matrix_set_uri: None,
            tile_matrix_set_limits: None,
            crs: None,
            title: None,
        }
    }

    #[test]
    fn test_select_template_by_data_type() {
        let links = vec![
            Link::new("tiles/{z}/{x}/{y}.png", "item").with_type("image/png"),
            Link::new("tiles/{z}/{x}/{y}.mvt", "item").with_type("application/vnd.mapbox-vector-tile"),
        ];
        let source = SourceInfo::new("https://example.com/tiles");

        assert_eq!(
            select_template(&source, &tileset("map", links.clone())).unwrap(),
            "tiles/{z}/{x}/{y}.png"
        );
        assert_eq!(
            select_template(&source, &tileset("vector", links.clone())).unwrap(),
            "tiles/{z}/{x}/{y}.mvt"
        );
        assert!(matches!(
            select_template(&source, &tileset("coverage", links)),
            Err(TilesError::UnsupportedDataType(v)) if v == "coverage"
        ));
    }

    #[test]
    fn test_missing_tiling_scheme() {
        let fetcher = crate::fetch::MemoryFetcher::new();
        let source = SourceInfo::new("https://example.com/tiles");
        let base = source.base_url().unwrap();
        let set = tileset(
            "map",
            vec![Link::new("tiles/{z}/{x}/{y}.png", "item").with_type("image/png")],
        );

        let result = tokio_test::block_on(parse_tile_set(
            &source,
            &base,
            &set,
            &fetcher,
            &ProjectionRegistry::with_builtin(),
        ));
        assert!(matches!(result, Err(TilesError::MissingTilingScheme(_))));
        assert!(fetcher.requests().is_empty());
    }
}
