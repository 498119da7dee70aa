//! Probe results and their formatting.

use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};
use ogc_tiles::TileSetInfo;
use serde::Serialize;
use tiles_common::TileCoord;

/// One grid level as reported.
#[derive(Debug, Serialize)]
pub struct LevelReport {
    pub z: u32,
    pub matrix_id: String,
    pub resolution: f64,
    pub origin: (f64, f64),
    pub matrix_size: (u32, u32),
    pub tile_size: (u32, u32),
    /// URL of the tile at the centre of the grid, when there is one.
    pub sample_url: Option<String>,
}

/// A requested tile and the URL it resolved to.
#[derive(Debug, Serialize)]
pub struct TileReport {
    pub tile: String,
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProbeReport {
    pub url: String,
    pub projection: String,
    pub template: String,
    pub extent: Option<[f64; 4]>,
    pub levels: Vec<LevelReport>,
    pub tiles: Vec<TileReport>,
}

impl ProbeReport {
    /// Summarize a resolved tileset.
    ///
    /// `level` restricts the level list to one entry; `tiles` are resolved
    /// as given.
    pub fn new(url: &str, info: &TileSetInfo, level: Option<u32>, tiles: &[TileCoord]) -> Self {
        let center = info
            .grid
            .extent()
            .copied()
            .or(info.projection.extent)
            .filter(|e| e.is_finite() && !e.is_empty())
            .map(|e| ((e.min_x + e.max_x) / 2.0, (e.min_y + e.max_y) / 2.0));

        let levels = info
            .grid
            .levels()
            .iter()
            .enumerate()
            .map(|(z, l)| (z as u32, l))
            .filter(|(z, _)| level.map_or(true, |wanted| wanted == *z))
            .map(|(z, l)| LevelReport {
                z,
                matrix_id: info.urls.matrix_id(z).unwrap_or_default().to_string(),
                resolution: l.resolution,
                origin: l.origin,
                matrix_size: l.matrix_size,
                tile_size: l.tile_size,
                sample_url: center
                    .and_then(|(x, y)| info.grid.tile_coord_at(z, x, y))
                    .and_then(|coord| info.urls.tile_url(Some(coord))),
            })
            .collect();

        let tiles = tiles
            .iter()
            .map(|coord| TileReport {
                tile: coord.to_string(),
                url: info.urls.tile_url(Some(*coord)),
            })
            .collect();

        Self {
            url: url.to_string(),
            projection: info.projection.code.clone(),
            template: info.url_template.clone(),
            extent: info.grid.extent().map(|e| e.to_array()),
            levels,
            tiles,
        }
    }

    /// Format as console tables.
    pub fn format_table(&self) -> String {
        let mut summary = Table::new();
        summary
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_header(vec![format!("Tileset: {}", self.url)]);

        summary.add_row(vec!["Projection:", &self.projection]);
        summary.add_row(vec!["Template:", &self.template]);
        summary.add_row(vec![
            "Extent:",
            &match self.extent {
                Some([a, b, c, d]) => format!("{:.3}, {:.3}, {:.3}, {:.3}", a, b, c, d),
                None => "unbounded".to_string(),
            },
        ]);

        let mut levels = Table::new();
        levels
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_header(vec![
                "z", "Matrix", "Resolution", "Origin", "Matrix size", "Tile size", "Sample URL",
            ]);
        for level in &self.levels {
            levels.add_row(vec![
                level.z.to_string(),
                level.matrix_id.clone(),
                format!("{:.6}", level.resolution),
                format!("{:.3}, {:.3}", level.origin.0, level.origin.1),
                format!("{} x {}", level.matrix_size.0, level.matrix_size.1),
                format!("{} x {}", level.tile_size.0, level.tile_size.1),
                level.sample_url.clone().unwrap_or_else(|| "-".to_string()),
            ]);
        }

        let mut out = format!("{}\n{}", summary, levels);

        if !self.tiles.is_empty() {
            let mut tiles = Table::new();
            tiles
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_header(vec!["Tile", "URL"]);
            for tile in &self.tiles {
                tiles.add_row(vec![
                    tile.tile.clone(),
                    tile.url.clone().unwrap_or_else(|| "outside tileset".to_string()),
                ]);
            }
            out = format!("{}\n{}", out, tiles);
        }

        out
    }

    /// Format as JSON.
    pub fn format_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
