//! Tileset probe.
//!
//! Resolves an OGC API - Tiles tileset the same way a map client would and
//! prints the resulting tile grid together with sample tile URLs. Useful
//! for checking a server's tileset metadata before pointing clients at it.

mod report;

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use ogc_tiles::{FetchConfig, SourceInfo, TileSetResolver};
use tiles_common::TileCoord;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use report::ProbeReport;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "tileset-probe")]
#[command(about = "Resolve an OGC API - Tiles tileset and print its tile grid")]
struct Args {
    /// Tileset metadata URL
    #[arg(env = "TILESET_URL")]
    url: String,

    /// Preferred tile media type (e.g. image/png)
    #[arg(short, long)]
    media_type: Option<String>,

    /// Vector media types the client can decode, most preferred first
    #[arg(long, value_delimiter = ',')]
    supported: Vec<String>,

    /// Collection to request from a multi-collection tileset (repeatable)
    #[arg(short, long = "collection")]
    collections: Vec<String>,

    /// Static URL template values, as key=value
    #[arg(long = "context", value_parser = parse_key_value)]
    context: Vec<(String, String)>,

    /// Only report this grid level
    #[arg(short, long)]
    level: Option<u32>,

    /// Tiles to resolve, as z/x/y
    #[arg(short, long = "tile", value_parser = parse_tile)]
    tiles: Vec<TileCoord>,

    /// Request timeout in seconds (overrides TILES_FETCH_TIMEOUT_SECS)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn parse_key_value(s: &str) -> Result<(String, String)> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| anyhow!("expected key=value, got '{}'", s))?;
    if key.is_empty() {
        return Err(anyhow!("empty key in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}

fn parse_tile(s: &str) -> Result<TileCoord> {
    let parts: Vec<&str> = s.split('/').collect();
    if parts.len() != 3 {
        return Err(anyhow!("expected z/x/y, got '{}'", s));
    }
    Ok(TileCoord::new(
        parts[0].parse().context("invalid z")?,
        parts[1].parse().context("invalid x")?,
        parts[2].parse().context("invalid y")?,
    ))
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level, args.json_logs)?;

    let mut fetch_config = FetchConfig::from_env();
    if let Some(secs) = args.timeout_secs {
        fetch_config = fetch_config.with_timeout(Duration::from_secs(secs));
    }

    let mut source = SourceInfo::new(&args.url)
        .with_supported_media_types(args.supported.iter().cloned())
        .with_collections(args.collections.iter().cloned());
    if let Some(media_type) = &args.media_type {
        source = source.with_media_type(media_type.clone());
    }
    for (key, value) in &args.context {
        source = source.with_context(key.clone(), value.clone());
    }

    info!(url = %args.url, "Resolving tileset");
    let resolver = TileSetResolver::http(&fetch_config)?;
    let resolved = resolver
        .resolve(&source)
        .await
        .with_context(|| format!("failed to resolve tileset {}", args.url))?;

    let report = ProbeReport::new(&args.url, &resolved, args.level, &args.tiles);
    match args.format {
        OutputFormat::Table => println!("{}", report.format_table()),
        OutputFormat::Json => println!("{}", report.format_json()?),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("style=night").unwrap(),
            ("style".to_string(), "night".to_string())
        );
        assert_eq!(
            parse_key_value("q=a=b").unwrap(),
            ("q".to_string(), "a=b".to_string())
        );
        assert!(parse_key_value("style").is_err());
        assert!(parse_key_value("=x").is_err());
    }

    #[test]
    fn test_parse_tile() {
        assert_eq!(parse_tile("3/4/-1").unwrap(), TileCoord::new(3, 4, -1));
        assert!(parse_tile("3/4").is_err());
        assert!(parse_tile("a/4/1").is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "tileset-probe",
            "https://example.com/tiles/WebMercatorQuad",
            "--collection",
            "roads",
            "-c",
            "rivers,lakes",
            "--context",
            "style=night",
            "--tile",
            "1/0/1",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(args.collections, vec!["roads", "rivers,lakes"]);
        assert_eq!(args.context, vec![("style".to_string(), "night".to_string())]);
        assert_eq!(args.tiles, vec![TileCoord::new(1, 0, 1)]);
        assert!(matches!(args.format, OutputFormat::Json));
    }
}
