//! Media types recognized as tile payloads.

/// Raster tile formats.
pub const MAP_MEDIA_TYPES: [&str; 4] = ["image/png", "image/jpeg", "image/gif", "image/webp"];

/// Vector tile formats.
pub const VECTOR_MEDIA_TYPES: [&str; 2] = ["application/vnd.mapbox-vector-tile", "application/geo+json"];

pub fn is_map_media_type(media_type: &str) -> bool {
    MAP_MEDIA_TYPES.contains(&media_type)
}

pub fn is_vector_media_type(media_type: &str) -> bool {
    VECTOR_MEDIA_TYPES.contains(&media_type)
}
