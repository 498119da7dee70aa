//! The `collections` query parameter of multi-collection tile endpoints.

use reqwest::Url;
use tracing::warn;

/// Base used to parse templates that carry no scheme or host.
const TEMPLATE_BASE: &str = "file:///";

/// Append a `collections` query parameter to a tile URL template.
///
/// Commas inside an identifier are percent-encoded, the commas separating
/// identifiers are not. The template is returned unchanged when
/// `collections` is empty, and also (with a warning) when the template
/// already addresses a collection endpoint, since the two must not be
/// combined.
pub fn append_collections_query_param(template: &str, collections: &[String]) -> String {
    if collections.is_empty() {
        return template.to_string();
    }

    let mut url = match Url::parse(TEMPLATE_BASE).and_then(|base| base.join(template)) {
        Ok(url) => url,
        Err(e) => {
            warn!(template = %template, error = %e, "Cannot parse tile URL template");
            return template.to_string();
        }
    };

    let is_collection_endpoint = url
        .path_segments()
        .map(|mut segments| segments.any(|s| s == "collections"))
        .unwrap_or(false);
    if is_collection_endpoint {
        warn!(
            template = %template,
            "The \"collections\" query parameter cannot be added to collection endpoints"
        );
        return template.to_string();
    }

    let encoded = collections
        .iter()
        .map(|c| urlencoding::encode(c))
        .collect::<Vec<_>>()
        .join(",");
    url.query_pairs_mut().append_pair("collections", &encoded);

    // The pair encoder escaped our percent signs and separators a second time.
    let query = url.query().unwrap_or_default();
    let query = urlencoding::decode(query)
        .map(|q| q.into_owned())
        .unwrap_or_else(|_| query.to_string());

    let base = template.split('?').next().unwrap_or(template);
    format!("{}?{}", base, query)
}
