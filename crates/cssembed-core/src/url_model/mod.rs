//! URL modeling for resource embedding.
//!
//! Resolves `url(...)` payloads against a stylesheet base, infers MIME types
//! from URL extensions, and builds/decodes `data:` URLs.

mod data_url;
mod mime;
mod resolve;

pub use data_url::{decode_data_url, is_data_url, to_data_url, DataUrlError, DecodedDataUrl};
pub use mime::{extension, mime_type_for};
pub use resolve::{resolve_url, DEFAULT_SCHEME};

/// Picks the MIME type for an embedded resource.
///
/// The URL extension wins; otherwise the fetcher-reported content type is
/// used. Returns an empty string when neither is known.
///
/// # Examples
///
/// - `select_mime_type("a/b.png", Some("text/plain"))` → `"image/png"`
/// - `select_mime_type("a/b", Some("image/avif"))` → `"image/avif"`
pub fn select_mime_type(resource_url: &str, reported: Option<&str>) -> String {
    mime_type_for(resource_url)
        .map(str::to_string)
        .or_else(|| reported.map(|s| s.trim().to_string()))
        .unwrap_or_default()
}
