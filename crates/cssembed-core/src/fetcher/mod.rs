//! Resource fetching for embedding.
//!
//! The embed pipeline only depends on the [`Fetcher`] trait. [`DefaultFetcher`]
//! covers `http(s):` via curl, `file:` from disk and `data:` in place; tests and
//! hosts can pass a closure instead.

mod error;
mod http;
mod local;

pub use error::FetchError;
pub use http::{HttpFetcher, HttpSettings};

use std::time::{SystemTime, UNIX_EPOCH};
use url::Url;

use crate::config::CssEmbedConfig;
use crate::embed::EmbedOptions;
use crate::url_model::decode_data_url;

/// Fetched bytes plus the content type the source reported, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedResource {
    pub content: Vec<u8>,
    pub content_type: Option<String>,
}

impl FetchedResource {
    pub fn new(content: Vec<u8>, content_type: Option<String>) -> Self {
        Self {
            content,
            content_type,
        }
    }
}

// Raw content with no reported type.
impl From<Vec<u8>> for FetchedResource {
    fn from(content: Vec<u8>) -> Self {
        Self::new(content, None)
    }
}

impl From<String> for FetchedResource {
    fn from(content: String) -> Self {
        Self::new(content.into_bytes(), None)
    }
}

impl From<&str> for FetchedResource {
    fn from(content: &str) -> Self {
        Self::new(content.as_bytes().to_vec(), None)
    }
}

/// Turns an absolute URL into bytes.
pub trait Fetcher {
    fn fetch(&self, url: &str, options: &EmbedOptions) -> Result<FetchedResource, FetchError>;
}

impl<F> Fetcher for F
where
    F: Fn(&str) -> Result<FetchedResource, FetchError>,
{
    fn fetch(&self, url: &str, _options: &EmbedOptions) -> Result<FetchedResource, FetchError> {
        self(url)
    }
}

/// Scheme-dispatching fetcher used when the caller does not inject one.
#[derive(Debug, Clone, Default)]
pub struct DefaultFetcher {
    http: HttpFetcher,
}

impl DefaultFetcher {
    pub fn new(http: HttpFetcher) -> Self {
        Self { http }
    }

    pub fn from_config(cfg: &CssEmbedConfig) -> Self {
        Self::new(HttpFetcher::new(cfg.http_settings()))
    }

    fn fetch_by_scheme(
        &self,
        url: &str,
        options: &EmbedOptions,
    ) -> Result<FetchedResource, FetchError> {
        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;
        match parsed.scheme() {
            "http" | "https" => {
                let target = if options.cache_bust {
                    cache_bust(url, unix_millis())
                } else {
                    url.to_string()
                };
                self.http.get(&target, &options.headers)
            }
            "file" => local::read_file(&parsed),
            "data" => local::read_data_url(url),
            other => Err(FetchError::Unsupported(other.to_string())),
        }
    }
}

impl Fetcher for DefaultFetcher {
    fn fetch(&self, url: &str, options: &EmbedOptions) -> Result<FetchedResource, FetchError> {
        match self.fetch_by_scheme(url, options) {
            Ok(resource) => Ok(resource),
            Err(e) => match options.image_placeholder.as_deref() {
                Some(placeholder) => {
                    tracing::warn!("fetch {} failed ({}); using placeholder", url, e);
                    placeholder_resource(placeholder)
                }
                None => Err(e),
            },
        }
    }
}

/// Content substituted for a failed fetch when `image_placeholder` is set.
fn placeholder_resource(placeholder: &str) -> Result<FetchedResource, FetchError> {
    let decoded = decode_data_url(placeholder)?;
    let content_type = (!decoded.media_type.is_empty()).then_some(decoded.media_type);
    Ok(FetchedResource::new(decoded.bytes, content_type))
}

/// Appends a timestamp so intermediaries cannot serve a stale copy.
pub fn cache_bust(url: &str, stamp: u128) -> String {
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}{stamp}")
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}
