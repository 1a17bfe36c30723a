//! Inlining of CSS `url(...)` resources as `data:` URLs.
//!
//! Pipeline: skip text without `url(...)`, prune `@font-face` sources to the
//! preferred format, collect non-`data:` URLs, then embed them one at a time,
//! each step rewriting the output of the previous one. A resource that cannot
//! be fetched is left in place as its resolved absolute URL.

mod discover;
mod font_format;
mod options;

pub use discover::{parse_urls, should_embed};
pub use font_format::filter_preferred_font_format;
pub use options::EmbedOptions;

use regex::{Captures, Regex};

use crate::fetcher::{DefaultFetcher, Fetcher};
use crate::url_model::{resolve_url, select_mime_type, to_data_url};

/// Embeds every `url(...)` resource of `css`, fetching sequentially through `fetcher`.
///
/// Never fails: per-resource failures leave the resolved URL in the output.
pub fn embed_resources<F>(
    css: &str,
    base_url: Option<&str>,
    options: &EmbedOptions,
    fetcher: &F,
) -> String
where
    F: Fetcher + ?Sized,
{
    if !should_embed(css) {
        return css.to_string();
    }

    let filtered = filter_preferred_font_format(css, options);
    let urls = parse_urls(&filtered);
    tracing::debug!("{} resource reference(s) to embed", urls.len());

    urls.iter().fold(filtered, |acc, url| {
        embed(&acc, url, base_url, options, fetcher)
    })
}

/// [`embed_resources`] with the scheme-dispatching [`DefaultFetcher`].
pub fn embed_resources_default(css: &str, base_url: Option<&str>, options: &EmbedOptions) -> String {
    embed_resources(css, base_url, options, &DefaultFetcher::default())
}

/// Embeds a single resource: every `url(<resource_url>)` occurrence in `css`
/// becomes `url(<data URL>)`, or `url(<resolved URL>)` if the fetch fails.
pub fn embed<F>(
    css: &str,
    resource_url: &str,
    base_url: Option<&str>,
    options: &EmbedOptions,
    fetcher: &F,
) -> String
where
    F: Fetcher + ?Sized,
{
    let resolved = resolve_url(resource_url, base_url, &options.default_scheme);
    tracing::debug!("embedding {} (resolved {})", resource_url, resolved);

    let replacement = match fetcher.fetch(&resolved, options) {
        Ok(resource) => {
            let mime = select_mime_type(resource_url, resource.content_type.as_deref());
            to_data_url(&resource.content, &mime)
        }
        Err(e) => {
            tracing::warn!("could not embed {}: {}; keeping URL", resolved, e);
            resolved
        }
    };

    replace_url_reference(css, resource_url, &replacement)
}

/// Swaps the payload of every `url(...)` whose payload is exactly `resource_url`.
fn replace_url_reference(css: &str, resource_url: &str, replacement: &str) -> String {
    let pattern = format!(r#"(url\(['"]?)({})(['"]?\))"#, regex::escape(resource_url));
    let re = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(e) => {
            tracing::warn!("cannot build pattern for {}: {}", resource_url, e);
            return css.to_string();
        }
    };
    re.replace_all(css, |caps: &Captures| {
        format!("{}{}{}", &caps[1], replacement, &caps[3])
    })
    .into_owned()
}
