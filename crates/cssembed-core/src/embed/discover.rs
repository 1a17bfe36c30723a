//! Discovery of `url(...)` references in CSS text.

use lazy_static::lazy_static;
use regex::Regex;

use crate::url_model::is_data_url;

lazy_static! {
    /// `url(x)`, `url('x')` or `url("x")`; the payload never contains a quote.
    static ref URL_RE: Regex =
        Regex::new(r#"url\((?:"([^'"]+?)"|'([^'"]+?)'|([^'"]+?))\)"#).expect("url() pattern");
}

/// True if the CSS text contains at least one `url(...)` reference.
pub fn should_embed(css: &str) -> bool {
    URL_RE.is_match(css)
}

/// Every `url(...)` payload in source order, skipping ones that are already `data:` URLs.
///
/// Duplicates are kept; each occurrence is embedded on its own.
pub fn parse_urls(css: &str) -> Vec<String> {
    URL_RE
        .captures_iter(css)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3)))
        .map(|m| m.as_str())
        .filter(|url| !is_data_url(url))
        .map(str::to_string)
        .collect()
}
