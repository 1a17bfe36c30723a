//! Resolution of `url(...)` payloads against a stylesheet base URL.

use url::Url;

/// Scheme used for protocol-relative URLs (`//host/path`) when no base is known.
pub const DEFAULT_SCHEME: &str = "https";

/// Length of a leading `[A-Za-z]+:` scheme, if any.
fn scheme_len(url: &str) -> Option<usize> {
    let letters = url.bytes().take_while(u8::is_ascii_alphabetic).count();
    if letters > 0 && url.as_bytes().get(letters) == Some(&b':') {
        Some(letters)
    } else {
        None
    }
}

/// Resolves `url` against `base`.
///
/// - URLs with a scheme (`https://`, `data:`, `mailto:`, ...) are returned unchanged.
/// - Protocol-relative URLs get the base's scheme, or `default_scheme` without a base.
/// - Anything else is joined onto the base. Without a usable base it is returned unchanged.
///
/// # Examples
///
/// - `resolve_url("img.png", Some("https://example.com/styles/"), "https")`
///   → `"https://example.com/styles/img.png"`
/// - `resolve_url("//cdn.example.com/a.woff", None, "https")`
///   → `"https://cdn.example.com/a.woff"`
pub fn resolve_url(url: &str, base: Option<&str>, default_scheme: &str) -> String {
    if scheme_len(url).is_some() {
        return url.to_string();
    }

    if url.starts_with("//") {
        let scheme = base
            .and_then(|b| Url::parse(b).ok())
            .map(|b| b.scheme().to_string())
            .unwrap_or_else(|| default_scheme.to_string());
        return format!("{scheme}:{url}");
    }

    let Some(base) = base else {
        return url.to_string();
    };

    match Url::parse(base).and_then(|b| b.join(url)) {
        Ok(resolved) => resolved.to_string(),
        Err(e) => {
            tracing::debug!("cannot resolve {} against {}: {}", url, base, e);
            url.to_string()
        }
    }
}
