//! Pruning of multi-format `@font-face` sources down to one preferred format.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::EmbedOptions;

lazy_static! {
    /// A `src:` declaration made only of `url(...) format(...)` items.
    static ref FONT_SRC_RE: Regex =
        Regex::new(r"src:\s*(?:url\([^)]+\)\s*format\([^)]+\)[,;]\s*)+").expect("font src pattern");
    static ref URL_WITH_FORMAT_RE: Regex = Regex::new(
        r#"url\([^)]+\)\s*format\((?:"([^"']+)"|'([^"']+)'|([^"')]+))\)"#
    )
    .expect("url() format() pattern");
}

/// Rewrites each multi-format `src:` declaration to keep only the
/// `preferred_font_format` alternative, or drops it if none matches.
///
/// Returns the input unchanged when no preferred format is configured.
pub fn filter_preferred_font_format(css: &str, options: &EmbedOptions) -> String {
    let Some(preferred) = options.preferred_font_format.as_deref() else {
        return css.to_string();
    };

    FONT_SRC_RE
        .replace_all(css, |decl: &Captures| {
            let block = &decl[0];
            URL_WITH_FORMAT_RE
                .captures_iter(block)
                .find(|alt| format_name(alt) == Some(preferred))
                .map(|alt| format!("src: {};", &alt[0]))
                .unwrap_or_default()
        })
        .into_owned()
}

/// Quoted names are taken verbatim; a bare name loses surrounding whitespace.
fn format_name<'a>(alt: &Captures<'a>) -> Option<&'a str> {
    alt.get(1)
        .or_else(|| alt.get(2))
        .map(|m| m.as_str())
        .or_else(|| alt.get(3).map(|m| m.as_str().trim()))
}
