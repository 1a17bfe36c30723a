use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::url_model::DEFAULT_SCHEME;

/// Knobs for one embedding run (also the `[embed]` section of config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedOptions {
    /// Keep only this `format(...)` alternative in multi-format `src:` declarations.
    pub preferred_font_format: Option<String>,
    /// Append a timestamp query to HTTP fetches.
    pub cache_bust: bool,
    /// `data:` URL whose payload stands in for resources that fail to fetch.
    pub image_placeholder: Option<String>,
    /// Scheme for protocol-relative URLs when there is no base URL.
    pub default_scheme: String,
    /// Extra request headers for HTTP fetches.
    pub headers: HashMap<String, String>,
}

impl Default for EmbedOptions {
    fn default() -> Self {
        Self {
            preferred_font_format: None,
            cache_bust: false,
            image_placeholder: None,
            default_scheme: DEFAULT_SCHEME.to_string(),
            headers: HashMap::new(),
        }
    }
}
