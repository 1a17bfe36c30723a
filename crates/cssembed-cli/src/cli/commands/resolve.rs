//! `cssembed resolve` – show the absolute URL embed would fetch.

use anyhow::Result;
use cssembed_core::config::CssEmbedConfig;
use cssembed_core::url_model::resolve_url;

pub fn run_resolve(cfg: &CssEmbedConfig, url: &str, base_url: Option<&str>) -> Result<()> {
    println!("{}", resolve_url(url, base_url, &cfg.embed.default_scheme));
    Ok(())
}
