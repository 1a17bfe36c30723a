//! `cssembed embed` – inline every url(...) resource of a stylesheet.

use anyhow::{Context, Result};
use clap::Args;
use cssembed_core::config::CssEmbedConfig;
use cssembed_core::fetcher::{DefaultFetcher, HttpFetcher};
use cssembed_core::retry::RetryPolicy;
use cssembed_core::{embed_resources, EmbedOptions};
use std::path::PathBuf;
use std::time::Instant;

use super::io::{base_url_for, parse_header, read_input, write_output};

#[derive(Debug, Args)]
pub struct EmbedArgs {
    /// Stylesheet path; stdin when absent or "-".
    pub input: Option<PathBuf>,

    /// Output path; stdout when absent or "-".
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Base URL for relative url(...) references (default: the input file's location).
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Keep only this format in multi-format @font-face sources (e.g. woff2).
    #[arg(long, value_name = "FORMAT")]
    pub font_format: Option<String>,

    /// Append a timestamp query to HTTP fetches.
    #[arg(long)]
    pub cache_bust: bool,

    /// data: URL embedded in place of resources that fail to fetch.
    #[arg(long, value_name = "DATA_URL")]
    pub placeholder: Option<String>,

    /// Extra request header, repeatable.
    #[arg(short = 'H', long = "header", value_name = "NAME: VALUE")]
    pub headers: Vec<String>,

    /// Fail fast instead of retrying throttled or flaky hosts.
    #[arg(long)]
    pub no_retry: bool,
}

impl EmbedArgs {
    /// Config defaults overridden by the flags that were given.
    pub fn options(&self, defaults: &EmbedOptions) -> Result<EmbedOptions> {
        let mut options = defaults.clone();
        if let Some(format) = &self.font_format {
            options.preferred_font_format = Some(format.clone());
        }
        if self.cache_bust {
            options.cache_bust = true;
        }
        if let Some(placeholder) = &self.placeholder {
            options.image_placeholder = Some(placeholder.clone());
        }
        for raw in &self.headers {
            let (name, value) = parse_header(raw)?;
            options.headers.insert(name, value);
        }
        Ok(options)
    }
}

pub async fn run_embed(cfg: &CssEmbedConfig, args: EmbedArgs) -> Result<()> {
    let options = args.options(&cfg.embed)?;
    let css = read_input(args.input.as_deref()).await?;
    let base_url = base_url_for(args.base_url.as_deref(), args.input.as_deref())?;

    let mut http = cfg.http_settings();
    if args.no_retry {
        http.retry = RetryPolicy::no_retry();
    }
    let fetcher = DefaultFetcher::new(HttpFetcher::new(http));

    let started = Instant::now();
    let input_len = css.len();
    let out = tokio::task::spawn_blocking(move || {
        embed_resources(&css, base_url.as_deref(), &options, &fetcher)
    })
    .await
    .context("embed task failed")?;
    tracing::info!(
        "embedded stylesheet in {:?}: {} -> {} bytes",
        started.elapsed(),
        input_len,
        out.len()
    );

    write_output(args.output.as_deref(), &out).await
}
