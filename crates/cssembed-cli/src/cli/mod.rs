//! CLI for cssembed.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cssembed_core::config;
use std::path::PathBuf;

use commands::{run_embed, run_mime, run_resolve, run_urls, EmbedArgs};

/// Top-level CLI for cssembed.
#[derive(Debug, Parser)]
#[command(name = "cssembed")]
#[command(about = "Inline CSS url() resources as data URLs", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/cssembed/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Replace url(...) references in a stylesheet with data URLs.
    Embed(EmbedArgs),

    /// List the url(...) references that would be embedded.
    Urls {
        /// Stylesheet path; stdin when absent or "-".
        input: Option<PathBuf>,
        /// Print a JSON array instead of one URL per line.
        #[arg(long)]
        json: bool,
    },

    /// Resolve a URL the way embed does before fetching.
    Resolve {
        url: String,
        /// Base URL to resolve relative URLs against.
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,
    },

    /// Print the MIME type inferred from a URL's extension.
    Mime { url: String },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = match &cli.config {
            Some(path) => config::load_or_init_at(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Embed(args) => run_embed(&cfg, args).await?,
            CliCommand::Urls { input, json } => run_urls(input.as_deref(), json).await?,
            CliCommand::Resolve { url, base_url } => {
                run_resolve(&cfg, &url, base_url.as_deref())?
            }
            CliCommand::Mime { url } => run_mime(&url)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
