//! `cssembed urls` – list the references embed would fetch.

use anyhow::Result;
use cssembed_core::embed::parse_urls;
use std::path::Path;

use super::io::read_input;

pub async fn run_urls(input: Option<&Path>, json: bool) -> Result<()> {
    let css = read_input(input).await?;
    let urls = parse_urls(&css);
    if json {
        println!("{}", serde_json::to_string_pretty(&urls)?);
    } else {
        for url in urls {
            println!("{url}");
        }
    }
    Ok(())
}
