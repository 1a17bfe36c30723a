//! Stylesheet input/output shared by the commands.

use anyhow::{anyhow, bail, Context, Result};
use std::path::Path;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// Treats `-` the same as no path (stdin/stdout).
fn real_path(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| *p != Path::new("-"))
}

/// Read the stylesheet from `input`, or stdin.
pub(crate) async fn read_input(input: Option<&Path>) -> Result<String> {
    match real_path(input) {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("read {}", path.display())),
        None => {
            let mut css = String::new();
            tokio::io::stdin()
                .read_to_string(&mut css)
                .await
                .context("read stdin")?;
            Ok(css)
        }
    }
}

/// Write `text` to `output`, or stdout.
pub(crate) async fn write_output(output: Option<&Path>, text: &str) -> Result<()> {
    match real_path(output) {
        Some(path) => tokio::fs::write(path, text)
            .await
            .with_context(|| format!("write {}", path.display())),
        None => {
            let mut out = tokio::io::stdout();
            out.write_all(text.as_bytes()).await?;
            out.flush().await?;
            Ok(())
        }
    }
}

/// Base URL for embedding: the explicit one, else the input file's `file://` URL.
pub(crate) fn base_url_for(explicit: Option<&str>, input: Option<&Path>) -> Result<Option<String>> {
    if let Some(base) = explicit {
        return Ok(Some(base.to_string()));
    }
    let Some(path) = real_path(input) else {
        return Ok(None);
    };
    let abs = std::fs::canonicalize(path).with_context(|| format!("resolve {}", path.display()))?;
    let url = url::Url::from_file_path(&abs)
        .map_err(|()| anyhow!("cannot build file URL for {}", abs.display()))?;
    Ok(Some(url.to_string()))
}

/// Parse a `Name: value` request header.
pub(crate) fn parse_header(raw: &str) -> Result<(String, String)> {
    let Some((name, value)) = raw.split_once(':') else {
        bail!("header {:?} is not in 'Name: value' form", raw);
    };
    let name = name.trim();
    if name.is_empty() {
        bail!("header {:?} has an empty name", raw);
    }
    Ok((name.to_string(), value.trim().to_string()))
}
