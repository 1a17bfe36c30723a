//! `cssembed mime` – MIME type from a URL's extension.

use anyhow::{bail, Result};
use cssembed_core::url_model::{extension, mime_type_for};

pub fn run_mime(url: &str) -> Result<()> {
    match mime_type_for(url) {
        Some(mime) => println!("{mime}"),
        None => bail!("no MIME type known for extension {:?}", extension(url)),
    }
    Ok(())
}
