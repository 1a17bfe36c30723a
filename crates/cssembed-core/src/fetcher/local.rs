//! Fetching without the network: `file:` paths and inline `data:` URLs.

use url::Url;

use super::{FetchError, FetchedResource};
use crate::url_model::{decode_data_url, mime_type_for};

/// Read a `file:` URL from disk. Content type comes from the extension.
pub(crate) fn read_file(url: &Url) -> Result<FetchedResource, FetchError> {
    let path = url
        .to_file_path()
        .map_err(|()| FetchError::InvalidUrl(url.to_string()))?;
    let content = std::fs::read(&path)?;
    let content_type = mime_type_for(url.path()).map(str::to_string);
    Ok(FetchedResource::new(content, content_type))
}

/// Decode a `data:` URL in place.
pub(crate) fn read_data_url(url: &str) -> Result<FetchedResource, FetchError> {
    let decoded = decode_data_url(url)?;
    let content_type = (!decoded.media_type.is_empty()).then_some(decoded.media_type);
    Ok(FetchedResource::new(decoded.bytes, content_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_file_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dot.png");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(&[0x89, b'P', b'N', b'G']).unwrap();
        f.flush().unwrap();

        let url = Url::from_file_path(&path).unwrap();
        let r = read_file(&url).unwrap();
        assert_eq!(r.content, vec![0x89, b'P', b'N', b'G']);
        assert_eq!(r.content_type.as_deref(), Some("image/png"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let url = Url::from_file_path(dir.path().join("missing.woff")).unwrap();
        assert!(matches!(read_file(&url), Err(FetchError::Io(_))));
    }

    #[test]
    fn data_url_media_type_reported() {
        let r = read_data_url("data:image/gif;base64,R0lG").unwrap();
        assert_eq!(r.content, b"GIF");
        assert_eq!(r.content_type.as_deref(), Some("image/gif"));

        let r = read_data_url("data:,plain").unwrap();
        assert_eq!(r.content, b"plain");
        assert!(r.content_type.is_none());
    }
}
