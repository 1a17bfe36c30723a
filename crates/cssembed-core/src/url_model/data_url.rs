//! `data:` URL recognition, encoding and decoding (RFC 2397).

use base64::Engine;
use thiserror::Error;

const DATA_URL_PREFIX: &str = "data:";

/// Why a `data:` URL could not be decoded.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DataUrlError {
    #[error("URL does not start with 'data:'")]
    NotDataUrl,
    #[error("missing comma in data URL")]
    MissingComma,
    #[error("invalid base64 payload: {0}")]
    Base64(String),
    #[error("invalid percent-escape in data URL")]
    PercentEscape,
}

/// Decoded payload and declared media type of a `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedDataUrl {
    pub bytes: Vec<u8>,
    /// Media type as declared (without the `;base64` flag); empty if omitted.
    pub media_type: String,
}

/// True if `url` is already an inlined `data:` URL.
pub fn is_data_url(url: &str) -> bool {
    url.starts_with(DATA_URL_PREFIX)
}

/// Builds `data:<mime>;base64,<payload>` from raw bytes.
pub fn to_data_url(content: &[u8], mime_type: &str) -> String {
    let payload = base64::engine::general_purpose::STANDARD.encode(content);
    format!("{DATA_URL_PREFIX}{mime_type};base64,{payload}")
}

/// Decodes a `data:` URL into bytes and its declared media type.
pub fn decode_data_url(url: &str) -> Result<DecodedDataUrl, DataUrlError> {
    let rest = url
        .strip_prefix(DATA_URL_PREFIX)
        .ok_or(DataUrlError::NotDataUrl)?;
    let (metadata, data) = rest.split_once(',').ok_or(DataUrlError::MissingComma)?;

    let mut is_base64 = false;
    let mut params: Vec<&str> = Vec::new();
    let mut parts = metadata.split(';');
    let media = parts.next().unwrap_or("").trim();
    for param in parts {
        let param = param.trim();
        if param.eq_ignore_ascii_case("base64") {
            is_base64 = true;
        } else if !param.is_empty() {
            params.push(param);
        }
    }

    let mut media_type = media.to_string();
    for p in params {
        media_type.push(';');
        media_type.push_str(p);
    }

    let bytes = if is_base64 {
        decode_base64(data)?
    } else {
        percent_decode(data)?
    };
    Ok(DecodedDataUrl { bytes, media_type })
}

/// Base64 decode, tolerating embedded ASCII whitespace.
fn decode_base64(data: &str) -> Result<Vec<u8>, DataUrlError> {
    let cleaned: Vec<u8> = data.bytes().filter(|b| !b.is_ascii_whitespace()).collect();
    base64::engine::general_purpose::STANDARD
        .decode(cleaned)
        .map_err(|e| DataUrlError::Base64(e.to_string()))
}

/// Percent-decode without treating `+` specially.
fn percent_decode(input: &str) -> Result<Vec<u8>, DataUrlError> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes.get(i + 1..i + 3).ok_or(DataUrlError::PercentEscape)?;
            let hi = (hex[0] as char).to_digit(16);
            let lo = (hex[1] as char).to_digit(16);
            match (hi, lo) {
                (Some(hi), Some(lo)) => out.push(((hi << 4) | lo) as u8),
                _ => return Err(DataUrlError::PercentEscape),
            }
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    Ok(out)
}
