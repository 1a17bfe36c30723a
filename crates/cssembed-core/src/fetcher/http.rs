//! HTTP GET fetcher backed by libcurl.
//!
//! Buffers the whole response body in memory (stylesheet resources are small)
//! and reports the final response's `Content-Type`.

use std::collections::HashMap;
use std::str;
use std::time::Duration;

use super::{FetchError, FetchedResource};
use crate::retry::{run_with_retry, RetryPolicy};

/// Connection parameters for [`HttpFetcher`].
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub connect_timeout: Duration,
    /// Whole-transfer timeout.
    pub timeout: Duration,
    pub user_agent: String,
    pub max_redirections: u32,
    pub retry: RetryPolicy,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(60),
            user_agent: format!("cssembed/{}", env!("CARGO_PKG_VERSION")),
            max_redirections: 10,
            retry: RetryPolicy::default(),
        }
    }
}

/// Fetches `http:` and `https:` resources.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    settings: HttpSettings,
}

impl HttpFetcher {
    pub fn new(settings: HttpSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &HttpSettings {
        &self.settings
    }

    /// GET `url` with retries. Custom headers are sent as `Name: value`.
    pub fn get(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
    ) -> Result<FetchedResource, FetchError> {
        run_with_retry(&self.settings.retry, || self.get_once(url, headers))
    }

    fn get_once(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
    ) -> Result<FetchedResource, FetchError> {
        let mut body: Vec<u8> = Vec::new();
        let mut header_lines: Vec<String> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(self.settings.max_redirections)?;
        easy.connect_timeout(self.settings.connect_timeout)?;
        easy.timeout(self.settings.timeout)?;
        easy.useragent(&self.settings.user_agent)?;

        let mut list = curl::easy::List::new();
        for (k, v) in headers {
            list.append(&format!("{}: {}", k.trim(), v.trim()))?;
        }
        if !headers.is_empty() {
            easy.http_headers(list)?;
        }

        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    header_lines.push(s.trim_end().to_string());
                }
                true
            })?;
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(FetchError::Http(code));
        }

        tracing::debug!("GET {} -> {} ({} bytes)", url, code, body.len());
        Ok(FetchedResource::new(body, parse_content_type(&header_lines)))
    }
}

/// `Content-Type` of the last response in a (possibly redirected) header stream.
fn parse_content_type(lines: &[String]) -> Option<String> {
    let mut content_type = None;
    for line in lines {
        let line = line.trim();
        if line.starts_with("HTTP/") {
            // New response after a redirect; earlier headers no longer apply.
            content_type = None;
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-type") {
                let value = value.trim();
                if !value.is_empty() {
                    content_type = Some(value.to_string());
                }
            }
        }
    }
    content_type
}
