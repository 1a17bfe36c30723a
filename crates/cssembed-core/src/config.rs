use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::embed::EmbedOptions;
use crate::fetcher::HttpSettings;
use crate::retry::RetryPolicy;

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per resource (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.25 = 250ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_secs: 0.25,
            max_delay_secs: 5,
        }
    }
}

/// Global configuration loaded from `~/.config/cssembed/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CssEmbedConfig {
    /// Seconds to wait for a TCP/TLS connection per resource.
    pub connect_timeout_secs: u64,
    /// Seconds allowed for a whole resource transfer.
    pub timeout_secs: u64,
    /// User-Agent sent with HTTP requests.
    pub user_agent: String,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
    /// Default embedding options; CLI flags override these.
    #[serde(default)]
    pub embed: EmbedOptions,
}

impl Default for CssEmbedConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 60,
            user_agent: format!("cssembed/{}", env!("CARGO_PKG_VERSION")),
            retry: None,
            embed: EmbedOptions::default(),
        }
    }
}

impl CssEmbedConfig {
    /// Retry policy from the `[retry]` section, or the built-in default.
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
            .as_ref()
            .map(RetryPolicy::from)
            .unwrap_or_default()
    }

    /// HTTP settings for the default fetcher.
    pub fn http_settings(&self) -> HttpSettings {
        HttpSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            timeout: Duration::from_secs(self.timeout_secs),
            user_agent: self.user_agent.clone(),
            retry: self.retry_policy(),
            ..HttpSettings::default()
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("cssembed")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<CssEmbedConfig> {
    load_or_init_at(&config_path()?)
}

/// Like [`load_or_init`] but for an explicit path (used by `--config` and tests).
pub fn load_or_init_at(path: &Path) -> Result<CssEmbedConfig> {
    if !path.exists() {
        let default_cfg = CssEmbedConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: CssEmbedConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = CssEmbedConfig::default();
        assert_eq!(cfg.connect_timeout_secs, 15);
        assert_eq!(cfg.timeout_secs, 60);
        assert!(cfg.user_agent.starts_with("cssembed/"));
        assert!(cfg.embed.preferred_font_format.is_none());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = CssEmbedConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: CssEmbedConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.connect_timeout_secs, cfg.connect_timeout_secs);
        assert_eq!(parsed.timeout_secs, cfg.timeout_secs);
        assert_eq!(parsed.user_agent, cfg.user_agent);
        assert_eq!(parsed.embed.default_scheme, cfg.embed.default_scheme);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            connect_timeout_secs = 5
            timeout_secs = 20
            user_agent = "renderer/2"

            [embed]
            preferred_font_format = "woff2"
            cache_bust = true

            [embed.headers]
            Authorization = "Bearer xyz"

            [retry]
            max_attempts = 4
            base_delay_secs = 0.5
            max_delay_secs = 8
        "#;
        let cfg: CssEmbedConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.connect_timeout_secs, 5);
        assert_eq!(cfg.user_agent, "renderer/2");
        assert_eq!(cfg.embed.preferred_font_format.as_deref(), Some("woff2"));
        assert!(cfg.embed.cache_bust);
        assert_eq!(
            cfg.embed.headers.get("Authorization").map(String::as_str),
            Some("Bearer xyz")
        );
        assert_eq!(cfg.embed.default_scheme, "https");

        let retry = cfg.retry_policy();
        assert_eq!(retry.max_attempts, 4);
        assert_eq!(retry.max_delay, Duration::from_secs(8));

        let http = cfg.http_settings();
        assert_eq!(http.connect_timeout, Duration::from_secs(5));
        assert_eq!(http.timeout, Duration::from_secs(20));
    }

    #[test]
    fn load_or_init_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = load_or_init_at(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.timeout_secs, 60);

        let again = load_or_init_at(&path).unwrap();
        assert_eq!(again.user_agent, cfg.user_agent);
    }

    #[test]
    fn load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "timeout_secs = \"soon\"").unwrap();
        assert!(load_or_init_at(&path).is_err());
    }

    #[test]
    fn huge_retry_delay_is_capped() {
        let body = |delay: &str| {
            format!(
                "connect_timeout_secs = 5\ntimeout_secs = 20\nuser_agent = \"t\"\n\n\
                 [retry]\nmax_attempts = 2\nbase_delay_secs = {delay}\nmax_delay_secs = 3\n"
            )
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, body("1e300")).unwrap();
        let cfg = load_or_init_at(&path).unwrap();
        assert_eq!(cfg.http_settings().retry.base_delay, Duration::from_secs(3));

        let cfg: CssEmbedConfig = toml::from_str(&body("inf")).unwrap();
        assert_eq!(cfg.retry_policy().base_delay, Duration::from_secs(3));
    }
}
