//! Configuration module
//!
//! Resolves the API base URL and selector size from the command line, the
//! environment and ~/.config/ipo-tui/config.json

use {
    anyhow::{Context, Result},
    ipo_api::{DEFAULT_API_URL, LEGACY_API_URL_ENV},
    serde::{Deserialize, Serialize},
    std::path::{Path, PathBuf},
};

/// Number of IPOs listed in the selector when nothing else is configured
pub const DEFAULT_SELECTOR_LIMIT: usize = 10;

/// Contents of the optional config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    /// Base URL of the IPO API
    #[serde(default)]
    pub api_url: Option<String>,
    /// Maximum number of IPOs shown in the selector
    #[serde(default)]
    pub selector_limit: Option<usize>,
}

impl FileConfig {
    /// Get the config directory path
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ipo-tui")
    }

    /// Get the default config file path
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.json")
    }

    /// Load the config file at `path`. A missing file is not an error.
    pub fn load_from(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(Some(config))
    }
}

/// Where the API URL came from, shown in the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlSource {
    CommandLine,
    LegacyEnv,
    ConfigFile,
    Default,
}

impl UrlSource {
    pub fn label(&self) -> &'static str {
        match self {
            UrlSource::CommandLine => "flag/env",
            UrlSource::LegacyEnv => LEGACY_API_URL_ENV,
            UrlSource::ConfigFile => "config",
            UrlSource::Default => "default",
        }
    }
}

/// Fully resolved settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub url_source: UrlSource,
    pub selector_limit: usize,
}

impl Settings {
    /// Resolve settings in priority order: `--api-url` / `IPO_API_URL`
    /// (clap fills both into `cli_url`), then `VITE_API_URL`, then the
    /// config file, then the local default.
    pub fn resolve(
        cli_url: Option<String>,
        cli_limit: Option<usize>,
        legacy_env_url: Option<String>,
        file: Option<&FileConfig>,
    ) -> Self {
        let non_empty = |s: Option<String>| s.filter(|s| !s.trim().is_empty());

        let (api_url, url_source) = if let Some(url) = non_empty(cli_url) {
            (url, UrlSource::CommandLine)
        } else if let Some(url) = non_empty(legacy_env_url) {
            (url, UrlSource::LegacyEnv)
        } else if let Some(url) = non_empty(file.and_then(|f| f.api_url.clone())) {
            (url, UrlSource::ConfigFile)
        } else {
            (DEFAULT_API_URL.to_string(), UrlSource::Default)
        };

        let selector_limit = cli_limit
            .or_else(|| file.and_then(|f| f.selector_limit))
            .filter(|limit| *limit > 0)
            .unwrap_or(DEFAULT_SELECTOR_LIMIT);

        Self {
            api_url,
            url_source,
            selector_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(url: Option<&str>, limit: Option<usize>) -> FileConfig {
        FileConfig {
            api_url: url.map(String::from),
            selector_limit: limit,
        }
    }

    #[test]
    fn defaults_without_any_source() {
        let settings = Settings::resolve(None, None, None, None);
        assert_eq!(settings.api_url, DEFAULT_API_URL);
        assert_eq!(settings.url_source, UrlSource::Default);
        assert_eq!(settings.selector_limit, DEFAULT_SELECTOR_LIMIT);
    }

    #[test]
    fn command_line_wins_over_everything() {
        let cfg = file(Some("http://file:1"), Some(3));
        let settings = Settings::resolve(
            Some("http://cli:1".into()),
            Some(5),
            Some("http://vite:1".into()),
            Some(&cfg),
        );
        assert_eq!(settings.api_url, "http://cli:1");
        assert_eq!(settings.url_source, UrlSource::CommandLine);
        assert_eq!(settings.selector_limit, 5);
    }

    #[test]
    fn legacy_env_then_file() {
        let cfg = file(Some("http://file:1"), Some(3));
        let settings = Settings::resolve(None, None, Some("http://vite:1".into()), Some(&cfg));
        assert_eq!(settings.api_url, "http://vite:1");
        assert_eq!(settings.url_source, UrlSource::LegacyEnv);
        assert_eq!(settings.selector_limit, 3);

        let settings = Settings::resolve(None, None, Some("  ".into()), Some(&cfg));
        assert_eq!(settings.api_url, "http://file:1");
        assert_eq!(settings.url_source, UrlSource::ConfigFile);
    }

    #[test]
    fn zero_limit_falls_back_to_default() {
        let settings = Settings::resolve(None, Some(0), None, None);
        assert_eq!(settings.selector_limit, DEFAULT_SELECTOR_LIMIT);
    }

    #[test]
    fn missing_config_file_is_none() {
        let path = std::env::temp_dir().join("ipo-tui-does-not-exist/config.json");
        assert!(FileConfig::load_from(&path).expect("missing is ok").is_none());
    }

    #[test]
    fn config_file_round_trip() {
        let dir = std::env::temp_dir().join(format!("ipo-tui-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("create dir");
        let path = dir.join("config.json");
        std::fs::write(&path, r#"{"api_url": "http://10.0.0.2:8000", "selector_limit": 4}"#)
            .expect("write config");

        let cfg = FileConfig::load_from(&path)
            .expect("should parse")
            .expect("should exist");
        assert_eq!(cfg.api_url.as_deref(), Some("http://10.0.0.2:8000"));
        assert_eq!(cfg.selector_limit, Some(4));

        std::fs::write(&path, "{not json").expect("write config");
        assert!(FileConfig::load_from(&path).is_err());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
