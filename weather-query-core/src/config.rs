use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Address of the hosted assistant backend.
pub const DEFAULT_ENDPOINT: &str = "https://weather-query-assistant.onrender.com";

/// Environment variable that overrides the configured endpoint.
pub const ENDPOINT_ENV: &str = "WEATHER_QUERY_ENDPOINT";

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Base address of the remote service, without the `/api/weather` path.
    ///
    /// Example TOML:
    /// endpoint = "http://localhost:8000"
    pub endpoint: Option<String>,
}

impl Config {
    /// The configured endpoint, or the built-in default.
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    /// Validate and store a new endpoint.
    pub fn set_endpoint(&mut self, url: &str) -> Result<()> {
        self.endpoint = Some(normalize_endpoint(url)?);
        Ok(())
    }

    /// Pick the endpoint to use: explicit flag, then environment, then
    /// this config, then the default.
    pub fn resolve_endpoint(&self, flag: Option<&str>, env: Option<&str>) -> Result<String> {
        match flag.or(env) {
            Some(url) => normalize_endpoint(url),
            None => normalize_endpoint(self.endpoint()),
        }
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-query", "weather-query-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    fn from_toml(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        if let Some(url) = &cfg.endpoint {
            normalize_endpoint(url)?;
        }
        Ok(cfg)
    }
}

/// Check that `url` is an absolute http(s) address and strip trailing slashes.
pub fn normalize_endpoint(url: &str) -> Result<String> {
    let trimmed = url.trim().trim_end_matches('/');

    let parsed = Url::parse(trimmed).with_context(|| format!("Invalid endpoint URL '{url}'"))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(anyhow!(
            "Unsupported endpoint scheme '{}' in '{url}'. Use http:// or https://.",
            parsed.scheme()
        ));
    }

    if parsed.host_str().is_none() {
        return Err(anyhow!("Endpoint URL '{url}' has no host"));
    }

    Ok(trimmed.to_string())
}
