//! Configuration loading and API endpoint resolution

use crate::error::{Error, Result};
use std::path::PathBuf;

/// Default page size for list requests
pub const DEFAULT_PAGE_LIMIT: u64 = 10;

/// Compiled fallback when nothing else supplies a base URL
const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";

/// Environment variable overriding the API base URL
const BASE_URL_ENV: &str = "MINDLOG_API_URL";

/// Client configuration for the sync layer
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the entries API, without a trailing slash
    pub base_url: String,
    /// Page size used by list operations
    pub page_limit: u64,
}

impl ClientConfig {
    /// Resolve configuration following the priority order:
    /// 1. Command-line argument (highest priority)
    /// 2. Environment variable
    /// 3. TOML config file
    /// 4. Compiled default (fallback)
    pub fn resolve(cli_url: Option<&str>) -> Self {
        let base_url = resolve_base_url(cli_url);
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

fn resolve_base_url(cli_url: Option<&str>) -> String {
    // Priority 1: Command-line argument
    if let Some(url) = cli_url {
        return url.to_string();
    }

    // Priority 2: Environment variable
    if let Ok(url) = std::env::var(BASE_URL_ENV) {
        if !url.is_empty() {
            return url;
        }
    }

    // Priority 3: TOML config file
    if let Ok(config_path) = find_config_file() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(url) = config.get("api_url").and_then(|v| v.as_str()) {
                    tracing::debug!(path = %config_path.display(), "Using API URL from config file");
                    return url.to_string();
                }
            }
        }
    }

    // Priority 4: Compiled default
    DEFAULT_BASE_URL.to_string()
}

/// Locate the user config file for the platform
fn find_config_file() -> Result<PathBuf> {
    let path = dirs::config_dir()
        .map(|d| d.join("mindlog").join("config.toml"))
        .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;

    if path.exists() {
        Ok(path)
    } else {
        Err(Error::Config(format!("Config file not found: {:?}", path)))
    }
}
