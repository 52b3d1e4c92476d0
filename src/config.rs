use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const API_BASE_URL_ENV: &str = "UNILINK_API_BASE_URL";
pub const DEFAULT_CONFIG_FILE: &str = "unilink.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_base_url: String,
    pub session_file: PathBuf,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".to_string(),
            session_file: PathBuf::from(".unilink/session.json"),
            request_timeout_secs: 30,
        }
    }
}

impl Settings {
    /// Reads settings from `path`; a missing file yields the defaults.
    /// The API base URL can be overridden through `UNILINK_API_BASE_URL`.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let mut settings = match fs::read_to_string(path) {
            Ok(raw) => Self::parse(&raw)
                .with_context(|| format!("Failed to parse config file {:?}", path))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(?path, "No config file found, using defaults.");
                Self::default()
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read config file {:?}", path));
            }
        };
        if let Ok(url) = std::env::var(API_BASE_URL_ENV) {
            settings.apply_api_override(Some(url));
        }
        debug!(api_base_url = %settings.api_base_url, "Loaded settings.");
        Ok(settings)
    }

    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn apply_api_override(&mut self, url: Option<String>) {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.api_base_url = url;
        }
    }
}
