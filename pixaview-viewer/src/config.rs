use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pixaview_core::SearchConfig;
use serde::{Deserialize, Serialize};

pub const API_KEY_VAR: &str = "PIXAVIEW_API_KEY";
pub const ENDPOINT_VAR: &str = "PIXAVIEW_ENDPOINT";

/// On-disk viewer settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub search: SearchConfig,
    /// Optional JSON file with localized string overrides.
    pub strings: Option<PathBuf>,
}

impl ViewerConfig {
    /// `$CONFIG_DIR/pixaview/config.json`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pixaview").join("config.json"))
    }

    /// Reads the config file, then applies environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        Self::load_from(path.as_deref(), |name| std::env::var(name).ok())
    }

    pub fn load_from(path: Option<&Path>, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = match path {
            Some(path) if path.exists() => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                serde_json::from_str::<ViewerConfig>(&content)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            _ => Self::default(),
        };

        if let Some(key) = env(API_KEY_VAR).filter(|value| !value.trim().is_empty()) {
            config.search.api_key = key;
        }
        if let Some(endpoint) = env(ENDPOINT_VAR).filter(|value| !value.trim().is_empty()) {
            config.search.endpoint = endpoint;
        }

        Ok(config)
    }

    pub fn load_strings(&self) -> Result<Option<String>> {
        self.strings
            .as_deref()
            .map(|path| {
                std::fs::read_to_string(path)
                    .with_context(|| format!("reading strings from {}", path.display()))
            })
            .transpose()
    }
}
