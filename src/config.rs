use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// External configuration injected into the session at construction: the
/// static edit-lock passphrase and an optional override for the store
/// location. Unknown or missing fields fall back to defaults so old config
/// files keep loading.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_passphrase")]
    pub passphrase: String,
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

fn default_passphrase() -> String {
    String::new()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            passphrase: default_passphrase(),
            data_dir: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("steeltally")
            .join("config.toml")
    }
}
