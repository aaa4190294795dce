//! Swatch Configuration

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::ColorCode;

/// Page configuration options
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Id of the element the boxes are appended to
    pub container_id: String,

    /// Palette codes, one box each, in display order
    pub colors: Vec<ColorCode>,

    /// Palette stylesheet; the bundled palette when unset
    pub stylesheet: Option<PathBuf>,

    /// Label boxes with hex (`#RRGGBB`) instead of `rgb(...)`
    pub hex: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            container_id: "app".to_string(),
            colors: vec![50, 100, 200, 300, 400, 500, 600, 700, 800, 900],
            stylesheet: None,
            hex: true,
        }
    }
}

impl Config {
    /// Parse a TOML document; missing keys take their defaults
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

/// Configuration loading error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
