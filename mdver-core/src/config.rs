//! Configuration management for mdver

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub toc: TocConfig,
    pub diff: DiffConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TocConfig {
    pub enabled: bool,
    /// Deepest heading level shown in the outline (1-6)
    pub max_level: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    pub show_unchanged: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub match_start: String,
    pub match_end: String,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_level: 6,
        }
    }
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            show_unchanged: true,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            match_start: "[".to_string(),
            match_end: "]".to_string(),
        }
    }
}

impl Config {
    /// Get the platform-specific config file path
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "mdver")
            .map(|proj_dirs| proj_dirs.config_dir().join("mdver.toml"))
    }

    /// Load configuration from file, falling back to defaults if missing
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                let config = Self::load_from(&path)?;
                log::info!("Loaded config from {}", path.display());
                return Ok(config);
            }
        }

        log::debug!("Using default config");
        Ok(Self::default())
    }

    /// Load from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        // Check config file permissions (Unix only)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let metadata = std::fs::metadata(path)
                .with_context(|| format!("Failed to stat config file: {}", path.display()))?;
            if metadata.permissions().mode() & 0o002 != 0 {
                anyhow::bail!(
                    "Config file {} is world-writable (insecure permissions)",
                    path.display()
                );
            }
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        if !(1..=6).contains(&config.toc.max_level) {
            log::warn!(
                "toc.max_level {} out of range, clamping to 1-6",
                config.toc.max_level
            );
            config.toc.max_level = config.toc.max_level.clamp(1, 6);
        }

        Ok(config)
    }
}
