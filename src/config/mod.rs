pub mod schema;

pub use schema::DetectorConfig;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Name of the config file inside the home directory.
pub const CONFIG_FILE_NAME: &str = "detector.toml";

/// Default home directory (~/.footprint).
pub fn default_home_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|d| d.home_dir().join(".footprint"))
        .unwrap_or_else(|| PathBuf::from(".footprint"))
}

/// Expand a leading `~` in a user-supplied path.
pub fn resolve_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

/// Load config from the given path, or return defaults.
pub fn load_config(path: &Path) -> Result<DetectorConfig> {
    if path.exists() {
        let contents =
            std::fs::read_to_string(path).context("Failed to read detector config file")?;
        let config: DetectorConfig =
            toml::from_str(&contents).context("Failed to parse detector config (TOML)")?;
        config
            .validate()
            .with_context(|| format!("Invalid detector config at {}", path.display()))?;
        Ok(config)
    } else {
        Ok(DetectorConfig::default())
    }
}

/// Save config to the given path (TOML format).
pub fn save_config(config: &DetectorConfig, path: &Path) -> Result<()> {
    let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents).context("Failed to write config file")?;
    Ok(())
}
