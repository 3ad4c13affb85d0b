//! Configuration file location, loading, and default generation.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::Config;

/// Contents written on first run. Mirrors the documented defaults.
const DEFAULT_CONFIG: &str = "\
#[duskr configuration]
auto_switch = true       # Switch modes automatically at the times below
dark_time = \"18:00\"      # Time to enter dark mode (HH:MM or HH:MM:SS)
light_time = \"07:00\"     # Time to return to light mode
notifications = true     # Desktop notification on each actual switch
#settle_buffer_ms = 2000 # Extra wait past each boundary before re-checking
";

/// Path of `duskr.toml` under the user config directory.
pub fn get_config_path() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join("duskr").join("duskr.toml"))
}

/// Load the configuration, creating a commented default file on first run.
pub fn load() -> Result<Config> {
    let path = get_config_path()?;
    if !path.exists() {
        create_default_config(&path)?;
        log_block_start!("Created default configuration at {}", path.display());
    }
    load_from_path(&path)
}

/// Load and parse a specific configuration file.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {} as TOML", path.display()))?;
    Ok(config)
}

/// Write the commented default configuration file.
pub fn create_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write default config to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_parses_and_resolves() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("duskr").join("duskr.toml");

        create_default_config(&path).unwrap();
        let config = load_from_path(&path).unwrap();

        assert_eq!(config.auto_switch, Some(true));
        assert_eq!(config.dark_time.as_deref(), Some("18:00"));
        assert_eq!(config.light_time.as_deref(), Some("07:00"));
        assert_eq!(config.notifications, Some(true));
        // settle_buffer_ms stays commented out by default
        assert_eq!(config.settle_buffer_ms, None);

        let schedule = config.schedule();
        assert!(schedule.auto_switch);
    }

    #[test]
    fn broken_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("duskr.toml");
        std::fs::write(&path, "auto_switch = maybe").unwrap();

        assert!(load_from_path(&path).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(load_from_path(&path).is_err());
    }
}
