//! Mode store backed by GNOME's `gsettings` interface.
//!
//! Reads and writes `org.gnome.desktop.interface color-scheme`. Writing the
//! key is also the propagation mechanism: GSettings broadcasts the change
//! over D-Bus, so every application in the session observes it before the
//! `gsettings` process exits.

use anyhow::{Context, Result, bail};
use std::process::Command;

use super::ModeStore;

const SCHEMA: &str = "org.gnome.desktop.interface";
const COLOR_SCHEME_KEY: &str = "color-scheme";

const DARK_VALUE: &str = "prefer-dark";
const LIGHT_VALUE: &str = "default";

pub struct GsettingsStore;

impl GsettingsStore {
    pub fn new() -> Self {
        Self
    }

    fn read_color_scheme(&self) -> Result<String> {
        let output = Command::new("gsettings")
            .args(["get", SCHEMA, COLOR_SCHEME_KEY])
            .output()
            .context("failed to run gsettings")?;

        if !output.status.success() {
            bail!(
                "gsettings get exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        // gsettings prints GVariant syntax: 'prefer-dark'
        Ok(String::from_utf8_lossy(&output.stdout)
            .trim()
            .trim_matches('\'')
            .to_string())
    }

    fn write_color_scheme(&self, value: &str) -> Result<()> {
        let output = Command::new("gsettings")
            .args(["set", SCHEMA, COLOR_SCHEME_KEY, value])
            .output()
            .context("failed to run gsettings")?;

        if !output.status.success() {
            bail!(
                "gsettings set exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(())
    }
}

impl Default for GsettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeStore for GsettingsStore {
    fn is_light(&mut self) -> bool {
        match self.read_color_scheme() {
            Ok(scheme) => scheme != DARK_VALUE,
            Err(e) => {
                log_pipe!();
                log_warning!("Failed to read color scheme: {e}");
                log_indented!("Assuming light mode");
                true
            }
        }
    }

    fn set_mode(&mut self, dark: bool) -> bool {
        let value = if dark { DARK_VALUE } else { LIGHT_VALUE };
        match self.write_color_scheme(value) {
            Ok(()) => true,
            Err(e) => {
                log_pipe!();
                log_warning!("Failed to set color scheme: {e}");
                false
            }
        }
    }

    fn name(&self) -> &'static str {
        "gsettings"
    }
}
