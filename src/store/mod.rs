//! Mode store abstraction for the desktop's light/dark setting.
//!
//! The scheduler only ever sees the `ModeStore` capability: read which mode
//! is currently active, attempt to set one. The concrete store performs
//! whatever propagation the desktop needs before `set_mode` returns (on
//! GNOME the `gsettings` write itself broadcasts the change to sessions).
//!
//! Store selection follows the desktop environment: GNOME and its
//! derivatives all honor the `org.gnome.desktop.interface` schema.

use anyhow::{Result, bail};
use std::process::Command;

use crate::mode::Mode;

pub mod gsettings;

pub use gsettings::GsettingsStore;

/// Capability contract between the scheduler and the desktop.
pub trait ModeStore {
    /// Whether light mode is currently active. Must be cheap to call
    /// repeatedly and default to light when the setting is unreadable.
    fn is_light(&mut self) -> bool;

    /// Attempt to set the mode; returns whether it succeeded. On success,
    /// external observers can already see the change when this returns.
    fn set_mode(&mut self, dark: bool) -> bool;

    /// Short name for logs ("gsettings", ...).
    fn name(&self) -> &'static str;

    /// Current mode as an enum value (fresh read, never cached).
    fn current_mode(&mut self) -> Mode {
        Mode::from_is_light(self.is_light())
    }

    /// Flip to the opposite mode. Returns the new mode on success.
    fn toggle(&mut self) -> Option<Mode> {
        let target = self.current_mode().opposite();
        if self.set_mode(target.is_dark()) {
            Some(target)
        } else {
            None
        }
    }
}

/// Detect the appropriate mode store for the current desktop.
pub fn detect_store() -> Result<Box<dyn ModeStore>> {
    let desktop = std::env::var("XDG_CURRENT_DESKTOP").unwrap_or_default();
    if desktop.to_lowercase().contains("gnome") {
        return Ok(Box::new(GsettingsStore::new()));
    }

    // Cinnamon, Budgie, and others expose the GNOME interface schema too;
    // fall back to gsettings whenever the binary answers.
    if Command::new("gsettings")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
    {
        log_pipe!();
        log_warning!("Unrecognized desktop '{desktop}', falling back to gsettings");
        return Ok(Box::new(GsettingsStore::new()));
    }

    bail!(
        "No supported mode store found for desktop '{desktop}' (gsettings is required). \
         Install glib2/gsettings or run duskr under a GNOME-compatible session."
    )
}
