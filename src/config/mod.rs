//! Configuration system for duskr.
//!
//! Settings live in `duskr.toml` under the user config directory
//! (`$XDG_CONFIG_HOME/duskr/duskr.toml`). The file is created with commented
//! defaults on first run and watched for changes while the daemon runs.
//!
//! ```toml
//! auto_switch = true       # Switch modes automatically at the times below
//! dark_time = "18:00"      # Time to enter dark mode (HH:MM or HH:MM:SS)
//! light_time = "07:00"     # Time to return to light mode
//! notifications = true     # Desktop notification on each actual switch
//! settle_buffer_ms = 2000  # Extra wait past each boundary before re-checking
//! ```
//!
//! Unparsable time fields never fail the scheduler: they fall back to the
//! 18:00/07:00 defaults with a logged warning. The scheduler itself consumes
//! an immutable [`ScheduleConfig`] snapshot, replaced wholesale on reload.

pub mod loading;
pub mod watcher;

use anyhow::Result;
use chrono::NaiveTime;
use serde::Deserialize;
use std::time::Duration;

use crate::constants::*;

pub use watcher::start_config_watcher;

/// Raw configuration as read from `duskr.toml`. Every field is optional and
/// falls back to a default when missing.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Whether the daemon switches modes automatically.
    pub auto_switch: Option<bool>,
    /// Daily time to enter dark mode, "HH:MM" or "HH:MM:SS".
    pub dark_time: Option<String>,
    /// Daily time to return to light mode.
    pub light_time: Option<String>,
    /// Whether to raise a desktop notification on each actual switch.
    pub notifications: Option<bool>,
    /// Override for the settle buffer added to every boundary wait.
    pub settle_buffer_ms: Option<u64>,
}

impl Config {
    /// Load configuration from the default location, creating a commented
    /// default file on first run.
    pub fn load() -> Result<Self> {
        loading::load()
    }

    pub fn notifications_enabled(&self) -> bool {
        self.notifications.unwrap_or(DEFAULT_NOTIFICATIONS)
    }

    /// Resolve this raw config into the scheduler's immutable snapshot.
    pub fn schedule(&self) -> ScheduleConfig {
        ScheduleConfig::resolve(self)
    }

    pub fn log_config(&self) {
        let schedule = self.schedule();
        log_block_start!("Loaded configuration");
        log_indented!(
            "Automatic switching: {}",
            if schedule.auto_switch { "enabled" } else { "disabled" }
        );
        log_indented!("Dark from: {}", schedule.dark_time.format("%H:%M:%S"));
        log_indented!("Light from: {}", schedule.light_time.format("%H:%M:%S"));
        log_indented!(
            "Notifications: {}",
            if self.notifications_enabled() { "enabled" } else { "disabled" }
        );
        if let Some(ms) = self.settle_buffer_ms {
            log_indented!("Settle buffer: {}ms", ms);
        }
    }
}

/// Immutable schedule snapshot consumed by the scheduler.
///
/// Replaced wholesale on every reload; never partially mutated. Both time
/// fields are guaranteed valid here - parse failures were already resolved
/// to defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleConfig {
    pub auto_switch: bool,
    pub dark_time: NaiveTime,
    pub light_time: NaiveTime,
    pub settle_buffer: Duration,
}

impl ScheduleConfig {
    pub fn resolve(config: &Config) -> Self {
        Self {
            auto_switch: config.auto_switch.unwrap_or(DEFAULT_AUTO_SWITCH),
            dark_time: resolve_time(config.dark_time.as_deref(), default_dark_time(), "dark_time"),
            light_time: resolve_time(
                config.light_time.as_deref(),
                default_light_time(),
                "light_time",
            ),
            settle_buffer: Duration::from_millis(
                config.settle_buffer_ms.unwrap_or(DEFAULT_SETTLE_BUFFER_MS),
            ),
        }
    }
}

/// Parse a time-of-day in "HH:MM:SS" or "HH:MM" form.
pub fn parse_time_of_day(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

fn resolve_time(raw: Option<&str>, fallback: NaiveTime, field: &str) -> NaiveTime {
    match raw {
        None => fallback,
        Some(s) => match parse_time_of_day(s) {
            Some(time) => time,
            None => {
                log_pipe!();
                log_warning!("Could not parse {field} value '{s}'");
                log_indented!("Using default {}", fallback.format("%H:%M"));
                fallback
            }
        },
    }
}

fn default_dark_time() -> NaiveTime {
    // DEFAULT_DARK_TIME is a valid literal
    parse_time_of_day(DEFAULT_DARK_TIME).unwrap_or_else(|| NaiveTime::from_hms_opt(18, 0, 0).unwrap())
}

fn default_light_time() -> NaiveTime {
    parse_time_of_day(DEFAULT_LIGHT_TIME).unwrap_or_else(|| NaiveTime::from_hms_opt(7, 0, 0).unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(dark: Option<&str>, light: Option<&str>) -> Config {
        Config {
            auto_switch: Some(true),
            dark_time: dark.map(str::to_string),
            light_time: light.map(str::to_string),
            notifications: Some(false),
            settle_buffer_ms: None,
        }
    }

    #[test]
    fn parses_both_time_forms() {
        assert_eq!(
            parse_time_of_day("18:30"),
            NaiveTime::from_hms_opt(18, 30, 0)
        );
        assert_eq!(
            parse_time_of_day("06:15:45"),
            NaiveTime::from_hms_opt(6, 15, 45)
        );
        assert_eq!(parse_time_of_day("25:00"), None);
        assert_eq!(parse_time_of_day("noon"), None);
    }

    #[test]
    fn resolves_valid_times() {
        crate::logger::Log::set_enabled(false);
        let schedule = raw(Some("20:15"), Some("06:45:30")).schedule();
        assert_eq!(schedule.dark_time, NaiveTime::from_hms_opt(20, 15, 0).unwrap());
        assert_eq!(schedule.light_time, NaiveTime::from_hms_opt(6, 45, 30).unwrap());
    }

    #[test]
    fn unparsable_times_fall_back_to_defaults() {
        crate::logger::Log::set_enabled(false);
        let schedule = raw(Some("sunset"), Some("")).schedule();
        assert_eq!(schedule.dark_time, NaiveTime::from_hms_opt(18, 0, 0).unwrap());
        assert_eq!(schedule.light_time, NaiveTime::from_hms_opt(7, 0, 0).unwrap());
    }

    #[test]
    fn missing_fields_use_defaults() {
        crate::logger::Log::set_enabled(false);
        let config = Config {
            auto_switch: None,
            dark_time: None,
            light_time: None,
            notifications: None,
            settle_buffer_ms: None,
        };
        let schedule = config.schedule();
        assert!(schedule.auto_switch);
        assert_eq!(schedule.dark_time, NaiveTime::from_hms_opt(18, 0, 0).unwrap());
        assert_eq!(schedule.light_time, NaiveTime::from_hms_opt(7, 0, 0).unwrap());
        assert_eq!(schedule.settle_buffer, Duration::from_millis(2000));
        assert!(config.notifications_enabled());
    }

    #[test]
    fn settle_buffer_is_overridable() {
        let mut config = raw(None, None);
        config.settle_buffer_ms = Some(500);
        assert_eq!(config.schedule().settle_buffer, Duration::from_millis(500));
    }
}
