//! Default values and tuning constants.

/// Fallback boundary for entering dark mode when the configured value is
/// missing or unparsable.
pub const DEFAULT_DARK_TIME: &str = "18:00";

/// Fallback boundary for returning to light mode.
pub const DEFAULT_LIGHT_TIME: &str = "07:00";

/// Automatic switching is on unless the config says otherwise.
pub const DEFAULT_AUTO_SWITCH: bool = true;

/// Desktop notifications on actual mode changes.
pub const DEFAULT_NOTIFICATIONS: bool = true;

/// Extra wait added to every computed boundary delay so the mode store's
/// backing mechanism has crossed the boundary before we re-evaluate. The
/// value is empirical; `settle_buffer_ms` in the config overrides it.
pub const DEFAULT_SETTLE_BUFFER_MS: u64 = 2000;

/// Lower clamp applied to any computed re-arm delay. Guards against
/// zero-delay re-fire loops under clock skew.
pub const MIN_REARM_DELAY_MS: u64 = 1000;

/// Main loop wake-up interval while automatic switching is disabled and no
/// deadline is armed.
pub const IDLE_POLL_SECS: u64 = 3600;

/// Debounce window for config file change bursts (editors often write a
/// file in several steps).
pub const CONFIG_DEBOUNCE_MS: u64 = 500;
