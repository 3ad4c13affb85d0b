//! Mode-change notifications.
//!
//! The scheduler raises a notification only after a confirmed, successful
//! mode switch. The concrete notifier sends a best-effort desktop
//! notification through `org.freedesktop.Notifications`; failures are logged
//! and never affect scheduling.

use std::collections::HashMap;
use zbus::blocking::Connection;

use crate::mode::Mode;

/// Capability the scheduler raises change notifications through.
pub trait ModeChangeNotifier {
    fn notify(&mut self, mode: Mode);
}

/// No-op notifier used when notifications are disabled in the config.
pub struct NullNotifier;

impl ModeChangeNotifier for NullNotifier {
    fn notify(&mut self, _mode: Mode) {}
}

#[zbus::proxy(
    interface = "org.freedesktop.Notifications",
    default_service = "org.freedesktop.Notifications",
    default_path = "/org/freedesktop/Notifications"
)]
trait Notifications {
    #[allow(clippy::too_many_arguments)]
    fn notify(
        &self,
        app_name: &str,
        replaces_id: u32,
        app_icon: &str,
        summary: &str,
        body: &str,
        actions: Vec<&str>,
        hints: HashMap<&str, zbus::zvariant::Value<'_>>,
        expire_timeout: i32,
    ) -> zbus::Result<u32>;
}

/// Desktop notifier over the session bus.
pub struct DesktopNotifier {
    connection: Option<Connection>,
}

impl DesktopNotifier {
    /// Connect to the session bus. A missing bus is tolerated; the notifier
    /// then silently does nothing.
    pub fn new() -> Self {
        let connection = match Connection::session() {
            Ok(conn) => Some(conn),
            Err(e) => {
                log_pipe!();
                log_warning!("Could not connect to session D-Bus: {e}");
                log_indented!("Desktop notifications will not be available");
                None
            }
        };
        Self { connection }
    }
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeChangeNotifier for DesktopNotifier {
    fn notify(&mut self, mode: Mode) {
        let Some(connection) = &self.connection else {
            return;
        };

        let icon = match mode {
            Mode::Light => "weather-clear",
            Mode::Dark => "weather-clear-night",
        };
        let summary = format!("{} enabled", mode.display_name());

        let result = NotificationsProxyBlocking::new(connection).and_then(|proxy| {
            proxy.notify(
                "duskr",
                0,
                icon,
                &summary,
                "",
                Vec::new(),
                HashMap::new(),
                -1,
            )
        });

        if let Err(e) = result {
            log_pipe!();
            log_warning!("Failed to send desktop notification: {e}");
        }
    }
}

/// Build the notifier matching the `notifications` config flag.
pub fn create_notifier(enabled: bool) -> Box<dyn ModeChangeNotifier> {
    if enabled {
        Box::new(DesktopNotifier::new())
    } else {
        Box::new(NullNotifier)
    }
}
