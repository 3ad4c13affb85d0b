//! Main application entry point and high-level flow coordination.
//!
//! Parses the command line, dispatches subcommands, and for the default
//! action wires the daemon together: single-instance lock, configuration,
//! signal handling, D-Bus/timerfd monitors, config watcher, mode store,
//! scheduler, and finally the serialized main loop.

use anyhow::Result;
use std::sync::Arc;

use duskr::args::{CliAction, ParsedArgs, display_help, display_version};
use duskr::config::{self, Config};
use duskr::core::scheduler::Scheduler;
use duskr::core::Daemon;
use duskr::signals::setup_signal_handler;
use duskr::time_source::SystemTimeSource;
use duskr::{
    commands, dbus, lock, log_block_start, log_end, log_indented, log_pipe, log_version,
    log_warning, notification, store,
};

fn main() -> Result<()> {
    let args = ParsedArgs::parse(std::env::args().skip(1));

    match args.action {
        CliAction::ShowHelp => {
            display_help();
            Ok(())
        }
        CliAction::ShowVersion => {
            display_version();
            Ok(())
        }
        CliAction::ShowHelpDueToError => {
            display_help();
            std::process::exit(1);
        }
        CliAction::Status { debug_enabled } => commands::status::handle_status_command(debug_enabled),
        CliAction::Toggle { debug_enabled } => commands::toggle::handle_toggle_command(debug_enabled),
        CliAction::Reload { debug_enabled } => commands::reload::handle_reload_command(debug_enabled),
        CliAction::Run { debug_enabled } => run_daemon(debug_enabled),
    }
}

/// Bring up the daemon and run until shutdown.
fn run_daemon(debug_enabled: bool) -> Result<()> {
    log_version!();

    let Some((lock_file, lock_path)) = lock::acquire_lock()? else {
        log_pipe!();
        log_warning!("duskr is already running");
        log_indented!("Use 'duskr reload' to apply configuration changes");
        log_end!();
        return Ok(());
    };

    let config = Config::load()?;
    config.log_config();

    let signal_state = setup_signal_handler(debug_enabled)?;

    // Out-of-band triggers: clock changes, sleep/resume, config file edits.
    dbus::start_event_monitors(signal_state.signal_sender.clone(), debug_enabled);
    if let Err(e) = config::start_config_watcher(signal_state.signal_sender.clone(), debug_enabled) {
        log_pipe!();
        log_warning!("Config hot-reload unavailable: {e}");
        log_indented!("Use 'duskr reload' after editing the config");
    }

    let store = store::detect_store()?;
    log_block_start!("Using {} mode store", store.name());

    let notifier = notification::create_notifier(config.notifications_enabled());
    let scheduler = Scheduler::new(
        config.schedule(),
        store,
        notifier,
        Arc::new(SystemTimeSource),
    );

    let result = Daemon::new(scheduler, signal_state, debug_enabled).execute();

    lock::release_lock(lock_file, &lock_path);
    result
}
