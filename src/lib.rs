//! # Duskr Library
//!
//! Internal library for the duskr binary.
//!
//! duskr watches the wall clock and flips the desktop between light and dark
//! appearance at two configurable daily boundary times. The library exists to
//! enable testing of the scheduling internals and to keep CLI dispatch
//! (main.rs) separate from application logic.
//!
//! ## Architecture
//!
//! - **Core Logic**: `core` holds the boundary evaluator, the scheduler that
//!   owns the single re-armable deadline, and the daemon loop driving it
//! - **Mode Stores**: `store` abstracts the desktop's light/dark setting
//!   behind the `ModeStore` capability
//! - **Configuration**: `config` for TOML-based settings with hot-reload
//! - **Commands**: `commands` for CLI subcommands (status, toggle, reload)
//! - **Infrastructure**: signal handling, D-Bus/timerfd event monitoring,
//!   desktop notifications, logging, single-instance locking

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

pub mod args;
pub mod commands;
pub mod config;
pub mod constants;
pub mod core;
pub mod dbus;
pub mod lock;
pub mod mode;
pub mod notification;
pub mod signals;
pub mod store;
pub mod time_source;
