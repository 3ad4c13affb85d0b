//! CLI subcommand implementations.
//!
//! Each subcommand runs in its own short-lived process and talks to the
//! daemon (if any) through the lock file and signals, or directly to the
//! mode store for one-shot operations.

pub mod reload;
pub mod status;
pub mod toggle;
