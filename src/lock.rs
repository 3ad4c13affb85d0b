//! Lock file management for single-instance enforcement.
//!
//! A PID-bearing lock file in the runtime directory ensures only one duskr
//! daemon runs per session, and lets the `reload` command find the running
//! instance to signal.

use anyhow::{Context, Result, bail};
use fs2::FileExt;
use std::fs::File;
use std::io::{Seek, SeekFrom, Write};

/// Path of the lock file in the runtime directory.
pub fn lock_path() -> String {
    let runtime_dir = std::env::var("XDG_RUNTIME_DIR").unwrap_or_else(|_| "/tmp".to_string());
    format!("{runtime_dir}/duskr.lock")
}

/// Acquire an exclusive lock for this process.
///
/// # Returns
/// - `Ok(Some((lock_file, lock_path)))` if the lock was acquired
/// - `Ok(None)` if another instance already holds it
pub fn acquire_lock() -> Result<Option<(File, String)>> {
    let path = lock_path();

    // Open without truncating so a concurrent holder's PID survives
    let mut lock_file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&path)
        .with_context(|| format!("Failed to open lock file {path}"))?;

    match lock_file.try_lock_exclusive() {
        Ok(()) => {
            lock_file.set_len(0)?;
            lock_file.seek(SeekFrom::Start(0))?;
            writeln!(&lock_file, "{}", std::process::id())?;
            lock_file.flush()?;
            Ok(Some((lock_file, path)))
        }
        Err(_) => Ok(None),
    }
}

/// Release the lock and remove the lock file.
pub fn release_lock(lock_file: File, path: &str) {
    let _ = fs2::FileExt::unlock(&lock_file);
    drop(lock_file);
    let _ = std::fs::remove_file(path);
}

/// PID of the running duskr instance, if any.
///
/// Reads the PID from the lock file and verifies the process still exists;
/// a stale file (dead PID) is treated as no instance.
pub fn get_running_pid() -> Result<u32> {
    let path = lock_path();
    let contents =
        std::fs::read_to_string(&path).context("No duskr lock file found - is the daemon running?")?;

    let pid: u32 = contents
        .lines()
        .next()
        .unwrap_or_default()
        .trim()
        .parse()
        .context("Lock file does not contain a valid PID")?;

    let proc_path = format!("/proc/{pid}");
    if !std::path::Path::new(&proc_path).exists() {
        bail!("Stale lock file: process {pid} is no longer running");
    }

    Ok(pid)
}
