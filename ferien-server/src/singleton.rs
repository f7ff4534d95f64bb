//! At most one ferien-server per port and user.
//!
//! The lock file is `<runtime dir>/ferienplaner/server-<port>.lock` and holds
//! the pid of the process that owns it.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Releases the lock when dropped.
pub struct LockGuard {
    _file: File,
}

fn lock_dir() -> Result<PathBuf> {
    let base = dirs::runtime_dir()
        .or_else(dirs::cache_dir)
        .ok_or_else(|| anyhow::anyhow!("Could not determine runtime directory"))?;
    Ok(base.join("ferienplaner"))
}

/// Lock `port` for this process, failing if another server already serves it.
pub fn acquire_lock(port: u16) -> Result<LockGuard> {
    acquire_lock_in(&lock_dir()?, port)
}

fn acquire_lock_in(dir: &Path, port: u16) -> Result<LockGuard> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create lock directory {}", dir.display()))?;
    let path = dir.join(format!("server-{port}.lock"));

    // Not truncated before locking: the pid inside belongs to the holder.
    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(&path)
        .context("Failed to open lock file")?;

    if file.try_lock_exclusive().is_err() {
        let holder = fs::read_to_string(&path).unwrap_or_default();
        let holder = match holder.trim() {
            "" => "another process".to_string(),
            pid => format!("pid {pid}"),
        };
        anyhow::bail!(
            "Port {port} is already served by ferien-server ({holder}).\n\
            If no server is running, remove: {}",
            path.display()
        );
    }

    file.set_len(0)?;
    write!(file, "{}", std::process::id())?;
    file.flush()?;

    Ok(LockGuard { _file: file })
}
