use crate::error::PairError;
use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

/// Hidden, so the directory listing never pairs it
pub const LOCK_FILE_NAME: &str = ".pairname.lock";
const STALE_LOCK_TIMEOUT_SECS: u64 = 300; // 5 minutes

/// Marks a target directory as busy while a batch is being renamed.
#[derive(Debug)]
pub struct LockFile {
    path: PathBuf,
    pid: u32,
    timestamp: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}

impl LockFile {
    /// Acquire the lock for `dir`
    pub fn acquire(dir: &Path) -> Result<Self> {
        let lock_path = dir.join(LOCK_FILE_NAME);

        if lock_path.exists() {
            let mut content = String::new();
            File::open(&lock_path)
                .context("Failed to read lock file")?
                .read_to_string(&mut content)
                .context("Failed to read lock file content")?;

            // Format: "pid:timestamp"
            let parts: Vec<&str> = content.trim().split(':').collect();
            if parts.len() == 2 {
                let pid = parts[0].parse::<u32>().unwrap_or(0);
                let timestamp = parts[1].parse::<u64>().unwrap_or(0);

                if now_secs().saturating_sub(timestamp) > STALE_LOCK_TIMEOUT_SECS {
                    fs::remove_file(&lock_path).context("Failed to remove stale lock file")?;
                } else if is_process_running(pid) {
                    return Err(PairError::Locked {
                        pid,
                        path: lock_path,
                    }
                    .into());
                } else {
                    fs::remove_file(&lock_path).context("Failed to remove orphaned lock file")?;
                }
            }
        }

        let pid = process::id();
        let timestamp = now_secs();
        let lock_content = format!("{}:{}", pid, timestamp);

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true) // Fail if file exists (race condition protection)
            .open(&lock_path)
            .with_context(|| format!("Failed to create lock file {}", lock_path.display()))?;

        file.write_all(lock_content.as_bytes())
            .context("Failed to write lock file")?;

        Ok(Self {
            path: lock_path,
            pid,
            timestamp,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release the lock
    pub fn release(self) -> Result<()> {
        if self.path.exists() {
            let mut content = String::new();
            File::open(&self.path)
                .context("Failed to read lock file")?
                .read_to_string(&mut content)
                .context("Failed to read lock file content")?;

            let expected_content = format!("{}:{}", self.pid, self.timestamp);
            if content.trim() == expected_content {
                fs::remove_file(&self.path).context("Failed to remove lock file")?;
            }
        }
        Ok(())
    }
}

impl Drop for LockFile {
    fn drop(&mut self) {
        if self.path.exists() {
            let _ = fs::remove_file(&self.path);
        }
    }
}

#[cfg(unix)]
fn is_process_running(pid: u32) -> bool {
    // Signal 0 only checks that the process exists
    #[allow(clippy::cast_possible_wrap)]
    unsafe {
        libc::kill(pid as libc::pid_t, 0) == 0
    }
}

#[cfg(windows)]
fn is_process_running(pid: u32) -> bool {
    use winapi::um::handleapi::CloseHandle;
    use winapi::um::processthreadsapi::OpenProcess;
    use winapi::um::winnt::PROCESS_QUERY_INFORMATION;

    unsafe {
        let handle = OpenProcess(PROCESS_QUERY_INFORMATION, 0, pid);
        if handle.is_null() {
            false
        } else {
            CloseHandle(handle);
            true
        }
    }
}

#[cfg(not(any(unix, windows)))]
fn is_process_running(_pid: u32) -> bool {
    false
}
