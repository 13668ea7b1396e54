//! File-backed sink
//!
//! Appends one formatted line per event to a target file. The containing
//! directory is created at construction; the append handle is opened on
//! first write and kept for the process lifetime.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};

use super::SinkError;
use crate::severity::Severity;

/// Mode applied to created log directories
#[cfg(unix)]
const DIR_MODE: u32 = 0o775;

/// Lowest severity the file sink records
pub(crate) const MIN_LEVEL: Severity = Severity::Info;

/// Shared append handle to one log file
pub struct FileSink {
    path: PathBuf,
    handle: Mutex<Option<File>>,
}

impl FileSink {
    /// Create a sink for `path`, creating its parent directory if absent
    ///
    /// The file itself is opened on first write, so open failures surface
    /// inside the record path rather than at construction.
    pub fn new(path: &Path) -> Result<Self> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            if !dir.exists() {
                fs::create_dir_all(dir).context("Failed to create log directory")?;
            }
            normalize_dir_permissions(dir);
        }

        Ok(Self {
            path: path.to_path_buf(),
            handle: Mutex::new(None),
        })
    }

    /// Target path of this sink
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line, opening the shared handle on first call
    pub fn write(&self, severity: Severity, line: &str) -> Result<(), SinkError> {
        if severity < MIN_LEVEL {
            return Ok(());
        }

        let mut guard = match self.handle.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if guard.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)?;
            tracing::debug!("Opened log file {}", self.path.display());
            *guard = Some(file);
        }

        if let Some(file) = guard.as_mut() {
            writeln!(file, "{}", line)?;
            file.flush()?;
        }

        Ok(())
    }
}

/// Apply the fixed directory mode; no-op off unix
fn normalize_dir_permissions(dir: &Path) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = fs::set_permissions(dir, fs::Permissions::from_mode(DIR_MODE));
    }
    #[cfg(not(unix))]
    let _ = dir;
}
