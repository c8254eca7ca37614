use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::errors::{PackError, Result};

pub const ENTRY_FILE_NAME: &str = "__entry__.js";
pub const OUTPUT_FILE_NAME: &str = "__output__.js";

/// The bridge module and raw bundler output for one run.
///
/// Both files are removed when the guard is dropped, whether the run
/// succeeded or not. The names are fixed, so two runs sharing a scratch
/// directory will clobber each other.
#[derive(Debug)]
pub struct ScratchFiles {
    entry: PathBuf,
    output: PathBuf,
}

impl ScratchFiles {
    pub fn new(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir).map_err(|e| {
            PackError::file_system_error("Failed to create scratch directory", dir, e)
        })?;

        Ok(Self {
            entry: dir.join(ENTRY_FILE_NAME),
            output: dir.join(OUTPUT_FILE_NAME),
        })
    }

    pub fn entry_path(&self) -> &Path {
        &self.entry
    }

    pub fn output_path(&self) -> &Path {
        &self.output
    }

    pub fn write_entry(&self, contents: &str) -> Result<()> {
        debug!("Writing bridge module to {}", self.entry.display());
        std::fs::write(&self.entry, contents).map_err(|e| {
            PackError::file_system_error("Failed to write bridge module", &self.entry, e)
        })
    }

    pub fn read_output(&self) -> Result<String> {
        std::fs::read_to_string(&self.output).map_err(|e| {
            PackError::file_system_error("Failed to read bundler output", &self.output, e)
        })
    }
}

impl Drop for ScratchFiles {
    fn drop(&mut self) {
        for path in [&self.entry, &self.output] {
            match std::fs::remove_file(path) {
                Ok(()) => debug!("Removed scratch file {}", path.display()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => warn!("Failed to remove scratch file {}: {}", path.display(), e),
            }
        }
    }
}

/// Where scratch files go when the configuration doesn't say: next to the running executable
pub fn default_scratch_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()
        .map_err(|e| PackError::file_system_error("Failed to locate executable", "", e))?;

    Ok(exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")))
}
