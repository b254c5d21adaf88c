// src/file/mod.rs
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{Result, SilverError};

pub mod export;

pub use export::ExportFormat;

/// Writes exported results to disk.
#[derive(Debug, Default)]
pub struct ExportManager {
    export_dir: Option<PathBuf>,
}

impl ExportManager {
    pub fn new(export_dir: Option<PathBuf>) -> Self {
        Self { export_dir }
    }

    pub fn export_dir(&self) -> Option<&Path> {
        self.export_dir.as_deref()
    }

    /// `<export_dir>/<file name>`, or the bare file name when no directory is set.
    pub fn default_path(&self, format: ExportFormat) -> PathBuf {
        match &self.export_dir {
            Some(dir) => dir.join(format.file_name()),
            None => PathBuf::from(format.file_name()),
        }
    }

    pub fn write(&self, path: &Path, contents: &str) -> Result<PathBuf> {
        let write_err = |source| SilverError::ExportWrite {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, contents).map_err(write_err)?;

        info!(path = %path.display(), bytes = contents.len(), "Exported results");
        Ok(path.to_path_buf())
    }

    pub fn write_default(&self, format: ExportFormat, contents: &str) -> Result<PathBuf> {
        self.write(&self.default_path(format), contents)
    }
}
