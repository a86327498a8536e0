//! Filesystem implementation of `RoleSink`.
//!
//! Each document is written to a temporary file in the destination directory
//! and then renamed over the target, so readers only ever see the previous
//! document or the complete new one.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::info;

use rolegen_contracts::error::{RolegenError, RolegenResult};
use rolegen_core::traits::{RoleDocument, RoleSink};

/// Writes the base and merged documents to fixed paths.
#[derive(Debug, Clone)]
pub struct FileRoleSink {
    base_path: PathBuf,
    merged_path: PathBuf,
}

impl FileRoleSink {
    pub fn new(base_path: impl Into<PathBuf>, merged_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            merged_path: merged_path.into(),
        }
    }

    /// `role_base.yaml` and `role_merged.yaml` inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(
            dir.join(RoleDocument::Base.default_file_name()),
            dir.join(RoleDocument::Merged.default_file_name()),
        )
    }

    pub fn path_for(&self, document: RoleDocument) -> &Path {
        match document {
            RoleDocument::Base => &self.base_path,
            RoleDocument::Merged => &self.merged_path,
        }
    }
}

impl Default for FileRoleSink {
    /// Both documents in the working directory.
    fn default() -> Self {
        Self::new(
            RoleDocument::Base.default_file_name(),
            RoleDocument::Merged.default_file_name(),
        )
    }
}

impl RoleSink for FileRoleSink {
    fn write(&self, document: RoleDocument, contents: &str) -> RolegenResult<()> {
        let path = self.path_for(document);
        write_atomic(path, contents.as_bytes())?;
        info!(document = %document, path = %path.display(), "role document written");
        Ok(())
    }
}

/// Replace `path` with `contents` in one rename.
pub fn write_atomic(path: &Path, contents: &[u8]) -> RolegenResult<()> {
    let output_error = |reason: String| RolegenError::OutputError {
        path: path.display().to_string(),
        reason,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)
        .map_err(|e| output_error(format!("failed to create temporary file: {}", e)))?;
    tmp.write_all(contents)
        .map_err(|e| output_error(format!("failed to write temporary file: {}", e)))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| output_error(format!("failed to sync temporary file: {}", e)))?;
    tmp.persist(path)
        .map_err(|e| output_error(format!("failed to move document into place: {}", e.error)))?;

    Ok(())
}
