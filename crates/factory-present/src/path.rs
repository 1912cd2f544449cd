//! Export path validation.

use crate::error::ExportError;
use std::path::{Path, PathBuf};

/// Characters a file name may not contain.
pub const INVALID_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Validate an export path given without extension.
///
/// The path must be non-blank, its directory (if any) must exist, and its
/// file name must avoid [`INVALID_FILENAME_CHARS`].
pub fn validate_path(path: &str) -> Result<PathBuf, ExportError> {
    if path.trim().is_empty() {
        return Err(ExportError::InvalidPath("path cannot be empty".to_string()));
    }

    let target = Path::new(path);
    if let Some(dir) = target.parent() {
        if !dir.as_os_str().is_empty() && !dir.is_dir() {
            return Err(ExportError::InvalidPath(format!(
                "directory '{}' does not exist",
                dir.display()
            )));
        }
    }

    let filename = target
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| ExportError::InvalidPath(format!("'{path}' has no file name")))?;
    if filename.contains(INVALID_FILENAME_CHARS) {
        return Err(ExportError::InvalidPath(format!(
            "filename '{filename}' contains invalid characters"
        )));
    }

    Ok(target.to_path_buf())
}
