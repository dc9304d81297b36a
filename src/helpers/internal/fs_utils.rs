//! Common filesystem utilities
//!
//! Provides shared filesystem operations used across multiple helpers.

use crate::error::{Error, Result};
use std::path::{Component, Path};

/// Create a directory and all of its ancestors.
pub fn ensure_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|e| Error::fs("create directory", path, e))
}

/// Ensure a file's parent directory exists.
///
/// Creates the parent directory (and all ancestors) if it doesn't exist.
///
/// # Example
/// ```ignore
/// ensure_parent_dir(Path::new("/foo/bar/baz.txt"))?;
/// // /foo/bar/ now exists
/// ```
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        ensure_dir(parent)?;
    }
    Ok(())
}

/// Set file permissions (Unix only).
///
/// No-op on non-Unix platforms.
#[cfg(unix)]
pub fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
        .map_err(|e| Error::fs("chmod", path, e))
}

#[cfg(not(unix))]
pub fn set_mode(_path: &Path, _mode: u32) -> Result<()> {
    Ok(()) // No-op on non-Unix
}

/// Mark a file executable (0755).
pub fn set_executable(path: &Path) -> Result<()> {
    set_mode(path, 0o755)
}

/// Check whether a file carries any execute bit. Always false off Unix.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path).is_ok_and(|md| md.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    false
}

/// Copy a file byte-for-byte, creating parent directories as needed.
pub fn copy_file(src: &Path, dest: &Path) -> Result<()> {
    ensure_parent_dir(dest)?;
    let data = std::fs::read(src).map_err(|e| Error::fs("read", src, e))?;
    std::fs::write(dest, data).map_err(|e| Error::fs("write", dest, e))
}

/// Rename a file or directory, creating the destination's parent as needed.
pub fn move_path(src: &Path, dest: &Path) -> Result<()> {
    ensure_parent_dir(dest)?;
    std::fs::rename(src, dest).map_err(|e| Error::fs("rename", src, e))
}

/// Remove a directory tree. Missing directories are not an error.
pub fn remove_dir_if_exists(path: &Path) -> Result<()> {
    match std::fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::fs("remove directory", path, e)),
    }
}

/// Check if path is safe (no path traversal).
///
/// Rejects absolute paths and paths containing "..".
pub fn is_safe_path(path: &Path) -> bool {
    !path.is_absolute() && !path.components().any(|c| c == Component::ParentDir)
}
