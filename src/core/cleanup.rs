//! Cleanup script generation
//!
//! After a successful run the bundler leaves a script next to the bundle that
//! deletes the bundler binary, downloaded archives, and finally itself. The
//! script is only written, never executed.

use crate::core::platform::Platform;
use crate::error::{Error, Result};
use crate::helpers::internal::fs_utils;
use std::path::{Path, PathBuf};

/// File name of the cleanup script for `platform`.
pub fn script_name(platform: Platform) -> &'static str {
    if platform.is_windows() {
        "cleanup.bat"
    } else {
        "cleanup.sh"
    }
}

/// Render the cleanup script that removes `bundler_name` and leftover archives.
pub fn render_script(platform: Platform, bundler_name: &str) -> String {
    if platform.is_windows() {
        let lines = [
            "@echo off".to_string(),
            "echo Cleaning up temporary files...".to_string(),
            format!("if exist \"{0}\" del \"{0}\"", bundler_name),
            "if exist *.zip del *.zip".to_string(),
            format!("del {}", script_name(platform)),
        ];
        lines.iter().map(|l| format!("{}\r\n", l)).collect()
    } else {
        let lines = [
            "#!/bin/sh".to_string(),
            "echo Cleaning up temporary files...".to_string(),
            format!("rm -f \"{}\"", bundler_name),
            "rm -f *.zip".to_string(),
            "rm -f *.tar.gz".to_string(),
            format!("rm -f {}", script_name(platform)),
        ];
        lines.iter().map(|l| format!("{}\n", l)).collect()
    }
}

/// Write the platform's cleanup script into `install_dir` and return its path.
pub fn write_cleanup_script(
    install_dir: &Path,
    platform: Platform,
    bundler_name: &str,
) -> Result<PathBuf> {
    let path = install_dir.join(script_name(platform));
    std::fs::write(&path, render_script(platform, bundler_name))
        .map_err(|e| Error::fs("write", &path, e))?;
    fs_utils::set_executable(&path)?;
    Ok(path)
}
