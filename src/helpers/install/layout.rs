//! Layout assembly
//!
//! Moves extracted trees into their final positions inside the install
//! directory. Everything here works on paths only; downloading and extracting
//! happen before these functions are called.

use crate::core::config::CopyRule;
use crate::core::output;
use crate::error::{Error, Result};
use crate::helpers::internal::fs_utils;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Root-level directories that belong under the `mcp` directory when a stray
/// extraction leaves them at the top of the install directory.
const STRAY_ROOTS: [&str; 2] = ["docs", "src"];

/// Find the first directory in `parent` (by name order) whose name starts with `prefix`.
pub fn find_prefixed_dir(parent: &Path, prefix: &str) -> Result<Option<PathBuf>> {
    let entries =
        std::fs::read_dir(parent).map_err(|e| Error::fs("read directory", parent, e))?;

    let mut matches: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::fs("read directory", parent, e))?;
        let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
        if is_dir && entry.file_name().to_string_lossy().starts_with(prefix) {
            matches.push(entry.path());
        }
    }
    matches.sort();

    Ok(matches.into_iter().next())
}

/// Rename the extracted `<repo_name>-<branch>` directory in `src_parent` to
/// `<install_dir>/<repo_name>` and return the new path.
pub fn move_into_place(src_parent: &Path, repo_name: &str, install_dir: &Path) -> Result<PathBuf> {
    let prefix = format!("{}-", repo_name);
    let extracted = find_prefixed_dir(src_parent, &prefix)?.ok_or_else(|| {
        Error::Layout(format!(
            "repo dir not found: no entry starting with '{}' in {}",
            prefix,
            src_parent.display()
        ))
    })?;

    let final_dir = install_dir.join(repo_name);
    fs_utils::move_path(&extracted, &final_dir)?;
    Ok(final_dir)
}

/// Recursively copy `src` into `dst`, file by file. Returns the number of files copied.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<usize> {
    fs_utils::ensure_dir(dst)?;

    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(src).to_path_buf();
            Error::fs("read directory", path, e.into())
        })?;
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(rel);

        if entry.file_type().is_dir() {
            fs_utils::ensure_dir(&target)?;
        } else {
            fs_utils::copy_file(entry.path(), &target)?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// Apply each copy rule from the component library root into the `mcp` directory.
pub fn copy_components(source_root: &Path, mcp_dir: &Path, rules: &[CopyRule]) -> Result<usize> {
    let mut copied = 0;
    for rule in rules {
        let from = source_root.join(&rule.from);
        let to = mcp_dir.join(&rule.to);
        let count = copy_tree(&from, &to)?;
        output::detail(&format!("copied {} files into {}", count, to.display()));
        copied += count;
    }
    Ok(copied)
}

/// Outcome of moving the expected files out of a staging directory.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RelocationReport {
    pub moved: Vec<PathBuf>,
    pub skipped: Vec<String>,
}

/// Move each of `names` from `staging` into `dest`.
///
/// A file that cannot be moved is logged and skipped, never fatal. When
/// `mark_executable` is set, moved files ending in `.sh` or without an
/// extension are made executable.
pub fn relocate_expected(
    staging: &Path,
    dest: &Path,
    names: &[&str],
    mark_executable: bool,
) -> Result<RelocationReport> {
    relocate_with(staging, dest, names, mark_executable, output::skip)
}

/// `relocate_expected` with the skip log routed through `log_skip`, called
/// exactly once per skipped file.
fn relocate_with(
    staging: &Path,
    dest: &Path,
    names: &[&str],
    mark_executable: bool,
    mut log_skip: impl FnMut(&str),
) -> Result<RelocationReport> {
    fs_utils::ensure_dir(dest)?;
    let mut report = RelocationReport::default();

    for name in names {
        let src = staging.join(name);
        let dst = dest.join(name);

        if let Err(e) = std::fs::rename(&src, &dst) {
            log_skip(&format!("Skipping {} (not found?): {}", name, e));
            report.skipped.push(name.to_string());
            continue;
        }
        output::detail(&format!("Moved {} to {}", name, dst.display()));

        if mark_executable && (name.ends_with(".sh") || !name.contains('.')) {
            fs_utils::set_executable(&dst)?;
        }
        report.moved.push(dst);
    }

    Ok(report)
}

/// Move root-level `docs` and `src` directories under `mcp_dir`.
///
/// When the destination already exists the two trees are merged and the root
/// copy removed. Returns the destinations that received content.
pub fn adopt_stray_roots(install_dir: &Path, mcp_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut adopted = Vec::new();

    for name in STRAY_ROOTS {
        let stray = install_dir.join(name);
        if !stray.is_dir() {
            continue;
        }

        let target = mcp_dir.join(name);
        if target.exists() {
            copy_tree(&stray, &target)?;
            fs_utils::remove_dir_if_exists(&stray)?;
        } else {
            fs_utils::move_path(&stray, &target)?;
        }
        output::detail(&format!("Moved {} to {}", name, target.display()));
        adopted.push(target);
    }

    Ok(adopted)
}
