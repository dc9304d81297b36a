//! Archive extraction
//!
//! Unpacks in-memory zip and gzip-compressed tar archives into a destination
//! directory, then applies the executable policy to every file written.
//!
//! ## Example
//!
//! ```ignore
//! let bytes = fetcher.fetch(url, "MCP tools")?;
//! let written = extract(&bytes, ArchiveFormat::TarGz, &staging, &ExecutablePolicy::default())?;
//! ```

use crate::core::output;
use crate::error::{Error, Result};
use crate::helpers::internal::{fs_utils, url_utils};
use std::fmt;
use std::io::{Cursor, Read};
use std::path::{Component, Path, PathBuf};

/// Archive formats the bundler can unpack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    TarGz,
}

impl ArchiveFormat {
    /// Infer the format from a download URL.
    ///
    /// Anything that does not end in `.zip` is treated as a gzip-compressed tar.
    pub fn from_url(url: &str) -> Self {
        if url_utils::strip_query(url).to_lowercase().ends_with(".zip") {
            ArchiveFormat::Zip
        } else {
            ArchiveFormat::TarGz
        }
    }

    /// File extension (with leading dot) conventionally used for this format.
    pub fn extension(self) -> &'static str {
        match self {
            ArchiveFormat::Zip => ".zip",
            ArchiveFormat::TarGz => ".tar.gz",
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveFormat::Zip => f.write_str("zip"),
            ArchiveFormat::TarGz => f.write_str("tar.gz"),
        }
    }
}

/// Decides which extracted files receive execute permission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutablePolicy {
    /// File name suffixes, e.g. `.sh`
    pub suffixes: Vec<String>,
    /// Exact base names, e.g. `xmlui-mcp`
    pub names: Vec<String>,
}

impl ExecutablePolicy {
    /// A policy that never marks anything executable.
    pub fn none() -> Self {
        Self {
            suffixes: Vec::new(),
            names: Vec::new(),
        }
    }

    pub fn matches(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        self.names.iter().any(|n| n == name) || self.suffixes.iter().any(|s| name.ends_with(s))
    }
}

impl Default for ExecutablePolicy {
    fn default() -> Self {
        Self {
            suffixes: vec![".sh".to_string()],
            names: vec![
                "xmlui-mcp".to_string(),
                "xmlui-mcp-client".to_string(),
                "xmlui-test-server".to_string(),
            ],
        }
    }
}

// ============================================================================
// Path safety
// ============================================================================

fn normalize_lexical(path: &Path) -> PathBuf {
    // Lexically normalize a path (no filesystem access). This is used to
    // validate link targets without following symlinks.
    let mut out = PathBuf::new();
    let mut has_root = false;

    for c in path.components() {
        match c {
            Component::Prefix(p) => {
                out.clear();
                out.push(p.as_os_str());
                has_root = true;
            }
            Component::RootDir => {
                out.push(Component::RootDir.as_os_str());
                has_root = true;
            }
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = out
                    .components()
                    .next_back()
                    .is_some_and(|last| matches!(last, Component::Normal(_)));
                if popped {
                    out.pop();
                } else if !has_root {
                    out.push("..");
                }
            }
            Component::Normal(seg) => out.push(seg),
        }
    }

    out
}

fn ensure_no_symlink_components(dest: &Path, full_path: &Path) -> Result<()> {
    let rel = full_path.strip_prefix(dest).map_err(|_| {
        Error::archive(
            ArchiveFormat::TarGz,
            format!("path outside destination: {}", full_path.display()),
        )
    })?;

    // Writing through an existing symlink could escape `dest`.
    let mut cur = dest.to_path_buf();
    for comp in rel.components() {
        cur.push(comp);
        if let Ok(md) = std::fs::symlink_metadata(&cur)
            && md.file_type().is_symlink()
        {
            return Err(Error::archive(
                ArchiveFormat::TarGz,
                format!("symlink in path component: {}", cur.display()),
            ));
        }
    }

    Ok(())
}

fn ensure_link_target_within_dest(dest: &Path, link_parent: &Path, link_name: &Path) -> Result<()> {
    if link_name.is_absolute()
        || link_name
            .components()
            .any(|c| matches!(c, Component::Prefix(_) | Component::RootDir))
    {
        return Err(Error::archive(
            ArchiveFormat::TarGz,
            format!("unsafe link target (absolute): {}", link_name.display()),
        ));
    }

    let candidate = normalize_lexical(&link_parent.join(link_name));
    if candidate.strip_prefix(normalize_lexical(dest)).is_err() {
        return Err(Error::archive(
            ArchiveFormat::TarGz,
            format!(
                "unsafe link target (escapes dest): {} -> {}",
                link_parent.display(),
                link_name.display()
            ),
        ));
    }

    Ok(())
}

// ============================================================================
// Format-specific extraction
// ============================================================================

fn extract_tar<R: Read>(reader: R, dest: &Path) -> Result<Vec<PathBuf>> {
    let format = ArchiveFormat::TarGz;
    let mut archive = tar::Archive::new(reader);
    let mut written = Vec::new();

    for entry in archive
        .entries()
        .map_err(|e| Error::archive(format, format!("tar read error: {}", e)))?
    {
        let mut entry =
            entry.map_err(|e| Error::archive(format, format!("tar entry error: {}", e)))?;

        let path = entry
            .path()
            .map_err(|e| Error::archive(format, format!("tar path error: {}", e)))?
            .into_owned();

        if !fs_utils::is_safe_path(&path) {
            return Err(Error::archive(
                format,
                format!("unsafe path: {}", path.display()),
            ));
        }

        // Some archives contain a "." entry; treat it as a no-op.
        if path.as_os_str().is_empty() || path == Path::new(".") {
            continue;
        }

        let full_path = dest.join(&path);
        ensure_no_symlink_components(dest, &full_path)?;

        let entry_type = entry.header().entry_type();
        if entry_type.is_dir() {
            fs_utils::ensure_dir(&full_path)?;
            continue;
        }

        if entry_type.is_symlink() || entry_type.is_hard_link() {
            let link_name = entry
                .link_name()
                .map_err(|e| Error::archive(format, format!("tar link_name error: {}", e)))?
                .ok_or_else(|| {
                    Error::archive(format, format!("link without target: {}", path.display()))
                })?
                .into_owned();

            if entry_type.is_hard_link() {
                // Hard link targets are relative to the archive root.
                ensure_link_target_within_dest(dest, dest, &link_name)?;
                let target = dest.join(&link_name);
                ensure_no_symlink_components(dest, &target)?;
                fs_utils::ensure_parent_dir(&full_path)?;
                if std::fs::symlink_metadata(&full_path).is_ok() {
                    std::fs::remove_file(&full_path)
                        .map_err(|e| Error::fs("remove", &full_path, e))?;
                }
                std::fs::hard_link(&target, &full_path)
                    .map_err(|e| Error::fs("hard link", &full_path, e))?;
                written.push(full_path);
                continue;
            }

            let link_parent = full_path.parent().unwrap_or(dest);
            ensure_link_target_within_dest(dest, link_parent, &link_name)?;
        }

        fs_utils::ensure_parent_dir(&full_path)?;
        entry
            .unpack(&full_path)
            .map_err(|e| Error::fs("unpack", &full_path, e))?;

        if entry_type.is_file() {
            written.push(full_path);
        }
    }

    Ok(written)
}

fn extract_tar_gz(data: &[u8], dest: &Path) -> Result<Vec<PathBuf>> {
    let decoder = flate2::read::GzDecoder::new(data);
    extract_tar(decoder, dest)
}

fn extract_zip(data: &[u8], dest: &Path) -> Result<Vec<PathBuf>> {
    let format = ArchiveFormat::Zip;
    let mut archive = zip::ZipArchive::new(Cursor::new(data))
        .map_err(|e| Error::archive(format, format!("zip read error: {}", e)))?;
    let mut written = Vec::new();

    for i in 0..archive.len() {
        let mut file = archive
            .by_index(i)
            .map_err(|e| Error::archive(format, format!("zip entry error: {}", e)))?;

        let outpath = match file.enclosed_name() {
            Some(path) => dest.join(path),
            None => continue,
        };

        if file.is_dir() {
            fs_utils::ensure_dir(&outpath)?;
            continue;
        }

        fs_utils::ensure_parent_dir(&outpath)?;
        let mut outfile =
            std::fs::File::create(&outpath).map_err(|e| Error::fs("create", &outpath, e))?;
        std::io::copy(&mut file, &mut outfile).map_err(|e| Error::fs("write", &outpath, e))?;

        if let Some(mode) = file.unix_mode() {
            fs_utils::set_mode(&outpath, mode & 0o7777)?;
        }

        written.push(outpath);
    }

    Ok(written)
}

// ============================================================================
// Public API
// ============================================================================

/// Extract an in-memory archive into `dest`, returning the files written.
///
/// Any file matched by `policy` is made executable afterwards. Extraction is
/// not rolled back on failure.
pub fn extract(
    data: &[u8],
    format: ArchiveFormat,
    dest: &Path,
    policy: &ExecutablePolicy,
) -> Result<Vec<PathBuf>> {
    fs_utils::ensure_dir(dest)?;

    let pb = output::spinner(&format!("extracting {} archive", format));
    let result = match format {
        ArchiveFormat::Zip => extract_zip(data, dest),
        ArchiveFormat::TarGz => extract_tar_gz(data, dest),
    };
    pb.finish_and_clear();

    let written = result?;
    for path in written.iter().filter(|p| policy.matches(p)) {
        fs_utils::set_executable(path)?;
    }

    Ok(written)
}
