//! Platform detection and release asset selection
//!
//! Maps an (operating system, architecture) pair to the release asset that
//! should be downloaded for it. Unknown operating systems fall back to the
//! macOS ARM64 asset; callers are told when that happened so the guess is
//! never silent.

use crate::helpers::build::ArchiveFormat;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    MacOs,
    Linux,
    Windows,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    Arm64,
    Amd64,
    Other,
}

/// The platform assets are selected for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub os: Os,
    pub arch: Arch,
}

impl Platform {
    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        Self::parse(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Parse OS and architecture names. Accepts both Rust target spellings
    /// (`macos`, `aarch64`, `x86_64`) and Go-style ones (`darwin`, `arm64`, `amd64`).
    pub fn parse(os: &str, arch: &str) -> Self {
        let os = match os.to_lowercase().as_str() {
            "macos" | "darwin" => Os::MacOs,
            "linux" => Os::Linux,
            "windows" => Os::Windows,
            _ => Os::Other,
        };
        let arch = match arch.to_lowercase().as_str() {
            "aarch64" | "arm64" => Arch::Arm64,
            "x86_64" | "amd64" => Arch::Amd64,
            _ => Arch::Other,
        };
        Self { os, arch }
    }

    pub fn is_windows(&self) -> bool {
        self.os == Os::Windows
    }

    /// Files expected at the top of the extracted tool archive.
    pub fn expected_tool_files(&self) -> &'static [&'static str] {
        if self.is_windows() {
            &["xmlui-mcp.exe", "xmlui-mcp-client.exe", "run-mcp-client.bat"]
        } else {
            &[
                "xmlui-mcp",
                "xmlui-mcp-client",
                "prepare-binaries.sh",
                "run-mcp-client.sh",
            ]
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}/{:?}", self.os, self.arch)
    }
}

/// Which platform-specific release is being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Tool,
    Server,
}

impl AssetKind {
    fn name_prefix(self) -> &'static str {
        match self {
            AssetKind::Tool => "xmlui-mcp",
            AssetKind::Server => "xmlui-test-server",
        }
    }
}

/// A download URL together with the archive format it implies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAsset {
    pub url: String,
    pub format: ArchiveFormat,
    /// True when the platform was not recognized and the default asset was chosen
    pub fallback: bool,
}

const DEFAULT_SUFFIX: &str = "mac-arm.tar.gz";

fn asset_suffix(kind: AssetKind, platform: Platform) -> Option<&'static str> {
    let suffix = match (platform.os, platform.arch) {
        (Os::MacOs, Arch::Arm64) => "mac-arm.tar.gz",
        (Os::MacOs, _) => "mac-amd.tar.gz",
        (Os::Linux, _) => match kind {
            AssetKind::Tool => "linux-amd64.zip",
            AssetKind::Server => "linux-amd64.tar.gz",
        },
        (Os::Windows, _) => "windows-amd64.zip",
        (Os::Other, _) => return None,
    };
    Some(suffix)
}

/// Resolve the release asset of `kind` for `platform` under `base_url`.
///
/// The archive format always follows the extension of the resolved URL.
pub fn resolve_asset(kind: AssetKind, platform: Platform, base_url: &str) -> ResolvedAsset {
    let (suffix, fallback) = match asset_suffix(kind, platform) {
        Some(suffix) => (suffix, false),
        None => (DEFAULT_SUFFIX, true),
    };

    let url = format!(
        "{}/{}-{}",
        base_url.trim_end_matches('/'),
        kind.name_prefix(),
        suffix
    );
    let format = ArchiveFormat::from_url(&url);

    ResolvedAsset {
        url,
        format,
        fallback,
    }
}
