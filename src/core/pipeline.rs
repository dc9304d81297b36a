//! The five-step bundle pipeline
//!
//! 1. download + extract the application, rename it to its canonical directory
//! 2. download + extract the component library, copy the component subtrees
//! 3. download + extract the platform tool archive, relocate the expected files
//! 4. move stray root-level `docs`/`src` under `mcp`
//! 5. download + extract the platform server archive into the application
//!
//! Steps run strictly in order. The first failure stops the run; nothing done
//! by earlier steps is rolled back.

use crate::core::cleanup;
use crate::core::config::BundleConfig;
use crate::core::output;
use crate::core::platform::{AssetKind, Platform, ResolvedAsset, resolve_asset};
use crate::error::{Error, Result, Step, StepContext, StepError};
use crate::helpers::acquire::Fetcher;
use crate::helpers::build::{ArchiveFormat, extract};
use crate::helpers::install::{self, RelocationReport};
use crate::helpers::internal::fs_utils;
use std::path::{Path, PathBuf};

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct BundleSummary {
    pub install_dir: PathBuf,
    pub app_dir: PathBuf,
    pub mcp_dir: PathBuf,
    pub components_copied: usize,
    pub tools: RelocationReport,
    /// None when the script could not be written; the bundle itself is complete.
    pub cleanup_script: Option<PathBuf>,
}

/// Assembles a bundle into `install_dir`, downloading through `fetcher`.
pub struct Bundler<F: Fetcher> {
    config: BundleConfig,
    fetcher: F,
    platform: Platform,
    install_dir: PathBuf,
    bundler_name: String,
}

impl<F: Fetcher> Bundler<F> {
    pub fn new(config: BundleConfig, fetcher: F, platform: Platform, install_dir: PathBuf) -> Self {
        Self {
            config,
            fetcher,
            platform,
            install_dir,
            bundler_name: env!("CARGO_PKG_NAME").to_string(),
        }
    }

    /// Name of the bundler executable the cleanup script should delete.
    pub fn with_bundler_name(mut self, name: impl Into<String>) -> Self {
        self.bundler_name = name.into();
        self
    }

    pub fn install_dir(&self) -> &Path {
        &self.install_dir
    }

    fn mcp_dir(&self) -> PathBuf {
        self.install_dir.join(&self.config.mcp_dir)
    }

    /// Run every step, stopping at the first failure.
    pub fn run(&self) -> std::result::Result<BundleSummary, StepError> {
        let total = Step::ALL.len();
        let mcp_dir = self.mcp_dir();

        output::step(1, total, "Downloading XMLUI invoice app...");
        let app_dir = self.install_app().during(Step::App)?;

        output::step(2, total, "Downloading XMLUI components...");
        let components_copied = self.install_components(&mcp_dir).during(Step::Components)?;

        output::step(3, total, "Downloading MCP tools...");
        let tools = self.install_tools(&mcp_dir).during(Step::Tools)?;

        output::step(4, total, "Organizing layout...");
        self.organize(&mcp_dir).during(Step::Organize)?;

        output::step(5, total, "Downloading XMLUI test server...");
        self.install_server(&app_dir).during(Step::Server)?;

        let cleanup_script = self.write_cleanup_script();
        output::success("Organized layout complete");
        output::info(&format!("Install location: {}", self.install_dir.display()));

        Ok(BundleSummary {
            install_dir: self.install_dir.clone(),
            app_dir,
            mcp_dir,
            components_copied,
            tools,
            cleanup_script,
        })
    }

    /// Step 1: returns the canonical application directory.
    fn install_app(&self) -> Result<PathBuf> {
        fs_utils::ensure_dir(&self.install_dir)?;

        let data = self
            .fetcher
            .fetch(&self.config.app_archive_url, "XMLUI invoice app")?;
        extract(
            &data,
            ArchiveFormat::Zip,
            &self.install_dir,
            &self.config.executables,
        )?;

        install::move_into_place(&self.install_dir, &self.config.repo_name, &self.install_dir)
            .map_err(|e| match e {
                Error::Layout(msg) => Error::Layout(format!(
                    "{} (expected {}-{})",
                    msg, self.config.repo_name, self.config.branch
                )),
                other => other,
            })
    }

    /// Step 2: returns the number of component files copied.
    fn install_components(&self, mcp_dir: &Path) -> Result<usize> {
        let data = self
            .fetcher
            .fetch(&self.config.component_archive_url, "XMLUI repo")?;

        let staging = self.install_dir.join(&self.config.component_staging_dir);
        extract(&data, ArchiveFormat::Zip, &staging, &self.config.executables)?;

        let prefix = &self.config.component_root_prefix;
        let source_root = install::find_prefixed_dir(&staging, prefix)?.ok_or_else(|| {
            Error::Layout(format!(
                "component library root starting with '{}' not found in {}",
                prefix,
                staging.display()
            ))
        })?;

        fs_utils::ensure_dir(&mcp_dir.join("docs"))?;
        fs_utils::ensure_dir(&mcp_dir.join("src"))?;
        let copied = install::copy_components(&source_root, mcp_dir, &self.config.component_copies)?;
        output::success("Extracted components");

        fs_utils::remove_dir_if_exists(&staging)?;
        Ok(copied)
    }

    /// Step 3: returns which expected tool files were moved or skipped.
    fn install_tools(&self, mcp_dir: &Path) -> Result<RelocationReport> {
        let asset = self.resolve(AssetKind::Tool, &self.config.tool_release_base);
        let data = self.fetcher.fetch(&asset.url, "MCP tools")?;

        let staging = self.install_dir.join(&self.config.tool_staging_dir);
        extract(&data, asset.format, &staging, &self.config.executables)?;

        let report = install::relocate_expected(
            &staging,
            mcp_dir,
            self.platform.expected_tool_files(),
            !self.platform.is_windows(),
        )?;

        fs_utils::remove_dir_if_exists(&staging)?;
        Ok(report)
    }

    /// Step 4
    fn organize(&self, mcp_dir: &Path) -> Result<()> {
        install::adopt_stray_roots(&self.install_dir, mcp_dir)?;
        Ok(())
    }

    /// Step 5
    fn install_server(&self, app_dir: &Path) -> Result<()> {
        let asset = self.resolve(AssetKind::Server, &self.config.server_release_base);
        let data = self.fetcher.fetch(&asset.url, "test server")?;
        extract(&data, asset.format, app_dir, &self.config.executables)?;

        if !self.platform.is_windows() {
            let start_script = app_dir.join(&self.config.start_script);
            if start_script.is_file() {
                fs_utils::set_executable(&start_script)?;
            } else {
                output::warning(&format!(
                    "{} not found in server archive",
                    self.config.start_script
                ));
            }
        }
        Ok(())
    }

    fn resolve(&self, kind: AssetKind, base_url: &str) -> ResolvedAsset {
        let asset = resolve_asset(kind, self.platform, base_url);
        if asset.fallback {
            output::warning(&format!(
                "unrecognized platform {}; falling back to {}",
                self.platform, asset.url
            ));
        }
        asset
    }

    fn write_cleanup_script(&self) -> Option<PathBuf> {
        match cleanup::write_cleanup_script(&self.install_dir, self.platform, &self.bundler_name) {
            Ok(path) => {
                let hint = if self.platform.is_windows() {
                    "cleanup.bat"
                } else {
                    "./cleanup.sh"
                };
                output::info(&format!(
                    "Note: Run {} to remove the bundler executable and temporary files",
                    hint
                ));
                Some(path)
            }
            Err(e) => {
                output::warning(&format!("could not write cleanup script: {}", e));
                None
            }
        }
    }
}
