//! xmlui-bundler - assemble a ready-to-run XMLUI invoice bundle
//!
//! Usage:
//!   xmlui-bundler            Build the bundle in the current directory
//!
//! Environment:
//!   GITHUB_TOKEN             Credential for the private component repository

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use xmlui_bundler::{BundleConfig, Bundler, HttpFetcher, Platform, output};

#[derive(Parser)]
#[command(name = "xmlui-bundler")]
#[command(about = "Download and assemble the XMLUI invoice app, components, MCP tools and test server")]
#[command(version)]
struct Cli {}

/// Base name this binary was invoked as, so the cleanup script deletes the right file.
fn bundler_name() -> String {
    std::env::args()
        .next()
        .as_deref()
        .and_then(|arg0| Path::new(arg0).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| env!("CARGO_BIN_NAME").to_string())
}

fn run() -> Result<()> {
    let install_dir = std::env::current_dir().context("Failed to determine working directory")?;

    let config = BundleConfig::default();
    let fetcher = HttpFetcher::from_env(&config);

    Bundler::new(config, fetcher, Platform::current(), install_dir)
        .with_bundler_name(bundler_name())
        .run()?;

    Ok(())
}

fn main() -> ExitCode {
    let _cli = Cli::parse();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::failure(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
