//! Bundle assembler for the XMLUI invoice application
//!
//! Downloads four remote archives and rearranges their contents into a
//! ready-to-run local installation:
//!
//! ```text
//! <install dir>/
//!   xmlui-invoice/            application + test server, start.sh
//!   mcp/
//!     docs/pages/components/  component documentation
//!     src/components/         component sources
//!     xmlui-mcp, ...          platform tool binaries and scripts
//!   cleanup.sh | cleanup.bat
//! ```
//!
//! # Example
//!
//! ```no_run
//! use xmlui_bundler::{BundleConfig, Bundler, HttpFetcher, Platform};
//!
//! let config = BundleConfig::default();
//! let fetcher = HttpFetcher::from_env(&config);
//! let install_dir = std::env::current_dir().unwrap();
//! let summary = Bundler::new(config, fetcher, Platform::current(), install_dir).run();
//! ```
//!
//! # Private repository access
//!
//! The component library download carries `GITHUB_TOKEN` as a bearer
//! credential when it is set.

pub mod core;
pub mod error;
pub mod helpers;

pub use crate::core::config::BundleConfig;
pub use crate::core::output;
pub use crate::core::pipeline::{BundleSummary, Bundler};
pub use crate::core::platform::{AssetKind, Platform, ResolvedAsset, resolve_asset};
pub use error::{Error, Result, Step, StepError};
pub use helpers::acquire::{Fetcher, HttpFetcher};
pub use helpers::build::{ArchiveFormat, ExecutablePolicy};
