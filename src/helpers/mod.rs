//! Bundler helper functions
//!
//! Every archive goes through the same three phases, each with its own module:
//!
//! ```ignore
//! let bytes = fetcher.fetch(url, "MCP tools")?;                 // acquire
//! extract(&bytes, format, &staging, &policy)?;                  // build
//! relocate_expected(&staging, &mcp_dir, names, true)?;          // install
//! ```
//!
//! ## Categories
//!
//! - **acquire**: Fetcher, HttpFetcher
//! - **build**: extract, ArchiveFormat, ExecutablePolicy
//! - **install**: move_into_place, copy_tree, relocate_expected, adopt_stray_roots

// Internal utility modules (used by other helpers)
pub mod internal;

pub mod acquire;
pub mod build;
pub mod install;
