//! BUILD phase helpers - unpacking downloads
//!
//! The second step for every archive: acquire -> build -> install.
//!
//! ## Functions
//!
//! - **extract**: Extract an in-memory zip or tar.gz archive into a directory

pub mod extract;

// Re-export commonly used items
pub use extract::{ArchiveFormat, ExecutablePolicy, extract};
