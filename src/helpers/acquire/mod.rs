//! ACQUIRE phase helpers - getting archives
//!
//! The first step for every archive: acquire -> build -> install.
//!
//! ## Functions
//!
//! - **Fetcher**: the download seam the pipeline depends on
//! - **HttpFetcher**: HTTP(S) GET with optional private-repository credential

pub mod download;
pub mod http;

// Re-export commonly used items
pub use http::{Fetcher, HttpFetcher};
