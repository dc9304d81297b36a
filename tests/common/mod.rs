//! Common test utilities for pipeline tests.

#![allow(dead_code)]

mod fixtures;

pub use fixtures::*;

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use xmlui_bundler::{Error, Fetcher};

/// Serves archives from memory, recording every URL requested.
#[derive(Default)]
pub struct MemoryFetcher {
    responses: HashMap<String, Vec<u8>>,
    pub requests: RefCell<Vec<String>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serve(mut self, url: impl Into<String>, body: Vec<u8>) -> Self {
        self.responses.insert(url.into(), body);
        self
    }
}

impl Fetcher for MemoryFetcher {
    fn fetch(&self, url: &str, _label: &str) -> xmlui_bundler::Result<Vec<u8>> {
        self.requests.borrow_mut().push(url.to_string());
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| Error::RequestFailed {
                status: 404,
                url: url.to_string(),
            })
    }
}

/// Every file under `root`, relative and sorted, with `/` separators.
pub fn file_tree(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel: PathBuf = e.path().strip_prefix(root).unwrap().to_path_buf();
            rel.components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect();
    files.sort();
    files
}

#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|md| md.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}
