//! Streaming download bodies into memory
//!
//! The bundler never writes archives to disk: each body is read into a buffer
//! and handed straight to the extractor.

use crate::core::output;
use crate::error::{Error, Result};
use crate::helpers::internal::url_utils;
use std::io::Read;

/// Upper bound on buffer preallocation taken from `Content-Length`.
const MAX_PREALLOCATION: usize = 64 << 20;

/// Read a response body into memory, showing a progress bar.
pub fn read_body(response: ureq::Response, url: &str) -> Result<Vec<u8>> {
    let filename = url_utils::extract_filename(url);
    let pb = output::spinner(&format!("downloading {}", filename));

    let expected: Option<u64> = response
        .header("content-length")
        .and_then(|s| s.parse().ok());
    if let Some(len) = expected {
        output::upgrade_to_bytes(&pb, len);
    }

    let result = read_with_progress(response.into_reader(), expected, |total| {
        pb.set_position(total)
    });
    pb.finish_and_clear();

    result.map_err(|e| Error::Network {
        url: url.to_string(),
        message: format!("read error: {}", e),
    })
}

/// Read `reader` to the end, reporting the running byte count.
fn read_with_progress<R: Read>(
    mut reader: R,
    expected: Option<u64>,
    mut on_progress: impl FnMut(u64),
) -> std::io::Result<Vec<u8>> {
    let capacity = expected
        .and_then(|n| usize::try_from(n).ok())
        .map_or(0, |n| n.min(MAX_PREALLOCATION));
    let mut data = Vec::with_capacity(capacity);
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        data.extend_from_slice(&buffer[..bytes_read]);
        on_progress(data.len() as u64);
    }

    Ok(data)
}
