//! URL parsing utilities
//!
//! Provides helpers for extracting filenames and extensions from download URLs.

/// Strip the query string and fragment from a URL.
pub fn strip_query(url: &str) -> &str {
    let clean = url.split('?').next().unwrap_or(url);
    clean.split('#').next().unwrap_or(clean)
}

/// Extract the last path segment of a URL.
///
/// Returns "download" when the URL has no usable segment.
///
/// # Example
/// ```ignore
/// assert_eq!(extract_filename("https://example.com/foo-1.0.tar.gz"), "foo-1.0.tar.gz");
/// assert_eq!(extract_filename("https://example.com/file?v=1"), "file");
/// ```
pub fn extract_filename(url: &str) -> String {
    strip_query(url)
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty() && !s.contains(':'))
        .map(str::to_string)
        .unwrap_or_else(|| "download".to_string())
}
