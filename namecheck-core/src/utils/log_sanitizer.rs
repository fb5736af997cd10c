//! Log sanitization utilities
//!
//! Upstream bodies are echoed into debug/error logs; keep them bounded so a
//! misbehaving upstream returning an HTML page cannot flood the log.

/// Maximum number of bytes to include in truncated log output.
const TRUNCATE_LIMIT: usize = 256;

/// Largest char boundary at or below `index`.
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    (0..=index)
        .rev()
        .find(|&i| s.is_char_boundary(i))
        .unwrap_or(0)
}

/// Truncate a string for safe logging.
///
/// Strings within the limit are returned unchanged; longer ones are cut at a
/// char boundary and suffixed with their total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        return s.to_string();
    }
    let end = floor_char_boundary(s, TRUNCATE_LIMIT);
    format!("{}... [truncated, total {} bytes]", &s[..end], s.len())
}
