/// Bundled assets for package-summary
/// This module contains files that are embedded into the binary at compile time
use sha2::{Digest, Sha256};

/// The package summary printed to stdout and saved to disk on every run
pub const SUMMARY_TEXT: &str = include_str!("assets/COMPLETE_PACKAGE_SUMMARY.txt");

/// Get the summary content that should be emitted
pub fn summary_text() -> &'static str {
    SUMMARY_TEXT
}

/// SHA-256 of `content` as `sha256:<hex>`
pub fn content_digest(content: &[u8]) -> String {
    let hash = Sha256::digest(content);
    let hex: String = hash.iter().map(|b| format!("{:02x}", b)).collect();
    format!("sha256:{}", hex)
}

/// Digest of the embedded summary
pub fn summary_digest() -> String {
    content_digest(SUMMARY_TEXT.as_bytes())
}
