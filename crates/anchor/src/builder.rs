use std::fmt::Write;

use sha2::{Digest, Sha256};

use crate::config::AnchorConfig;
use crate::document::Document;
use crate::error::{AnchorError, Result};
use crate::types::Anchor;

/// Hex chars kept from the SHA-256 digest
pub const CONTENT_HASH_LEN: usize = 12;

/// Fixed-length fingerprint of `text`: SHA-256, lowercase hex, truncated.
#[must_use]
pub fn content_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();

    let mut out = String::with_capacity(CONTENT_HASH_LEN);
    for b in digest.iter().take(CONTENT_HASH_LEN / 2) {
        let _ = write!(out, "{b:02x}");
    }
    out
}

/// Capture an anchor for `line..=end_line` of `content`.
///
/// Lines are 1-indexed. A line past the end of the file is accepted; its
/// anchored text is empty and both context windows are padding.
pub fn create_anchor(
    content: &str,
    line: usize,
    end_line: Option<usize>,
    config: &AnchorConfig,
) -> Result<Anchor> {
    let doc = Document::new(content, config);
    build_anchor(&doc, line, end_line)
}

/// Capture an anchor against an already split document.
pub fn build_anchor(doc: &Document<'_>, line: usize, end_line: Option<usize>) -> Result<Anchor> {
    if line == 0 {
        return Err(AnchorError::InvalidLine);
    }
    if let Some(end_line) = end_line {
        if end_line < line {
            return Err(AnchorError::invalid_span(line, end_line));
        }
    }

    let last_line = end_line.unwrap_or(line);
    Ok(Anchor {
        line,
        end_line,
        context_before: doc.before(line).into_owned(),
        context_after: doc.after(last_line).into_owned(),
        content_hash: doc.span_hash(line, last_line),
    })
}
