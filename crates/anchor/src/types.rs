use serde::{Deserialize, Serialize};

/// Durable, content-based reference to a line or line range.
///
/// Serialized with camelCase keys; this is the shape sidecar stores persist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Anchor {
    /// First anchored line (1-indexed)
    pub line: usize,

    /// Last anchored line for multi-line spans (1-indexed, inclusive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_line: Option<usize>,

    /// Lines preceding `line`, oldest first, joined by `\n`
    pub context_before: String,

    /// Lines following the span, nearest first, joined by `\n`
    pub context_after: String,

    /// Fingerprint of the anchored text
    pub content_hash: String,
}

impl Anchor {
    /// Number of lines the span extends past `line`.
    ///
    /// Saturates, so a stored anchor with `end_line < line` behaves like a
    /// single-line anchor.
    #[must_use]
    pub fn span_extent(&self) -> usize {
        self.end_line
            .map_or(0, |end_line| end_line.saturating_sub(self.line))
    }

    /// Last line covered by the anchor
    #[must_use]
    pub fn last_line(&self) -> usize {
        self.line.saturating_add(self.span_extent())
    }

    /// `end_line` for the same span moved to start at `line`
    #[must_use]
    pub fn end_line_at(&self, line: usize) -> Option<usize> {
        self.end_line.map(|_| line.saturating_add(self.span_extent()))
    }

    #[must_use]
    pub const fn is_multi_line(&self) -> bool {
        self.end_line.is_some()
    }

    /// Check if the anchored span covers a specific line
    #[must_use]
    pub fn contains_line(&self, line: usize) -> bool {
        line >= self.line && line <= self.last_line()
    }
}

/// Score of one candidate position against an anchor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionMatch {
    /// Average of before/after context similarity (0-1)
    pub score: f64,

    /// Whether the text at the candidate differs from the anchored text
    pub content_changed: bool,
}

impl PositionMatch {
    /// Result for a candidate outside the file
    pub const MISS: Self = Self {
        score: 0.0,
        content_changed: true,
    };
}

/// Outcome of one relocation attempt
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelocationResult {
    pub found: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_line: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_end_line: Option<usize>,

    /// Score of the match that produced this result (0-1)
    pub confidence: f64,

    /// Whether the anchored text changed. Always true when not found.
    pub content_changed: bool,
}

impl RelocationResult {
    /// Anchor located at `line..=end_line`
    #[must_use]
    pub const fn located(line: usize, end_line: Option<usize>, matched: PositionMatch) -> Self {
        Self {
            found: true,
            new_line: Some(line),
            new_end_line: end_line,
            confidence: matched.score,
            content_changed: matched.content_changed,
        }
    }

    /// No candidate reached the threshold; `confidence` is the best score seen
    #[must_use]
    pub const fn orphaned(confidence: f64) -> Self {
        Self {
            found: false,
            new_line: None,
            new_end_line: None,
            confidence,
            content_changed: true,
        }
    }

    /// Resolved position as `(line, end_line)`, if found
    #[must_use]
    pub fn position(&self) -> Option<(usize, Option<usize>)> {
        if !self.found {
            return None;
        }
        self.new_line.map(|line| (line, self.new_end_line))
    }

    /// Found at a different line than `original`
    #[must_use]
    pub fn moved_from(&self, original: usize) -> bool {
        self.new_line.is_some_and(|line| line != original)
    }
}
