use std::borrow::Cow;
use std::sync::OnceLock;

use crate::builder::content_hash;
use crate::config::{AnchorConfig, LineEndings};

/// File content split into lines, with context windows cached per line.
///
/// One `Document` is built per relocation pass and shared (immutably, and
/// across threads) by every anchor relocated against that content. Windows
/// are computed on first use, so a fast-path hit only ever touches one line.
#[derive(Debug)]
pub struct Document<'a> {
    lines: Vec<&'a str>,
    context_lines: usize,
    line_endings: LineEndings,
    before: Vec<OnceLock<String>>,
    after: Vec<OnceLock<String>>,
}

impl<'a> Document<'a> {
    /// Split `content` on `\n` using the config's window size and line-ending policy
    #[must_use]
    pub fn new(content: &'a str, config: &AnchorConfig) -> Self {
        Self::with_window(content, config.context_lines, config.line_endings)
    }

    #[must_use]
    pub fn with_window(content: &'a str, context_lines: usize, line_endings: LineEndings) -> Self {
        let lines: Vec<&'a str> = content.split('\n').map(|l| line_endings.apply(l)).collect();
        let before = (0..lines.len()).map(|_| OnceLock::new()).collect();
        let after = (0..lines.len()).map(|_| OnceLock::new()).collect();
        Self {
            lines,
            context_lines,
            line_endings,
            before,
            after,
        }
    }

    /// Number of lines. Content ending in `\n` has a trailing empty line.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }

    #[must_use]
    pub const fn context_lines(&self) -> usize {
        self.context_lines
    }

    #[must_use]
    pub const fn line_endings(&self) -> LineEndings {
        self.line_endings
    }

    /// Whether windows were built with `config`'s window size and line endings
    #[must_use]
    pub fn is_split_for(&self, config: &AnchorConfig) -> bool {
        self.context_lines == config.context_lines && self.line_endings == config.line_endings
    }

    /// Line text (1-indexed)
    #[must_use]
    pub fn line(&self, line: usize) -> Option<&'a str> {
        line.checked_sub(1)
            .and_then(|idx| self.lines.get(idx))
            .copied()
    }

    /// Window of lines preceding `line`, oldest first
    #[must_use]
    pub fn before(&self, line: usize) -> Cow<'_, str> {
        match line.checked_sub(1).and_then(|idx| self.before.get(idx)) {
            Some(cell) => Cow::Borrowed(
                cell.get_or_init(|| window_before(&self.lines, line, self.context_lines)),
            ),
            None => Cow::Owned(window_before(&self.lines, line, self.context_lines)),
        }
    }

    /// Window of lines following `end_line`, nearest first
    #[must_use]
    pub fn after(&self, end_line: usize) -> Cow<'_, str> {
        match end_line.checked_sub(1).and_then(|idx| self.after.get(idx)) {
            Some(cell) => Cow::Borrowed(
                cell.get_or_init(|| window_after(&self.lines, end_line, self.context_lines)),
            ),
            None => Cow::Owned(window_after(&self.lines, end_line, self.context_lines)),
        }
    }

    /// Text of `line..=end_line` joined by `\n`, clamped to the file
    #[must_use]
    pub fn span_text(&self, line: usize, end_line: usize) -> String {
        let len = self.lines.len();
        let start = line.saturating_sub(1).min(len);
        let end = end_line.min(len).max(start);
        self.lines[start..end].join("\n")
    }

    /// Fingerprint of `line..=end_line`
    #[must_use]
    pub fn span_hash(&self, line: usize, end_line: usize) -> String {
        content_hash(&self.span_text(line, end_line))
    }
}

/// `count` lines before 1-indexed `line`, oldest first; missing lines are `""`.
pub(crate) fn window_before(lines: &[&str], line: usize, count: usize) -> String {
    let window: Vec<&str> = (0..count)
        .map(|offset| {
            let idx = line
                .checked_add(offset)
                .and_then(|n| n.checked_sub(count + 1));
            line_at(lines, idx)
        })
        .collect();
    window.join("\n")
}

/// `count` lines after 1-indexed `end_line`, nearest first; missing lines are `""`.
pub(crate) fn window_after(lines: &[&str], end_line: usize, count: usize) -> String {
    let window: Vec<&str> = (0..count)
        .map(|offset| line_at(lines, end_line.checked_add(offset)))
        .collect();
    window.join("\n")
}

fn line_at<'a>(lines: &[&'a str], idx: Option<usize>) -> &'a str {
    idx.and_then(|idx| lines.get(idx)).copied().unwrap_or("")
}
