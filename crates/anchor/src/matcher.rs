use crate::document::Document;
use crate::similarity::similarity;
use crate::types::{Anchor, PositionMatch};

/// Score `candidate_line` of `doc` against `anchor`.
///
/// The score is the mean of before- and after-context similarity; the span
/// length of the anchor is preserved when locating the after-window. The
/// content fingerprint only decides `content_changed`, never the score.
#[must_use]
pub fn score_at(doc: &Document<'_>, candidate_line: usize, anchor: &Anchor) -> PositionMatch {
    if candidate_line < 1 || candidate_line > doc.line_count() {
        return PositionMatch::MISS;
    }

    let candidate_end = candidate_line.saturating_add(anchor.span_extent());

    let before_score = similarity(&anchor.context_before, &doc.before(candidate_line));
    let after_score = similarity(&anchor.context_after, &doc.after(candidate_end));
    let score = (before_score + after_score) / 2.0;

    let content_changed = doc.span_hash(candidate_line, candidate_end) != anchor.content_hash;

    PositionMatch {
        score,
        content_changed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::create_anchor;
    use crate::config::AnchorConfig;

    const CONTENT: &str = "a\nb\nc\nTARGET\nd\ne\n";

    fn anchor_on(line: usize, end_line: Option<usize>) -> Anchor {
        create_anchor(CONTENT, line, end_line, &AnchorConfig::default()).expect("anchor")
    }

    fn doc(content: &str) -> Document<'_> {
        Document::new(content, &AnchorConfig::default())
    }

    #[test]
    fn test_out_of_range_candidates_miss() {
        let anchor = anchor_on(4, None);
        let d = doc(CONTENT);
        assert_eq!(score_at(&d, 0, &anchor), PositionMatch::MISS);
        assert_eq!(score_at(&d, 8, &anchor), PositionMatch::MISS);
    }

    #[test]
    fn test_exact_position_scores_one() {
        let anchor = anchor_on(4, None);
        let m = score_at(&doc(CONTENT), 4, &anchor);
        assert_eq!(m.score, 1.0);
        assert!(!m.content_changed);
    }

    #[test]
    fn test_changed_content_keeps_context_score() {
        let anchor = anchor_on(4, None);
        let m = score_at(&doc("a\nb\nc\nTARGET2\nd\ne\n"), 4, &anchor);
        assert_eq!(m.score, 1.0);
        assert!(m.content_changed);
    }

    #[test]
    fn test_half_context_match() {
        let anchor = anchor_on(4, None);
        // before-window intact, after-window blank
        let m = score_at(&doc("a\nb\nc\nTARGET\n\n"), 4, &anchor);
        assert!((m.score - 0.5).abs() < 1e-12);
        assert!(!m.content_changed);
    }

    #[test]
    fn test_multi_line_span_length_preserved() {
        let anchor = anchor_on(3, Some(5));
        let shifted = "new\na\nb\nc\nTARGET\nd\ne\n";
        let m = score_at(&doc(shifted), 4, &anchor);
        assert_eq!(m.score, 1.0);
        assert!(!m.content_changed);

        let m = score_at(&doc(shifted), 3, &anchor);
        assert!(m.score < 1.0);
        assert!(m.content_changed);
    }

    #[test]
    fn test_inverted_stored_span_acts_single_line() {
        let mut anchor = anchor_on(4, None);
        anchor.end_line = Some(2);
        let m = score_at(&doc(CONTENT), 4, &anchor);
        assert_eq!(m.score, 1.0);
        assert!(!m.content_changed);
    }

    #[test]
    fn test_unbounded_stored_span_clamps_to_file() {
        let mut anchor = anchor_on(4, None);
        anchor.end_line = Some(usize::MAX);
        let d = doc(CONTENT);
        for line in 1..=d.line_count() {
            let m = score_at(&d, line, &anchor);
            assert!((0.0..=1.0).contains(&m.score));
            assert!(m.content_changed);
        }
        // after-window lies past the file, so only the before-window matches
        assert_eq!(score_at(&d, 4, &anchor).score, 0.5);
    }
}
