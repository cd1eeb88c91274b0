use crate::config::AnchorConfig;
use crate::document::Document;
use crate::matcher::score_at;
use crate::types::{Anchor, PositionMatch, RelocationResult};

/// Best candidate of a scan. `line == 0` means nothing scored above 0.
#[derive(Debug, Clone, Copy, PartialEq)]
struct BestMatch {
    line: usize,
    matched: PositionMatch,
}

/// Find `anchor` in `doc`: original line, then nearby lines, then whole file.
///
/// Every step short-circuits on a score at or above the threshold.
#[must_use]
pub fn relocate_in(doc: &Document<'_>, anchor: &Anchor, config: &AnchorConfig) -> RelocationResult {
    debug_assert!(
        doc.is_split_for(config),
        "document was split under a different config"
    );
    let threshold = config.similarity_threshold;

    let original = score_at(doc, anchor.line, anchor);
    if original.score >= threshold {
        log::trace!("anchor at line {} still matches ({:.3})", anchor.line, original.score);
        return RelocationResult::located(anchor.line, anchor.end_line_at(anchor.line), original);
    }

    let last_line = doc.line_count();
    let window_start = anchor.line.saturating_sub(config.search_radius).max(1);
    let window_end = anchor.line.saturating_add(config.search_radius).min(last_line);

    let nearby = best_in_range(doc, anchor, window_start, window_end);
    if nearby.matched.score >= threshold {
        log::debug!(
            "anchor moved {} -> {} within search radius ({:.3})",
            anchor.line,
            nearby.line,
            nearby.matched.score
        );
        return shifted(anchor, nearby);
    }

    let full = best_in_range(doc, anchor, 1, last_line);
    if full.matched.score >= threshold {
        log::debug!(
            "anchor moved {} -> {} by full-file scan ({:.3})",
            anchor.line,
            full.line,
            full.matched.score
        );
        return shifted(anchor, full);
    }

    log::debug!(
        "anchor at line {} orphaned: best score {:.3} below threshold {:.3}",
        anchor.line,
        full.matched.score,
        threshold
    );
    RelocationResult::orphaned(full.matched.score)
}

/// Highest-scoring line in `start..=end`; ties keep the earliest line.
fn best_in_range(doc: &Document<'_>, anchor: &Anchor, start: usize, end: usize) -> BestMatch {
    let mut best = BestMatch {
        line: 0,
        matched: PositionMatch::MISS,
    };

    for line in start..=end {
        let matched = score_at(doc, line, anchor);
        if matched.score > best.matched.score {
            best = BestMatch { line, matched };
        }
    }

    best
}

fn shifted(anchor: &Anchor, best: BestMatch) -> RelocationResult {
    RelocationResult::located(best.line, anchor.end_line_at(best.line), best.matched)
}
