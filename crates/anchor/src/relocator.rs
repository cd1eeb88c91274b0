use crate::builder;
use crate::config::AnchorConfig;
use crate::document::Document;
use crate::error::Result;
use crate::matcher;
use crate::strategy;
use crate::sync::{self, Anchored, Relocated, SyncOutcome};
use crate::types::{Anchor, PositionMatch, RelocationResult};

/// Main interface: creates anchors and relocates them under one configuration
#[derive(Debug, Clone, Default)]
pub struct Relocator {
    config: AnchorConfig,
}

impl Relocator {
    /// Create a relocator, rejecting invalid configuration
    pub fn new(config: AnchorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub const fn config(&self) -> &AnchorConfig {
        &self.config
    }

    /// Split `content` for repeated scoring or relocation
    #[must_use]
    pub fn document<'a>(&self, content: &'a str) -> Document<'a> {
        Document::new(content, &self.config)
    }

    /// Capture an anchor for `line..=end_line` (1-indexed) of `content`
    pub fn create_anchor(
        &self,
        content: &str,
        line: usize,
        end_line: Option<usize>,
    ) -> Result<Anchor> {
        builder::create_anchor(content, line, end_line, &self.config)
    }

    /// Score one candidate line of `content` against `anchor`
    #[must_use]
    pub fn score_at(&self, content: &str, candidate_line: usize, anchor: &Anchor) -> PositionMatch {
        matcher::score_at(&self.document(content), candidate_line, anchor)
    }

    /// Find `anchor` in `new_content`
    #[must_use]
    pub fn relocate(&self, anchor: &Anchor, new_content: &str) -> RelocationResult {
        self.relocate_in(&self.document(new_content), anchor)
    }

    /// Find `anchor` in an already split document.
    ///
    /// `doc` must come from [`Self::document`] so its windows match this config.
    #[must_use]
    pub fn relocate_in(&self, doc: &Document<'_>, anchor: &Anchor) -> RelocationResult {
        strategy::relocate_in(doc, anchor, &self.config)
    }

    /// Relocate every annotation, rebuilding anchors for those found
    pub fn relocate_all<'a, A: Anchored>(
        &self,
        annotations: &'a [A],
        new_content: &str,
    ) -> Vec<Relocated<'a, A>> {
        sync::relocate_all(&self.document(new_content), annotations, &self.config)
    }

    /// [`Self::relocate_all`] across the rayon pool
    pub fn relocate_all_par<'a, A: Anchored + Sync>(
        &self,
        annotations: &'a [A],
        new_content: &str,
    ) -> Vec<Relocated<'a, A>> {
        sync::relocate_all_par(&self.document(new_content), annotations, &self.config)
    }

    /// Partition annotations into synced (anchor replaced) and orphaned
    pub fn sync<A: Anchored>(&self, annotations: Vec<A>, new_content: &str) -> SyncOutcome<A> {
        sync::sync(&self.document(new_content), annotations, &self.config)
    }

    /// [`Self::sync`] across the rayon pool
    pub fn sync_par<A: Anchored + Sync>(
        &self,
        annotations: Vec<A>,
        new_content: &str,
    ) -> SyncOutcome<A> {
        sync::sync_par(&self.document(new_content), annotations, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnchorError;

    #[test]
    fn test_rejects_invalid_config() {
        let err = Relocator::new(AnchorConfig {
            context_lines: 0,
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, AnchorError::InvalidConfig(_)));
    }

    #[test]
    fn test_configs_coexist() {
        let content = "alpha\nbeta\ngamma\nTARGET\ndelta\nepsilon\nzeta\n";
        let wide = Relocator::new(AnchorConfig {
            context_lines: 3,
            ..Default::default()
        })
        .expect("relocator");
        let narrow = Relocator::default();

        let wide_anchor = wide.create_anchor(content, 4, None).expect("anchor");
        let narrow_anchor = narrow.create_anchor(content, 4, None).expect("anchor");
        assert_eq!(wide_anchor.context_before, "alpha\nbeta\ngamma");
        assert_eq!(narrow_anchor.context_before, "beta\ngamma");
        assert_eq!(wide_anchor.content_hash, narrow_anchor.content_hash);
    }

    #[test]
    fn test_score_at_matches_relocation_confidence() {
        let relocator = Relocator::default();
        let content = "one\ntwo\nthree\nfour\nfive\n";
        let anchor = relocator.create_anchor(content, 3, None).expect("anchor");
        let edited = "one\ntwo!\nthree\nfour\nfive\n";

        let scored = relocator.score_at(edited, 3, &anchor);
        let result = relocator.relocate(&anchor, edited);
        assert!(result.found);
        assert_eq!(result.confidence, scored.score);
        assert_eq!(result.content_changed, scored.content_changed);
    }

    #[test]
    fn test_extreme_line_numbers_do_not_fail() {
        let relocator = Relocator::default();
        let anchor = relocator
            .create_anchor("a\nb\nc\n", usize::MAX, None)
            .expect("anchor");
        assert!(!relocator.relocate(&anchor, "a\nb\nc\nd\n").found);

        let stretched = Anchor {
            line: 1,
            end_line: Some(usize::MAX),
            ..relocator.create_anchor("a\nb\nc\nd\n", 1, None).expect("anchor")
        };
        let result = relocator.relocate(&stretched, "a\nb\nc\nd\n");
        assert!((0.0..=1.0).contains(&result.confidence));
        assert!(result.content_changed);
    }
}
