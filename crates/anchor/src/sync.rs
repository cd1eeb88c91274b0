use rayon::prelude::*;

use crate::builder::build_anchor;
use crate::config::AnchorConfig;
use crate::document::Document;
use crate::strategy::relocate_in;
use crate::types::{Anchor, RelocationResult};

/// Anything that carries an [`Anchor`] the engine can relocate.
pub trait Anchored {
    fn anchor(&self) -> &Anchor;

    /// Replace the anchor after a successful relocation.
    fn set_anchor(&mut self, anchor: Anchor);
}

impl Anchored for Anchor {
    fn anchor(&self) -> &Anchor {
        self
    }

    fn set_anchor(&mut self, anchor: Anchor) {
        *self = anchor;
    }
}

/// Relocation outcome for one annotation
#[derive(Debug, Clone, PartialEq)]
pub struct Relocated<'a, A> {
    pub annotation: &'a A,
    pub relocation: RelocationResult,
    /// Fresh anchor built at the resolved position; `None` when not found
    pub updated_anchor: Option<Anchor>,
}

impl<A> Relocated<'_, A> {
    #[must_use]
    pub const fn is_synced(&self) -> bool {
        self.updated_anchor.is_some()
    }
}

/// Annotations partitioned by whether their anchors could be relocated
#[derive(Debug, Clone, PartialEq)]
pub struct SyncOutcome<A> {
    /// Relocated annotations, anchors replaced, in input order
    pub synced: Vec<A>,

    /// Annotations that could not be relocated, unmodified, in input order
    pub orphaned: Vec<A>,

    /// Indices into `synced` whose anchored text changed
    pub changed: Vec<usize>,
}

impl<A> SyncOutcome<A> {
    #[must_use]
    pub fn total(&self) -> usize {
        self.synced.len() + self.orphaned.len()
    }

    /// Nothing orphaned and no anchored text changed
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.orphaned.is_empty() && self.changed.is_empty()
    }

    /// Synced annotations whose anchored text changed
    pub fn changed_annotations(&self) -> impl Iterator<Item = &A> + '_ {
        self.changed.iter().filter_map(|&idx| self.synced.get(idx))
    }
}

/// Relocate one anchor and rebuild it at the resolved position.
pub(crate) fn relocate_one(
    doc: &Document<'_>,
    anchor: &Anchor,
    config: &AnchorConfig,
) -> (RelocationResult, Option<Anchor>) {
    let relocation = relocate_in(doc, anchor, config);
    let updated_anchor = relocation
        .position()
        .and_then(|(line, end_line)| match build_anchor(doc, line, end_line) {
            Ok(anchor) => Some(anchor),
            Err(err) => {
                log::warn!("could not rebuild anchor at line {line}: {err}");
                None
            }
        });
    (relocation, updated_anchor)
}

/// Relocate every annotation against one document.
pub fn relocate_all<'a, A: Anchored>(
    doc: &Document<'_>,
    annotations: &'a [A],
    config: &AnchorConfig,
) -> Vec<Relocated<'a, A>> {
    annotations
        .iter()
        .map(|annotation| relocated(doc, annotation, config))
        .collect()
}

/// [`relocate_all`] spread across the rayon pool; same output, same order.
pub fn relocate_all_par<'a, A: Anchored + Sync>(
    doc: &Document<'_>,
    annotations: &'a [A],
    config: &AnchorConfig,
) -> Vec<Relocated<'a, A>> {
    annotations
        .par_iter()
        .map(|annotation| relocated(doc, annotation, config))
        .collect()
}

fn relocated<'a, A: Anchored>(
    doc: &Document<'_>,
    annotation: &'a A,
    config: &AnchorConfig,
) -> Relocated<'a, A> {
    let (relocation, updated_anchor) = relocate_one(doc, annotation.anchor(), config);
    Relocated {
        annotation,
        relocation,
        updated_anchor,
    }
}

/// Replace anchors of relocated annotations; collect the rest as orphans.
pub fn sync<A: Anchored>(
    doc: &Document<'_>,
    annotations: Vec<A>,
    config: &AnchorConfig,
) -> SyncOutcome<A> {
    let updates: Vec<_> = annotations
        .iter()
        .map(|annotation| relocate_one(doc, annotation.anchor(), config))
        .collect();
    partition(annotations, updates)
}

/// [`sync`] spread across the rayon pool; same output, same order.
pub fn sync_par<A: Anchored + Sync>(
    doc: &Document<'_>,
    annotations: Vec<A>,
    config: &AnchorConfig,
) -> SyncOutcome<A> {
    let updates: Vec<_> = annotations
        .par_iter()
        .map(|annotation| relocate_one(doc, annotation.anchor(), config))
        .collect();
    partition(annotations, updates)
}

fn partition<A: Anchored>(
    annotations: Vec<A>,
    updates: Vec<(RelocationResult, Option<Anchor>)>,
) -> SyncOutcome<A> {
    let total = annotations.len();
    let mut outcome = SyncOutcome {
        synced: Vec::with_capacity(total),
        orphaned: Vec::new(),
        changed: Vec::new(),
    };

    for (mut annotation, (relocation, updated_anchor)) in annotations.into_iter().zip(updates) {
        match updated_anchor {
            Some(anchor) => {
                if relocation.content_changed {
                    outcome.changed.push(outcome.synced.len());
                }
                annotation.set_anchor(anchor);
                outcome.synced.push(annotation);
            }
            None => outcome.orphaned.push(annotation),
        }
    }

    log::debug!(
        "sync: {} annotations, {} synced ({} changed), {} orphaned",
        total,
        outcome.synced.len(),
        outcome.changed.len(),
        outcome.orphaned.len()
    );
    outcome
}
