//! # Ano Anchor
//!
//! Content anchoring for line comments: keep a comment attached to the right
//! line while the file underneath it is edited.
//!
//! ## Philosophy
//!
//! Line numbers break as soon as anything is inserted above them. An
//! [`Anchor`] instead records:
//! - The lines immediately before and after the commented span
//! - A short fingerprint of the commented text itself
//!
//! Relocation is driven by the surrounding context only, so a comment follows
//! its location even when the commented line is rewritten; the fingerprint
//! then reports that the content changed.
//!
//! ## Architecture
//!
//! ```text
//! create_anchor(content, line)
//!     │
//!     └──> context windows + content hash ──> Anchor (persisted by caller)
//!
//! relocate(anchor, new_content)
//!     │
//!     ├──> fast path: original line still matches?
//!     ├──> local window: best line within search_radius
//!     ├──> full file: best line anywhere
//!     │       └─> score = mean(similarity(before), similarity(after))
//!     └──> RelocationResult { found, new_line, confidence, content_changed }
//!
//! sync(annotations, new_content)
//!     └──> synced (fresh anchors) / orphaned (unchanged)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use ano_anchor::{AnchorConfig, Relocator};
//!
//! let relocator = Relocator::new(AnchorConfig::default()).unwrap();
//!
//! let before = "a\nb\nc\nTARGET\nd\ne\n";
//! let anchor = relocator.create_anchor(before, 4, None).unwrap();
//!
//! let after = "x\ny\na\nb\nc\nTARGET\nd\ne\n";
//! let result = relocator.relocate(&anchor, after);
//! assert!(result.found);
//! assert_eq!(result.new_line, Some(6));
//! assert!(!result.content_changed);
//! ```

mod annotation;
mod builder;
mod config;
mod document;
mod error;
mod matcher;
mod relocator;
mod similarity;
mod strategy;
mod sync;
mod types;

pub use annotation::{Annotation, AnnotationStatus, AnnotationType, Reply};
pub use builder::{build_anchor, content_hash, create_anchor, CONTENT_HASH_LEN};
pub use config::{AnchorConfig, LineEndings};
pub use document::Document;
pub use error::{AnchorError, Result};
pub use matcher::score_at;
pub use relocator::Relocator;
pub use similarity::{levenshtein, similarity};
pub use strategy::relocate_in;
pub use sync::{relocate_all, relocate_all_par, sync, sync_par, Anchored, Relocated, SyncOutcome};
pub use types::{Anchor, PositionMatch, RelocationResult};
