use serde::{Deserialize, Serialize};

use crate::sync::Anchored;
use crate::types::Anchor;

/// A comment attached to an anchored location, as sidecar stores persist it.
///
/// The engine only ever reads and replaces `anchor`; ids and timestamps are
/// supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub id: String,

    /// Position tracking; survives line changes
    pub anchor: Anchor,

    #[serde(rename = "type")]
    pub kind: AnnotationType,

    pub author: String,

    /// RFC 3339 creation time
    pub timestamp: String,

    pub content: String,

    pub status: AnnotationStatus,

    #[serde(default)]
    pub replies: Vec<Reply>,
}

impl Annotation {
    /// Create an open annotation with no replies
    pub fn new(
        id: impl Into<String>,
        anchor: Anchor,
        kind: AnnotationType,
        author: impl Into<String>,
        timestamp: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            anchor,
            kind,
            author: author.into(),
            timestamp: timestamp.into(),
            content: content.into(),
            status: AnnotationStatus::Open,
            replies: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == AnnotationStatus::Open
    }

    /// Open blockers hold up approval
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        self.is_open() && self.kind == AnnotationType::Blocker
    }
}

impl Anchored for Annotation {
    fn anchor(&self) -> &Anchor {
        &self.anchor
    }

    fn set_anchor(&mut self, anchor: Anchor) {
        self.anchor = anchor;
    }
}

/// Reply in an annotation thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub id: String,
    pub author: String,
    pub timestamp: String,
    pub content: String,
}

/// Category of an annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationType {
    /// Risk or issue identified
    Concern,
    /// Clarification needed
    Question,
    /// Improvement idea
    Suggestion,
    /// Must be resolved before proceeding
    Blocker,
}

impl AnnotationType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Concern => "concern",
            Self::Question => "question",
            Self::Suggestion => "suggestion",
            Self::Blocker => "blocker",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationStatus {
    #[default]
    Open,
    Resolved,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::create_anchor;
    use crate::config::AnchorConfig;
    use pretty_assertions::assert_eq;

    fn sample() -> Annotation {
        let anchor =
            create_anchor("a\nb\nc\nTARGET\nd\ne\n", 4, None, &AnchorConfig::default())
                .expect("anchor");
        Annotation::new(
            "8c1f2a",
            anchor,
            AnnotationType::Blocker,
            "Ada",
            "2026-01-02T03:04:05Z",
            "Needs a migration plan",
        )
    }

    #[test]
    fn test_new_annotation_is_open_and_blocking() {
        let annotation = sample();
        assert!(annotation.is_open());
        assert!(annotation.is_blocking());
        assert!(annotation.replies.is_empty());

        let resolved = Annotation {
            status: AnnotationStatus::Resolved,
            ..annotation
        };
        assert!(!resolved.is_blocking());
    }

    #[test]
    fn test_sidecar_json_shape() {
        let json = serde_json::to_value(sample()).expect("serialize");
        assert_eq!(json["type"], "blocker");
        assert_eq!(json["status"], "open");
        assert_eq!(json["anchor"]["line"], 4);
        assert_eq!(json["anchor"]["contextBefore"], "b\nc");
        assert!(json["anchor"].get("endLine").is_none());
        assert_eq!(json["replies"], serde_json::json!([]));
    }

    #[test]
    fn test_parses_sidecar_without_replies() {
        let raw = r#"{
            "id": "1",
            "anchor": {
                "line": 2,
                "endLine": 3,
                "contextBefore": "\nx",
                "contextAfter": "y\nz",
                "contentHash": "abcdefabcdef"
            },
            "type": "question",
            "author": "Lin",
            "timestamp": "2026-01-01T00:00:00Z",
            "content": "why?",
            "status": "resolved"
        }"#;
        let annotation: Annotation = serde_json::from_str(raw).expect("parse");
        assert_eq!(annotation.kind, AnnotationType::Question);
        assert_eq!(annotation.status, AnnotationStatus::Resolved);
        assert_eq!(annotation.anchor.end_line, Some(3));
        assert!(annotation.replies.is_empty());
    }

    #[test]
    fn test_type_names() {
        assert_eq!(AnnotationType::Concern.as_str(), "concern");
        assert_eq!(AnnotationType::Suggestion.as_str(), "suggestion");
    }
}
