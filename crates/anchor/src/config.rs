use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AnchorError, Result};

/// Tuning for anchor creation and relocation.
///
/// Every [`crate::Relocator`] owns one of these, so several configurations
/// (for example one per file type) can be used side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorConfig {
    /// Lines of context captured on each side of the anchored span
    pub context_lines: usize,

    /// Minimum average context similarity (0-1) to accept a candidate
    pub similarity_threshold: f64,

    /// Lines scanned on each side of the original position before
    /// falling back to a full-file scan
    pub search_radius: usize,

    /// How `\r\n` line endings are treated when splitting content
    pub line_endings: LineEndings,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            context_lines: 2,
            similarity_threshold: 0.6,
            search_radius: 20,
            line_endings: LineEndings::Preserve,
        }
    }
}

impl AnchorConfig {
    /// Config that only accepts near-identical context (fewer false relocations)
    pub fn strict() -> Self {
        Self {
            context_lines: 3,
            similarity_threshold: 0.85,
            ..Default::default()
        }
    }

    /// Config that tolerates heavier rewrites around the anchor (fewer orphans)
    pub fn lenient() -> Self {
        Self {
            similarity_threshold: 0.4,
            search_radius: 50,
            ..Default::default()
        }
    }

    /// Config for prose documents: wider context, CRLF-tolerant
    pub fn for_prose() -> Self {
        Self {
            context_lines: 3,
            search_radius: 40,
            line_endings: LineEndings::Normalize,
            ..Default::default()
        }
    }

    /// Parse a config from TOML. Missing keys fall back to defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        log::debug!("loading anchor config from {}", path.display());
        Self::from_toml_str(&raw)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.context_lines == 0 {
            return Err(AnchorError::invalid_config("context_lines must be > 0"));
        }

        // A zero threshold would accept a scan that matched nothing.
        let threshold = self.similarity_threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(AnchorError::invalid_config(format!(
                "similarity_threshold ({}) must be within (0, 1]",
                self.similarity_threshold
            )));
        }

        Ok(())
    }
}

/// Line-ending policy applied before windowing and hashing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineEndings {
    /// Split on `\n` only; a trailing `\r` stays part of the line
    #[default]
    Preserve,

    /// Strip one trailing `\r` from every line
    Normalize,
}

impl LineEndings {
    #[must_use]
    pub fn apply(self, line: &str) -> &str {
        match self {
            Self::Preserve => line,
            Self::Normalize => line.strip_suffix('\r').unwrap_or(line),
        }
    }
}
