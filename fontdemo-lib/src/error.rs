//! Error types.

use std::path::PathBuf;
use thiserror::Error;

/// Why a single `@font-face` rule could not be turned into a demo.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DemoError {
    /// The rule has no usable `font-family`.
    #[error("invalid font family")]
    InvalidFamily,

    /// The `font-weight` token is not one the weight table knows.
    #[error("invalid font weight \"{weight}\"")]
    InvalidWeight { weight: String },
}

impl DemoError {
    pub fn invalid_weight(weight: impl Into<String>) -> Self {
        Self::InvalidWeight {
            weight: weight.into(),
        }
    }

    /// Short, stable name of the condition.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidFamily => "invalid-family",
            Self::InvalidWeight { .. } => "invalid-weight",
        }
    }
}

/// A style sheet whose rules cannot be read.
///
/// Remote sheets, unreadable files and unparseable CSS all end up here; the
/// sheet simply contributes no rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("style sheet {href} is unavailable: {reason}")]
pub struct SheetUnavailable {
    pub href: String,
    pub reason: String,
}

impl SheetUnavailable {
    pub fn new(href: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            reason: reason.into(),
        }
    }
}

/// Fatal errors of the command-line pipeline.
#[derive(Debug, Error)]
pub enum FontDemoError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T, E = FontDemoError> = std::result::Result<T, E>;
