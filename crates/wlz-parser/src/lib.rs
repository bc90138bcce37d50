//! WLZ Parser - Annotators over pre-parsed dependency output
//!
//! Supports reading dependency parses produced upstream in:
//! - CoNLL-U (UDPipe, Stanza, spaCy-conll, treebanks)
//! - spaCy `Doc.to_json()` payloads
//!
//! Each format implements the `Annotator` trait from `wlz-core`, so a text
//! passed to `annotate` is the serialized parse of one document.

use std::path::Path;
use thiserror::Error;

use wlz_core::{Annotator, ModelProvider, WlzError};

pub mod conllu;
pub mod spacy;

pub use conllu::ConlluAnnotator;
pub use spacy::SpacyJsonAnnotator;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur while reading a pre-parsed document
#[derive(Error, Debug)]
pub enum ParserError {
    /// A CoNLL-U token line does not have ten columns
    #[error("Line {line}: expected 10 tab-separated columns, found {found}")]
    ColumnCount { line: usize, found: usize },

    /// A numeric column could not be read
    #[error("Line {line}: invalid {column} value '{value}'")]
    InvalidNumber {
        line: usize,
        column: &'static str,
        value: String,
    },

    /// JSON payload is malformed
    #[error("Invalid spaCy JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Token offsets do not fall on the document text
    #[error("Token {token} has offsets {start}..{end} outside the text")]
    InvalidOffsets {
        token: usize,
        start: usize,
        end: usize,
    },

    /// Unknown format name
    #[error("Unsupported annotation format: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, ParserError>;

impl From<ParserError> for WlzError {
    fn from(err: ParserError) -> Self {
        WlzError::Annotation(err.to_string())
    }
}

// ============================================================================
// Formats
// ============================================================================

/// Supported pre-parsed formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationFormat {
    Conllu,
    SpacyJson,
}

impl AnnotationFormat {
    /// Detect format from extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "conllu" | "conll" => Some(Self::Conllu),
            "json" => Some(Self::SpacyJson),
            _ => None,
        }
    }

    /// Detect format from path
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Build the annotator reading this format
    pub fn annotator(&self) -> Box<dyn Annotator> {
        match self {
            Self::Conllu => Box::new(ConlluAnnotator::new()),
            Self::SpacyJson => Box::new(SpacyJsonAnnotator::new()),
        }
    }
}

impl std::str::FromStr for AnnotationFormat {
    type Err = ParserError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "conllu" | "conll" => Ok(Self::Conllu),
            "spacy-json" | "spacy" | "json" => Ok(Self::SpacyJson),
            _ => Err(ParserError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for AnnotationFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Conllu => write!(f, "conllu"),
            Self::SpacyJson => write!(f, "spacy-json"),
        }
    }
}

// ============================================================================
// Model Provider
// ============================================================================

/// Provider for parses computed ahead of time.
///
/// The named model is the one that produced the files; it is only logged.
/// Nothing needs installing, so `acquire` always succeeds.
pub struct PreparsedProvider {
    format: AnnotationFormat,
}

impl PreparsedProvider {
    pub fn new(format: AnnotationFormat) -> Self {
        Self { format }
    }
}

impl ModelProvider for PreparsedProvider {
    fn load(&self, model: &str) -> wlz_core::Result<Box<dyn Annotator>> {
        tracing::debug!(model, format = %self.format, "Reading pre-parsed annotations");
        Ok(self.format.annotator())
    }

    fn acquire(&self, _model: &str) -> wlz_core::Result<()> {
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
