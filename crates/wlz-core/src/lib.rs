//! WLZ Core - Records, annotator contracts, and shared types
//!
//! This crate defines the core abstractions used throughout the WLZ system:
//! - Word and relation records of the linkage zone
//! - The annotated-text structure produced by a dependency parser
//! - The `Annotator` and `ModelProvider` capabilities
//! - Language selection and model loading
//! - Common error types
//! - Configuration management

pub mod config;
pub mod language;

pub use config::{
    AppConfig, ConfigError, DisplayConfig, GlossaryConfig, LanguageConfig, LoggingConfig,
    OutputConfig,
};
pub use language::{load_annotator, Language};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for WLZ operations
#[derive(Error, Debug)]
pub enum WlzError {
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Language model {model} is not available: {reason}")]
    ModelUnavailable { model: String, reason: String },

    #[error("Failed to acquire language model {model}: {reason}")]
    AcquisitionFailed { model: String, reason: String },

    #[error("Annotation error: {0}")]
    Annotation(String),

    #[error("IO error writing {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, WlzError>;

// ============================================================================
// Linkage Zone Records
// ============================================================================

/// One word of one sentence of one document.
///
/// `word_number` is the 1-based position of the word inside its sentence,
/// never the identifier the annotator used for the token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordRecord {
    pub document_number: usize,
    pub sentence_number: usize,
    pub word_number: usize,
    pub word_form: String,
}

/// A directed dependency edge `dependent -> head` inside one sentence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationRecord {
    pub document_number: usize,
    pub sentence_number: usize,
    pub dependent_word_number: usize,
    pub head_word_number: usize,
    /// Raw relation label as produced by the annotator (e.g. `nsubj`)
    pub relation_label: String,
}

// ============================================================================
// Annotator Output
// ============================================================================

/// Where a token's syntactic head points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Head {
    /// The token is a sentence root and has no head
    Root,
    /// Identifier of the head token, unique within the annotated text
    Token(usize),
}

/// A token as exposed by the linguistic annotator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedToken {
    /// Identifier unique within the whole annotated text
    pub id: usize,

    /// Surface form
    pub form: String,

    /// Dependency relation label
    pub label: String,

    /// Syntactic head
    pub head: Head,
}

impl AnnotatedToken {
    /// Create a token whose head is another token
    pub fn new(id: usize, form: impl Into<String>, label: impl Into<String>, head: usize) -> Self {
        Self {
            id,
            form: form.into(),
            label: label.into(),
            head: Head::Token(head),
        }
    }

    /// Create a token marked as a root by the head sentinel
    pub fn root(id: usize, form: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id,
            form: form.into(),
            label: label.into(),
            head: Head::Root,
        }
    }
}

/// An ordered sequence of tokens; token order is the word order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedSentence {
    pub tokens: Vec<AnnotatedToken>,
}

impl AnnotatedSentence {
    pub fn new(tokens: Vec<AnnotatedToken>) -> Self {
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Annotator output for a single text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedText {
    pub sentences: Vec<AnnotatedSentence>,
}

impl AnnotatedText {
    pub fn new(sentences: Vec<AnnotatedSentence>) -> Self {
        Self { sentences }
    }

    /// Total number of tokens across all sentences
    pub fn token_count(&self) -> usize {
        self.sentences.iter().map(AnnotatedSentence::len).sum()
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Linguistic annotator: sentence splitting, tokenization and dependency
/// parsing of a single text.
pub trait Annotator {
    /// Annotate one text
    fn annotate(&self, text: &str) -> Result<AnnotatedText>;

    /// Get annotator name for logging
    fn name(&self) -> &str {
        "annotator"
    }
}

impl<F> Annotator for F
where
    F: Fn(&str) -> Result<AnnotatedText>,
{
    fn annotate(&self, text: &str) -> Result<AnnotatedText> {
        self(text)
    }
}

/// Source of annotators for named language models
pub trait ModelProvider {
    /// Load an annotator for the model. Returns `WlzError::ModelUnavailable`
    /// when the model is not installed locally.
    fn load(&self, model: &str) -> Result<Box<dyn Annotator>>;

    /// Install a missing model. May block for a long time.
    fn acquire(&self, model: &str) -> Result<()>;
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_constructors() {
        let token = AnnotatedToken::new(3, "cat", "nsubj", 4);
        assert_eq!(token.head, Head::Token(4));

        let root = AnnotatedToken::root(4, "sleeps", "ROOT");
        assert_eq!(root.head, Head::Root);
        assert_eq!(root.form, "sleeps");
    }

    #[test]
    fn test_token_count() {
        let text = AnnotatedText::new(vec![
            AnnotatedSentence::new(vec![
                AnnotatedToken::root(0, "Hi", "ROOT"),
                AnnotatedToken::new(1, "!", "punct", 0),
            ]),
            AnnotatedSentence::new(vec![AnnotatedToken::root(2, "Bye", "ROOT")]),
        ]);
        assert_eq!(text.token_count(), 3);
        assert!(!text.sentences[0].is_empty());
    }

    #[test]
    fn test_closure_annotator() {
        let annotator = |text: &str| -> Result<AnnotatedText> {
            Ok(AnnotatedText::new(vec![AnnotatedSentence::new(vec![
                AnnotatedToken::root(0, text, "ROOT"),
            ])]))
        };
        let boxed: Box<dyn Annotator> = Box::new(annotator);
        let annotated = boxed.annotate("Hello").unwrap();
        assert_eq!(annotated.sentences[0].tokens[0].form, "Hello");
        assert_eq!(boxed.name(), "annotator");
    }

    #[test]
    fn test_error_display() {
        let err = WlzError::UnsupportedLanguage("xx".to_string());
        assert_eq!(err.to_string(), "Unsupported language: xx");
    }
}
