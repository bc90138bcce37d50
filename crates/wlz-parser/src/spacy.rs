//! spaCy JSON reader
//!
//! Reads the payload written by `Doc.to_json()`. Token and sentence offsets
//! in that payload count characters, not bytes.

use serde::Deserialize;

use wlz_core::{AnnotatedSentence, AnnotatedText, AnnotatedToken, Annotator, Head};

use crate::{ParserError, Result};

#[derive(Debug, Deserialize)]
struct SpacyDoc {
    text: String,
    #[serde(default)]
    sents: Vec<SpacySpan>,
    #[serde(default)]
    tokens: Vec<SpacyToken>,
}

#[derive(Debug, Deserialize)]
struct SpacySpan {
    start: usize,
}

#[derive(Debug, Deserialize)]
struct SpacyToken {
    id: usize,
    start: usize,
    end: usize,
    #[serde(default)]
    dep: String,
    /// Absent when the pipeline has no parser
    head: Option<usize>,
}

/// Annotator over spaCy `Doc.to_json()` documents
#[derive(Debug, Clone, Default)]
pub struct SpacyJsonAnnotator;

impl SpacyJsonAnnotator {
    pub fn new() -> Self {
        Self
    }

    /// Parse one serialized spaCy document
    pub fn parse(&self, input: &str) -> Result<AnnotatedText> {
        let doc: SpacyDoc = serde_json::from_str(input)?;

        // char offset -> byte offset, with one extra entry for the end of text
        let byte_offsets: Vec<usize> = doc
            .text
            .char_indices()
            .map(|(byte, _)| byte)
            .chain(std::iter::once(doc.text.len()))
            .collect();

        let sentence_count = doc.sents.len().max(1);
        let mut grouped: Vec<Vec<AnnotatedToken>> = vec![Vec::new(); sentence_count];

        for token in &doc.tokens {
            let (start, end) = match (byte_offsets.get(token.start), byte_offsets.get(token.end)) {
                (Some(&start), Some(&end)) if start <= end => (start, end),
                _ => {
                    return Err(ParserError::InvalidOffsets {
                        token: token.id,
                        start: token.start,
                        end: token.end,
                    })
                }
            };

            let sentence = doc
                .sents
                .partition_point(|s| s.start <= token.start)
                .saturating_sub(1);

            grouped[sentence].push(AnnotatedToken {
                id: token.id,
                form: doc.text[start..end].to_string(),
                label: token.dep.clone(),
                head: token.head.map(Head::Token).unwrap_or(Head::Root),
            });
        }

        let sentences = grouped
            .into_iter()
            .filter(|tokens| !tokens.is_empty())
            .map(AnnotatedSentence::new)
            .collect();

        Ok(AnnotatedText::new(sentences))
    }
}

impl Annotator for SpacyJsonAnnotator {
    fn annotate(&self, text: &str) -> wlz_core::Result<AnnotatedText> {
        Ok(self.parse(text)?)
    }

    fn name(&self) -> &str {
        "spacy-json"
    }
}
