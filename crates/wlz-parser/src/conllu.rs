//! CoNLL-U reader
//!
//! Reads the ten-column CoNLL-U format. Only syntactic words are kept:
//! multiword token ranges (`1-2`) and empty nodes (`8.1`) are skipped.
//! Sentence-local IDs are shifted by the IDs used in earlier sentences so
//! that every token identifier is unique within the document.

use wlz_core::{AnnotatedSentence, AnnotatedText, AnnotatedToken, Annotator, Head};

use crate::{ParserError, Result};

const COLUMNS: usize = 10;
const COL_ID: usize = 0;
const COL_FORM: usize = 1;
const COL_HEAD: usize = 6;
const COL_DEPREL: usize = 7;

/// Annotator over CoNLL-U documents
#[derive(Debug, Clone, Default)]
pub struct ConlluAnnotator;

impl ConlluAnnotator {
    pub fn new() -> Self {
        Self
    }

    /// Parse a CoNLL-U document
    pub fn parse(&self, input: &str) -> Result<AnnotatedText> {
        let mut sentences = Vec::new();
        let mut tokens = Vec::new();
        let mut id_offset = 0;
        let mut max_local_id = 0;

        for (index, raw) in input.lines().enumerate() {
            let line_number = index + 1;
            let line = raw.trim_end_matches('\r');

            if line.trim().is_empty() {
                if !tokens.is_empty() {
                    sentences.push(AnnotatedSentence::new(std::mem::take(&mut tokens)));
                    id_offset += max_local_id;
                    max_local_id = 0;
                }
                continue;
            }
            if line.starts_with('#') {
                continue;
            }

            let columns: Vec<&str> = line.split('\t').collect();
            if columns.len() != COLUMNS {
                return Err(ParserError::ColumnCount {
                    line: line_number,
                    found: columns.len(),
                });
            }

            let id_field = columns[COL_ID];
            if id_field.contains('-') || id_field.contains('.') {
                continue;
            }

            let local_id = parse_number(id_field, "ID", line_number)?;
            let head = match parse_number(columns[COL_HEAD], "HEAD", line_number)? {
                0 => Head::Root,
                local_head => Head::Token(id_offset + local_head),
            };
            max_local_id = max_local_id.max(local_id);

            tokens.push(AnnotatedToken {
                id: id_offset + local_id,
                form: columns[COL_FORM].to_string(),
                label: columns[COL_DEPREL].to_string(),
                head,
            });
        }

        if !tokens.is_empty() {
            sentences.push(AnnotatedSentence::new(tokens));
        }

        Ok(AnnotatedText::new(sentences))
    }
}

fn parse_number(value: &str, column: &'static str, line: usize) -> Result<usize> {
    value.parse().map_err(|_| ParserError::InvalidNumber {
        line,
        column,
        value: value.to_string(),
    })
}

impl Annotator for ConlluAnnotator {
    fn annotate(&self, text: &str) -> wlz_core::Result<AnnotatedText> {
        Ok(self.parse(text)?)
    }

    fn name(&self) -> &str {
        "conllu"
    }
}
