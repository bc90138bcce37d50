//! Terminal rendering of the relation table
//!
//! Each relation is shown as `head  - gloss ->  dependent`, with columns
//! aligned on display width so Cyrillic and CJK forms line up.

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::builder::LinkageZone;
use crate::glossary::LabelGlossary;

const HEADERS: [&str; 3] = ["Word 1", "- Relation ->", "Word 2"];
const COLUMN_GAP: usize = 2;

/// Column-aligned view of a zone's relations
pub struct ZoneDisplay<'a> {
    zone: &'a LinkageZone,
    glossary: &'a dyn LabelGlossary,
    color: bool,
}

impl<'a> ZoneDisplay<'a> {
    pub fn new(zone: &'a LinkageZone, glossary: &'a dyn LabelGlossary) -> Self {
        Self {
            zone,
            glossary,
            color: true,
        }
    }

    /// Enable or disable ANSI colors
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Rows as (head form, relation cell, dependent form)
    fn rows(&self) -> Vec<[String; 3]> {
        self.zone
            .relations()
            .iter()
            .map(|rel| {
                let form = |word| {
                    self.zone
                        .word_form(rel.document_number, rel.sentence_number, word)
                        .unwrap_or_default()
                        .to_string()
                };
                // unknown labels show the raw label rather than an empty arrow
                let gloss = self
                    .glossary
                    .explain(&rel.relation_label)
                    .map(|g| g.into_owned())
                    .unwrap_or_else(|| rel.relation_label.clone());

                [
                    form(rel.head_word_number),
                    format!("- {gloss} ->"),
                    form(rel.dependent_word_number),
                ]
            })
            .collect()
    }

    fn paint(&self, cell: String, column: usize, header: bool) -> String {
        if !self.color {
            return cell;
        }
        let painted = match (header, column) {
            (true, _) => cell.yellow(),
            (false, 1) => cell.magenta(),
            (false, _) => cell.cyan(),
        };
        painted.to_string()
    }
}

fn pad(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(UnicodeWidthStr::width(cell));
    format!("{cell}{}", " ".repeat(fill))
}

impl<'a> std::fmt::Display for ZoneDisplay<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rows = self.rows();

        let mut widths = HEADERS.map(UnicodeWidthStr::width);
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(UnicodeWidthStr::width(cell.as_str()));
            }
        }

        let header = HEADERS.map(str::to_string);
        for (index, row) in std::iter::once(&header).chain(rows.iter()).enumerate() {
            let is_header = index == 0;
            let mut line = String::new();
            for (column, cell) in row.iter().enumerate() {
                let last = column == row.len() - 1;
                let text = if last {
                    cell.clone()
                } else {
                    pad(cell, widths[column] + COLUMN_GAP)
                };
                line.push_str(&self.paint(text, column, is_header));
            }
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
