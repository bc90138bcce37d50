//! Tab-separated table output
//!
//! Each table is written as UTF-8 text: a fixed header row, then one line
//! per record in table order. Tabs and line breaks inside a field are
//! replaced by a space so every record stays on one line.

use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use wlz_core::{OutputConfig, RelationRecord, Result, WlzError, WordRecord};

use crate::builder::LinkageZone;
use crate::glossary::LabelGlossary;

/// A row type of one of the output tables
pub trait TableRecord {
    /// Header row
    const HEADER: &'static [&'static str];

    /// Write this record as one row
    fn write_row<W: Write>(
        &self,
        writer: &mut csv::Writer<W>,
        glossary: &dyn LabelGlossary,
    ) -> csv::Result<()>;
}

impl TableRecord for WordRecord {
    const HEADER: &'static [&'static str] =
        &["TextNumber", "SentenceNumber", "WordNumber", "WordForm"];

    fn write_row<W: Write>(
        &self,
        writer: &mut csv::Writer<W>,
        _glossary: &dyn LabelGlossary,
    ) -> csv::Result<()> {
        writer.serialize((
            self.document_number,
            self.sentence_number,
            self.word_number,
            sanitize(&self.word_form),
        ))
    }
}

impl TableRecord for RelationRecord {
    const HEADER: &'static [&'static str] = &[
        "TextNumber",
        "SentenceNumber",
        "WordNumber1",
        "WordNumber2",
        "Relation",
    ];

    fn write_row<W: Write>(
        &self,
        writer: &mut csv::Writer<W>,
        glossary: &dyn LabelGlossary,
    ) -> csv::Result<()> {
        let gloss = glossary.gloss(&self.relation_label);
        writer.serialize((
            self.document_number,
            self.sentence_number,
            self.dependent_word_number,
            self.head_word_number,
            sanitize(&gloss),
        ))
    }
}

fn sanitize(field: &str) -> Cow<'_, str> {
    if field.contains(['\t', '\n', '\r']) {
        Cow::Owned(field.replace(['\t', '\n', '\r'], " "))
    } else {
        Cow::Borrowed(field)
    }
}

/// Write a table (header + rows) to `out`
pub fn write_table<W: Write, R: TableRecord>(
    out: W,
    records: &[R],
    glossary: &dyn LabelGlossary,
) -> io::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .has_headers(false)
        .from_writer(out);

    writer.write_record(R::HEADER)?;
    for record in records {
        record.write_row(&mut writer, glossary)?;
    }
    writer.flush()
}

/// Write a table to `path`, creating missing parent directories
pub fn emit_table<R: TableRecord>(
    records: &[R],
    path: &Path,
    glossary: &dyn LabelGlossary,
) -> Result<()> {
    let io_error = |source| WlzError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }

    let file = File::create(path).map_err(io_error)?;
    write_table(BufWriter::new(file), records, glossary).map_err(io_error)?;

    tracing::info!(path = %path.display(), rows = records.len(), "Wrote table");
    Ok(())
}

/// Paths of the written tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneFiles {
    pub words: PathBuf,
    pub relations: PathBuf,
}

/// Write both tables of `zone` as configured by `output`
pub fn emit(
    zone: &LinkageZone,
    glossary: &dyn LabelGlossary,
    output: &OutputConfig,
) -> Result<ZoneFiles> {
    let files = ZoneFiles {
        words: output.words_path(),
        relations: output.relations_path(),
    };

    emit_table(zone.words(), &files.words, glossary)?;
    emit_table(zone.relations(), &files.relations, glossary)?;

    Ok(files)
}
