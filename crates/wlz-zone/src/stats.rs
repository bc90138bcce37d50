//! Processing statistics
//!
//! Counters updated while the zone is built. `dangling_heads` counts
//! relations dropped because the head could not be resolved inside the
//! sentence.

use serde::{Deserialize, Serialize};

/// Counters for one linkage zone
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneStats {
    /// Documents processed (also the last document number assigned)
    pub documents: usize,
    /// Sentences processed
    pub sentences: usize,
    /// Word records emitted
    pub words: usize,
    /// Relation records emitted
    pub relations: usize,
    /// Tokens skipped because they carry the root label
    pub roots: usize,
    /// Relations dropped because the head lies outside the sentence
    pub dangling_heads: usize,
}

impl ZoneStats {
    /// Share of non-root words that produced a relation (1.0 when there are none)
    pub fn relation_coverage(&self) -> f32 {
        let expected = self.words.saturating_sub(self.roots);
        if expected == 0 {
            1.0
        } else {
            self.relations as f32 / expected as f32
        }
    }

    /// True when no relation was dropped
    pub fn is_clean(&self) -> bool {
        self.dangling_heads == 0
    }
}

impl std::fmt::Display for ZoneStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} documents, {} sentences, {} words, {} relations ({} roots, {} dropped)",
            self.documents,
            self.sentences,
            self.words,
            self.relations,
            self.roots,
            self.dangling_heads
        )
    }
}
