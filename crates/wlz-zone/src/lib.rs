//! WLZ Zone - Word-linkage zone construction
//!
//! Turns dependency-annotated texts into two position-addressed tables:
//! one row per word and one row per dependency edge. Also provides the
//! relation label glossary, the tab-separated table writer and a terminal
//! rendering of the relations.

pub mod builder;
pub mod display;
pub mod glossary;
pub mod stats;
pub mod writer;

pub use builder::LinkageZone;
pub use display::ZoneDisplay;
pub use glossary::{DependencyGlossary, LabelGlossary};
pub use stats::ZoneStats;
pub use writer::{emit, emit_table, write_table, TableRecord, ZoneFiles};
