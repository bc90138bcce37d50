//! Linkage zone builder
//!
//! Numbers every word by its position in the sentence and rewrites each
//! dependency edge from annotator token identifiers to those positions.
//!
//! Addressing:
//! - document numbers are assigned in processing order and keep growing
//!   across `process` calls on the same zone
//! - sentence numbers restart at 1 in every document
//! - word numbers restart at 1 in every sentence
//!
//! The identifier -> word number map lives for exactly one sentence, so a
//! head that points into another sentence never resolves.

use std::collections::HashMap;

use wlz_core::{
    load_annotator, AnnotatedSentence, AnnotatedText, Annotator, Head, Language, ModelProvider,
    RelationRecord, Result, WordRecord,
};

use crate::stats::ZoneStats;

/// Default root marker, matching spaCy's `ROOT` and UD's `root`
pub const DEFAULT_ROOT_LABEL: &str = "ROOT";

/// Word and relation tables built from an annotated corpus
pub struct LinkageZone {
    annotator: Box<dyn Annotator>,
    root_label: String,
    words: Vec<WordRecord>,
    relations: Vec<RelationRecord>,
    stats: ZoneStats,
}

impl LinkageZone {
    /// Create an empty zone over an annotator
    pub fn new(annotator: Box<dyn Annotator>) -> Self {
        Self {
            annotator,
            root_label: DEFAULT_ROOT_LABEL.to_string(),
            words: Vec::new(),
            relations: Vec::new(),
            stats: ZoneStats::default(),
        }
    }

    /// Create a zone for a language code, loading its model through `provider`.
    ///
    /// An unsupported code fails before the provider is consulted.
    pub fn for_language(code: &str, provider: &dyn ModelProvider) -> Result<Self> {
        let language: Language = code.parse()?;
        let annotator = load_annotator(provider, language)?;
        tracing::info!(%language, model = language.model_name(), "Loaded annotator");
        Ok(Self::new(annotator))
    }

    /// Set the relation label marking sentence roots
    pub fn with_root_label(mut self, label: impl Into<String>) -> Self {
        self.root_label = label.into();
        self
    }

    pub fn root_label(&self) -> &str {
        &self.root_label
    }

    /// Whether `label` is the root marker (case-insensitive)
    pub fn is_root_label(&self, label: &str) -> bool {
        label.eq_ignore_ascii_case(&self.root_label)
    }

    /// Annotate every text of the corpus and append its words and relations.
    ///
    /// Each text becomes one document. An annotator error stops processing;
    /// documents completed before it stay in the tables.
    pub fn process<S: AsRef<str>>(&mut self, corpus: &[S]) -> Result<()> {
        for text in corpus {
            let annotated = self.annotator.annotate(text.as_ref())?;
            self.add_document(&annotated);
        }

        tracing::info!(annotator = self.annotator.name(), "Processed corpus: {}", self.stats);
        Ok(())
    }

    /// Append one already annotated document and return its document number
    pub fn add_document(&mut self, text: &AnnotatedText) -> usize {
        self.stats.documents += 1;
        let document_number = self.stats.documents;

        for (index, sentence) in text.sentences.iter().enumerate() {
            self.add_sentence(document_number, index + 1, sentence);
        }

        tracing::debug!(
            document = document_number,
            sentences = text.sentences.len(),
            tokens = text.token_count(),
            "Added document"
        );
        document_number
    }

    fn add_sentence(
        &mut self,
        document_number: usize,
        sentence_number: usize,
        sentence: &AnnotatedSentence,
    ) {
        let mut addresses: HashMap<usize, usize> = HashMap::with_capacity(sentence.len());

        for (index, token) in sentence.tokens.iter().enumerate() {
            let word_number = index + 1;
            self.words.push(WordRecord {
                document_number,
                sentence_number,
                word_number,
                word_form: token.form.clone(),
            });
            addresses.entry(token.id).or_insert(word_number);
        }
        self.stats.sentences += 1;
        self.stats.words += sentence.len();

        for (index, token) in sentence.tokens.iter().enumerate() {
            if self.is_root_label(&token.label) {
                self.stats.roots += 1;
                continue;
            }

            let head_word_number = match token.head {
                Head::Token(id) => addresses.get(&id).copied(),
                Head::Root => None,
            };

            match head_word_number {
                Some(head_word_number) => {
                    self.relations.push(RelationRecord {
                        document_number,
                        sentence_number,
                        dependent_word_number: index + 1,
                        head_word_number,
                        relation_label: token.label.clone(),
                    });
                    self.stats.relations += 1;
                }
                None => {
                    self.stats.dangling_heads += 1;
                    tracing::warn!(
                        document = document_number,
                        sentence = sentence_number,
                        word = index + 1,
                        head = ?token.head,
                        label = %token.label,
                        "Head not in sentence, dropping relation"
                    );
                }
            }
        }
    }

    /// Word table in processing order
    pub fn words(&self) -> &[WordRecord] {
        &self.words
    }

    /// Relation table in processing order
    pub fn relations(&self) -> &[RelationRecord] {
        &self.relations
    }

    pub fn stats(&self) -> &ZoneStats {
        &self.stats
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Form of the word at an address.
    ///
    /// The word table is ordered by (document, sentence, word), so this is a
    /// binary search.
    pub fn word_form(
        &self,
        document_number: usize,
        sentence_number: usize,
        word_number: usize,
    ) -> Option<&str> {
        let key = (document_number, sentence_number, word_number);
        self.words
            .binary_search_by_key(&key, |w| {
                (w.document_number, w.sentence_number, w.word_number)
            })
            .ok()
            .map(|index| self.words[index].word_form.as_str())
    }
}

impl std::fmt::Debug for LinkageZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkageZone")
            .field("annotator", &self.annotator.name())
            .field("root_label", &self.root_label)
            .field("stats", &self.stats)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use wlz_core::{AnnotatedToken, WlzError};

    /// Whitespace tokenizer: one sentence per '.'-terminated chunk, first
    /// word of each sentence is the root, every other word depends on it.
    /// Identifiers continue across sentences like spaCy's `token.i`.
    fn stub_annotator() -> Box<dyn Annotator> {
        let annotate = |text: &str| -> Result<AnnotatedText> {
            let mut next_id = 0;
            let sentences = text
                .split_terminator('.')
                .map(|chunk| {
                    let root_id = next_id;
                    let tokens = chunk
                        .split_whitespace()
                        .enumerate()
                        .map(|(i, form)| {
                            let id = next_id;
                            next_id += 1;
                            if i == 0 {
                                AnnotatedToken::new(id, form, "ROOT", id)
                            } else {
                                AnnotatedToken::new(id, form, "dep", root_id)
                            }
                        })
                        .collect();
                    AnnotatedSentence::new(tokens)
                })
                .filter(|s| !s.is_empty())
                .collect();
            Ok(AnnotatedText::new(sentences))
        };
        Box::new(annotate)
    }

    /// "The cat sleeps." as spaCy parses it
    fn cat_annotator() -> Box<dyn Annotator> {
        let annotate = |_: &str| -> Result<AnnotatedText> {
            Ok(AnnotatedText::new(vec![AnnotatedSentence::new(vec![
                AnnotatedToken::new(0, "The", "det", 1),
                AnnotatedToken::new(1, "cat", "nsubj", 2),
                AnnotatedToken::new(2, "sleeps", "ROOT", 2),
                AnnotatedToken::new(3, ".", "punct", 2),
            ])]))
        };
        Box::new(annotate)
    }

    fn fixed_annotator(text: AnnotatedText) -> Box<dyn Annotator> {
        Box::new(move |_: &str| -> Result<AnnotatedText> { Ok(text.clone()) })
    }

    #[test]
    fn test_single_sentence() {
        let mut zone = LinkageZone::new(cat_annotator());
        zone.process(&["The cat sleeps."]).unwrap();

        let forms: Vec<&str> = zone.words().iter().map(|w| w.word_form.as_str()).collect();
        assert_eq!(forms, vec!["The", "cat", "sleeps", "."]);
        assert!(zone
            .words()
            .iter()
            .all(|w| w.document_number == 1 && w.sentence_number == 1));
        let numbers: Vec<usize> = zone.words().iter().map(|w| w.word_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);

        let edges: Vec<(usize, usize, &str)> = zone
            .relations()
            .iter()
            .map(|r| {
                (
                    r.dependent_word_number,
                    r.head_word_number,
                    r.relation_label.as_str(),
                )
            })
            .collect();
        assert_eq!(edges, vec![(1, 2, "det"), (2, 3, "nsubj"), (4, 3, "punct")]);
        assert_eq!(zone.stats().roots, 1);
        assert!(zone.stats().is_clean());
    }

    #[test]
    fn test_two_documents() {
        let mut zone = LinkageZone::new(stub_annotator());
        zone.process(&["Cats sleep.", "Dogs bark loudly."]).unwrap();

        let documents: BTreeSet<usize> = zone.words().iter().map(|w| w.document_number).collect();
        assert_eq!(documents, BTreeSet::from([1, 2]));
        assert!(zone.words().iter().all(|w| w.sentence_number == 1));
        assert_eq!(zone.relations().len(), 3);
    }

    #[test]
    fn test_sentence_numbers_restart_per_document() {
        let mut zone = LinkageZone::new(stub_annotator());
        zone.process(&["A b. C d e. F.", "G h. I."]).unwrap();

        let addresses: Vec<(usize, usize, usize)> = zone
            .words()
            .iter()
            .map(|w| (w.document_number, w.sentence_number, w.word_number))
            .collect();
        assert_eq!(
            addresses,
            vec![
                (1, 1, 1),
                (1, 1, 2),
                (1, 2, 1),
                (1, 2, 2),
                (1, 2, 3),
                (1, 3, 1),
                (2, 1, 1),
                (2, 1, 2),
                (2, 2, 1),
            ]
        );

        // second sentence of document 1: C(1) <- d(2), C(1) <- e(3)
        let sentence_two: Vec<(usize, usize)> = zone
            .relations()
            .iter()
            .filter(|r| r.document_number == 1 && r.sentence_number == 2)
            .map(|r| (r.dependent_word_number, r.head_word_number))
            .collect();
        assert_eq!(sentence_two, vec![(2, 1), (3, 1)]);
    }

    #[test]
    fn test_empty_corpus() {
        let mut zone = LinkageZone::new(stub_annotator());
        let corpus: [&str; 0] = [];
        zone.process(&corpus).unwrap();

        assert!(zone.is_empty());
        assert!(zone.relations().is_empty());
        assert_eq!(zone.stats().documents, 0);
    }

    #[test]
    fn test_head_outside_sentence_is_dropped() {
        let text = AnnotatedText::new(vec![
            AnnotatedSentence::new(vec![
                AnnotatedToken::new(0, "Hello", "ROOT", 0),
                AnnotatedToken::new(1, "world", "obj", 0),
            ]),
            AnnotatedSentence::new(vec![
                AnnotatedToken::new(2, "Again", "ROOT", 2),
                // points back into the first sentence
                AnnotatedToken::new(3, "there", "advmod", 1),
                AnnotatedToken::new(4, "!", "punct", 2),
            ]),
        ]);
        let mut zone = LinkageZone::new(fixed_annotator(text));
        zone.process(&["ignored"]).unwrap();

        assert_eq!(zone.words().len(), 5);
        assert_eq!(zone.relations().len(), 2);
        assert_eq!(zone.stats().dangling_heads, 1);

        let second: Vec<(usize, usize)> = zone
            .relations()
            .iter()
            .filter(|r| r.sentence_number == 2)
            .map(|r| (r.dependent_word_number, r.head_word_number))
            .collect();
        assert_eq!(second, vec![(3, 1)]);
    }

    #[test]
    fn test_root_sentinel_and_case_insensitive_label() {
        let text = AnnotatedText::new(vec![AnnotatedSentence::new(vec![
            AnnotatedToken::root(1, "Run", "root"),
            AnnotatedToken::new(2, "!", "punct", 1),
            // sentinel head without the root label cannot be resolved
            AnnotatedToken::root(3, "now", "advmod"),
        ])]);
        let mut zone = LinkageZone::new(fixed_annotator(text));
        zone.process(&["Run! now"]).unwrap();

        assert_eq!(zone.relations().len(), 1);
        assert_eq!(zone.relations()[0].dependent_word_number, 2);
        assert_eq!(zone.relations()[0].head_word_number, 1);
        assert_eq!(zone.stats().roots, 1);
        assert_eq!(zone.stats().dangling_heads, 1);
    }

    #[test]
    fn test_multiple_roots() {
        let text = AnnotatedText::new(vec![AnnotatedSentence::new(vec![
            AnnotatedToken::new(0, "Yes", "ROOT", 0),
            AnnotatedToken::new(1, "no", "ROOT", 1),
            AnnotatedToken::new(2, "maybe", "conj", 1),
        ])]);
        let mut zone = LinkageZone::new(fixed_annotator(text));
        zone.process(&["x"]).unwrap();

        assert_eq!(zone.relations().len(), 1);
        assert_eq!(zone.stats().roots, 2);
    }

    #[test]
    fn test_custom_root_label() {
        let text = AnnotatedText::new(vec![AnnotatedSentence::new(vec![
            AnnotatedToken::new(0, "Go", "pred", 0),
            AnnotatedToken::new(1, "home", "obj", 0),
        ])]);
        let mut zone = LinkageZone::new(fixed_annotator(text)).with_root_label("pred");
        zone.process(&["Go home"]).unwrap();

        assert_eq!(zone.root_label(), "pred");
        assert_eq!(zone.relations().len(), 1);
    }

    #[test]
    fn test_document_numbers_continue_across_calls() {
        let mut zone = LinkageZone::new(stub_annotator());
        zone.process(&["One."]).unwrap();
        zone.process(&["Two."]).unwrap();

        let documents: Vec<usize> = zone.words().iter().map(|w| w.document_number).collect();
        assert_eq!(documents, vec![1, 2]);
    }

    #[test]
    fn test_empty_text_still_takes_a_document_number() {
        let mut zone = LinkageZone::new(stub_annotator());
        zone.process(&["", "Word."]).unwrap();

        assert_eq!(zone.stats().documents, 2);
        assert_eq!(zone.words()[0].document_number, 2);
    }

    #[test]
    fn test_annotator_error_propagates() {
        let failing = |text: &str| -> Result<AnnotatedText> {
            if text.is_empty() {
                Err(WlzError::Annotation("empty input".to_string()))
            } else {
                Ok(AnnotatedText::new(vec![AnnotatedSentence::new(vec![
                    AnnotatedToken::root(0, text, "ROOT"),
                ])]))
            }
        };
        let mut zone = LinkageZone::new(Box::new(failing));
        let result = zone.process(&["ok", "", "never"]);

        assert!(matches!(result, Err(WlzError::Annotation(_))));
        assert_eq!(zone.words().len(), 1);
        assert_eq!(zone.stats().documents, 1);
    }

    #[test]
    fn test_deterministic_output() {
        let corpus = ["The quick fox. Jumps high.", "Over the dog."];

        let mut first = LinkageZone::new(stub_annotator());
        first.process(&corpus).unwrap();
        let mut second = LinkageZone::new(stub_annotator());
        second.process(&corpus).unwrap();

        assert_eq!(first.words(), second.words());
        assert_eq!(first.relations(), second.relations());
    }

    #[test]
    fn test_word_form_lookup() {
        let mut zone = LinkageZone::new(stub_annotator());
        zone.process(&["A b. C d.", "E f."]).unwrap();

        assert_eq!(zone.word_form(1, 2, 2), Some("d"));
        assert_eq!(zone.word_form(2, 1, 1), Some("E"));
        assert_eq!(zone.word_form(2, 1, 3), None);
        assert_eq!(zone.word_form(3, 1, 1), None);
    }

    #[test]
    fn test_unsupported_language() {
        struct NoProvider;

        impl ModelProvider for NoProvider {
            fn load(&self, _model: &str) -> Result<Box<dyn Annotator>> {
                panic!("load must not be called for an unsupported language");
            }

            fn acquire(&self, _model: &str) -> Result<()> {
                panic!("acquire must not be called for an unsupported language");
            }
        }

        let err = LinkageZone::for_language("xx", &NoProvider).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported language: xx");
    }

    #[test]
    fn test_for_language_loads_model() {
        struct StubProvider;

        impl ModelProvider for StubProvider {
            fn load(&self, model: &str) -> Result<Box<dyn Annotator>> {
                assert_eq!(model, "uk_core_news_lg");
                Ok(cat_annotator())
            }

            fn acquire(&self, _model: &str) -> Result<()> {
                Ok(())
            }
        }

        let mut zone = LinkageZone::for_language("uk", &StubProvider).unwrap();
        zone.process(&["The cat sleeps."]).unwrap();
        assert_eq!(zone.relations().len(), 3);
    }
}
