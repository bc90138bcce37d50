//! Relation label glossary
//!
//! Resolves dependency labels (`nsubj`, `amod`, ...) to short English
//! explanations. The built-in table covers the ClearNLP labels used by the
//! English spaCy models and the Universal Dependencies labels used by most
//! other languages.

use std::borrow::Cow;
use std::collections::BTreeMap;

/// Lookup from relation label to a human-readable gloss
pub trait LabelGlossary {
    /// Explain a label, `None` when it is unknown
    fn explain(&self, label: &str) -> Option<Cow<'_, str>>;

    /// Explain a label, empty when it is unknown
    fn gloss(&self, label: &str) -> Cow<'_, str> {
        self.explain(label).unwrap_or(Cow::Borrowed(""))
    }
}

impl<F> LabelGlossary for F
where
    F: Fn(&str) -> Option<String>,
{
    fn explain(&self, label: &str) -> Option<Cow<'_, str>> {
        self(label).map(Cow::Owned)
    }
}

/// Built-in dependency glossary with optional overrides
#[derive(Debug, Clone, Default)]
pub struct DependencyGlossary {
    overrides: BTreeMap<String, String>,
}

impl DependencyGlossary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries consulted before the built-in table
    pub fn with_overrides(mut self, overrides: BTreeMap<String, String>) -> Self {
        self.overrides = overrides;
        self
    }
}

impl LabelGlossary for DependencyGlossary {
    fn explain(&self, label: &str) -> Option<Cow<'_, str>> {
        if let Some(gloss) = self.overrides.get(label) {
            return Some(Cow::Borrowed(gloss.as_str()));
        }
        builtin_gloss(label)
            .or_else(|| builtin_gloss(&label.to_lowercase()))
            .map(Cow::Borrowed)
    }
}

/// Explanation of a dependency label from the built-in table
pub fn builtin_gloss(label: &str) -> Option<&'static str> {
    let gloss = match label {
        "acl" => "clausal modifier of noun (adjectival clause)",
        "acomp" => "adjectival complement",
        "advcl" => "adverbial clause modifier",
        "advmod" => "adverbial modifier",
        "agent" => "agent",
        "amod" => "adjectival modifier",
        "appos" => "appositional modifier",
        "attr" => "attribute",
        "aux" => "auxiliary",
        "auxpass" => "auxiliary (passive)",
        "case" => "case marking",
        "cc" => "coordinating conjunction",
        "ccomp" => "clausal complement",
        "clf" => "classifier",
        "complm" => "complementizer",
        "compound" => "compound",
        "conj" => "conjunct",
        "cop" => "copula",
        "csubj" => "clausal subject",
        "csubjpass" => "clausal subject (passive)",
        "dative" => "dative",
        "dep" => "unclassified dependent",
        "det" => "determiner",
        "discourse" => "discourse element",
        "dislocated" => "dislocated elements",
        "dobj" => "direct object",
        "expl" => "expletive",
        "fixed" => "fixed multiword expression",
        "flat" => "flat multiword expression",
        "goeswith" => "goes with",
        "hmod" => "modifier in hyphenation",
        "hyph" => "hyphen",
        "infmod" => "infinitival modifier",
        "intj" => "interjection",
        "iobj" => "indirect object",
        "list" => "list",
        "mark" => "marker",
        "meta" => "meta modifier",
        "neg" => "negation modifier",
        "nmod" => "modifier of nominal",
        "nn" => "noun compound modifier",
        "npadvmod" => "noun phrase as adverbial modifier",
        "nsubj" => "nominal subject",
        "nsubjpass" => "nominal subject (passive)",
        "nounmod" => "modifier of nominal",
        "npmod" => "noun phrase as adverbial modifier",
        "num" => "number modifier",
        "number" => "number compound modifier",
        "nummod" => "numeric modifier",
        "oprd" => "object predicate",
        "obj" => "object",
        "obl" => "oblique nominal",
        "orphan" => "orphan",
        "parataxis" => "parataxis",
        "partmod" => "participal modifier",
        "pcomp" => "complement of preposition",
        "pobj" => "object of preposition",
        "poss" => "possession modifier",
        "possessive" => "possessive modifier",
        "preconj" => "pre-correlative conjunction",
        "prep" => "prepositional modifier",
        "prt" => "particle",
        "punct" => "punctuation",
        "quantmod" => "modifier of quantifier",
        "rcmod" => "relative clause modifier",
        "relcl" => "relative clause modifier",
        "reparandum" => "overridden disfluency",
        "root" | "ROOT" => "root",
        "vocative" => "vocative",
        "xcomp" => "open clausal complement",
        _ => return None,
    };
    Some(gloss)
}
