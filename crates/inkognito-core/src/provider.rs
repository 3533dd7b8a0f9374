//! External capability interfaces.
//!
//! The statistical entity recognizer and the context-similarity scorer are
//! black boxes to the pipeline: anything satisfying these traits can be
//! injected at construction, including the deterministic stubs used in
//! tests. The built-in implementations below make the crate usable without
//! an external model process.

use crate::error::RecognizerError;
use std::collections::{BTreeMap, HashSet};

/// One typed span returned by an entity-recognition provider.
///
/// Offsets are UTF-8 byte offsets into the text passed to `recognize`.
/// Labels use the provider's own vocabulary; the NER adapter maps them to
/// the internal taxonomy.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognizedEntity {
    pub start: usize,
    pub end: usize,
    pub label: String,
    pub score: f32,
}

/// Pretrained named-entity recognizer contract.
///
/// Loaded once per process and read-only thereafter. Implementations MUST
/// be safe for concurrent invocation; a wrapper around a non-reentrant
/// model has to serialize calls internally (e.g. behind a `Mutex`) rather
/// than push that burden onto the orchestrator.
pub trait EntityRecognizer: Send + Sync {
    fn recognize(&self, text: &str) -> Result<Vec<RecognizedEntity>, RecognizerError>;
}

/// Context-similarity scorer contract: similarity of a phrase window
/// against a reference corpus, in `[0, 1]`. Stateless for a fixed corpus.
pub trait SimilarityScorer: Send + Sync {
    fn similarity(&self, window: &str, corpus: &[String]) -> f32;
}

/// Term-frequency cosine similarity over lower-cased alphabetic tokens.
///
/// The score is the maximum cosine against any single corpus phrase;
/// single-character tokens are ignored as noise.
#[derive(Debug, Default, Clone, Copy)]
pub struct CosineScorer;

fn term_freq(text: &str) -> BTreeMap<String, f32> {
    let mut tf = BTreeMap::new();
    for token in text.split(|c: char| !c.is_alphabetic()) {
        if token.chars().count() < 2 {
            continue;
        }
        *tf.entry(token.to_lowercase()).or_insert(0.0f32) += 1.0;
    }
    tf
}

fn cosine(a: &BTreeMap<String, f32>, b: &BTreeMap<String, f32>) -> f32 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let dot: f32 = a
        .iter()
        .filter_map(|(term, &wa)| b.get(term).map(|&wb| wa * wb))
        .sum();
    if dot == 0.0 {
        return 0.0;
    }
    let norm = |m: &BTreeMap<String, f32>| m.values().map(|v| v * v).sum::<f32>().sqrt();
    (dot / (norm(a) * norm(b))).clamp(0.0, 1.0)
}

impl SimilarityScorer for CosineScorer {
    fn similarity(&self, window: &str, corpus: &[String]) -> f32 {
        let window_tf = term_freq(window);
        corpus
            .iter()
            .map(|phrase| cosine(&window_tf, &term_freq(phrase)))
            .fold(0.0, f32::max)
    }
}

/// Gazetteer-backed recognizer for German text.
///
/// Person mentions are located through honorific cues (Frau Müller,
/// Dr. Weber) and a first-name lexicon followed by a capitalized surname;
/// medical mentions through small condition/medication/procedure lexicons.
/// Deterministic, which also makes it the reference provider in the
/// integration tests. City and country names are deliberately not part of
/// any lexicon here.
pub struct LexiconRecognizer {
    honorifics: HashSet<&'static str>,
    first_names: HashSet<&'static str>,
    medications: HashSet<&'static str>,
    conditions: HashSet<&'static str>,
    procedures: HashSet<&'static str>,
}

const HONORIFICS: &[&str] = &[
    "Herr", "Herrn", "Frau", "Dr", "Prof", "Anwalt", "Anwältin", "Rechtsanwalt",
];

const FIRST_NAMES: &[&str] = &[
    "Anna", "Andreas", "Ben", "Christian", "Claudia", "Emma", "Felix", "Finn",
    "Hans", "Jan", "Jonas", "Julia", "Katrin", "Laura", "Lena", "Leon", "Lisa",
    "Lukas", "Marie", "Martin", "Max", "Mia", "Michael", "Monika", "Nina",
    "Olaf", "Paul", "Peter", "Robert", "Sabine", "Sarah", "Sophie", "Stefan",
    "Thomas", "Tim",
];

const MEDICATIONS: &[&str] = &[
    "Antibiotika", "Aspirin", "Cortison", "Ibuprofen", "Insulin", "Metformin",
    "Paracetamol",
];

const CONDITIONS: &[&str] = &[
    "Asthma", "Depression", "Diabetes", "Epilepsie", "Grippe", "Hypertonie",
    "Migräne",
];

const PROCEDURES: &[&str] = &[
    "Blutabnahme", "CT", "Dialyse", "Impfung", "MRT", "Röntgen", "Ultraschall",
];

/// Byte spans of whitespace-separated words.
fn words(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = None;
    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                spans.push((s, i));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        spans.push((s, text.len()));
    }
    spans
}

const WORD_PUNCT: &[char] = &['.', ',', ';', ':', '!', '?', '(', ')', '"', '\'', '„', '“', '«', '»'];

/// Strip surrounding punctuation from a word span.
fn trim_word(text: &str, mut start: usize, mut end: usize) -> (usize, usize) {
    while let Some(c) = text[start..end].chars().next() {
        if WORD_PUNCT.contains(&c) {
            start += c.len_utf8();
        } else {
            break;
        }
    }
    while let Some(c) = text[start..end].chars().next_back() {
        if WORD_PUNCT.contains(&c) {
            end -= c.len_utf8();
        } else {
            break;
        }
    }
    (start, end)
}

fn is_capitalized(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => chars.all(|c| c.is_alphabetic() || c == '-'),
        _ => false,
    }
}

impl LexiconRecognizer {
    pub fn new() -> Self {
        Self {
            honorifics: HONORIFICS.iter().copied().collect(),
            first_names: FIRST_NAMES.iter().copied().collect(),
            medications: MEDICATIONS.iter().copied().collect(),
            conditions: CONDITIONS.iter().copied().collect(),
            procedures: PROCEDURES.iter().copied().collect(),
        }
    }

    fn trimmed<'a>(&self, text: &'a str, span: (usize, usize)) -> (usize, usize, &'a str) {
        let (s, e) = trim_word(text, span.0, span.1);
        (s, e, &text[s..e])
    }
}

impl Default for LexiconRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRecognizer for LexiconRecognizer {
    fn recognize(&self, text: &str) -> Result<Vec<RecognizedEntity>, RecognizerError> {
        let word_spans = words(text);
        let mut entities = Vec::new();
        let mut i = 0;

        while i < word_spans.len() {
            let (start, end, word) = self.trimmed(text, word_spans[i]);
            if word.is_empty() {
                i += 1;
                continue;
            }

            if self.medications.contains(word) {
                entities.push(RecognizedEntity { start, end, label: "MED_DRUG".into(), score: 0.80 });
                i += 1;
                continue;
            }
            if self.conditions.contains(word) {
                entities.push(RecognizedEntity { start, end, label: "MED_COND".into(), score: 0.80 });
                i += 1;
                continue;
            }
            if self.procedures.contains(word) {
                entities.push(RecognizedEntity { start, end, label: "MED_PROC".into(), score: 0.80 });
                i += 1;
                continue;
            }

            let is_honorific = self.honorifics.contains(word);
            let is_first = self.first_names.contains(word);
            if is_honorific || is_first {
                // Name words start right after the honorific block, or at
                // the first name itself.
                let mut run = i + 1;
                if is_honorific {
                    while run < word_spans.len() {
                        let (_, _, next) = self.trimmed(text, word_spans[run]);
                        if self.honorifics.contains(next) {
                            run += 1;
                        } else {
                            break;
                        }
                    }
                }
                let name_first = if is_first { i } else { run };
                let mut k = run;
                while k < word_spans.len() {
                    let (_, _, next) = self.trimmed(text, word_spans[k]);
                    if !next.is_empty() && is_capitalized(next) && !self.honorifics.contains(next)
                    {
                        k += 1;
                    } else {
                        break;
                    }
                }
                if k > run {
                    let (span_start, _, _) = self.trimmed(text, word_spans[name_first]);
                    let (_, span_end, _) = self.trimmed(text, word_spans[k - 1]);
                    entities.push(RecognizedEntity {
                        start: span_start,
                        end: span_end,
                        label: "PER".into(),
                        score: 0.85,
                    });
                    i = k;
                    continue;
                }
            }

            i += 1;
        }

        Ok(entities)
    }
}
