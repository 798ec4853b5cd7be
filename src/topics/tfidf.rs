// TF-IDF weighting over the record corpus.
//
// Each record is a separate document for IDF computation: words that appear
// in every comment get downweighted, while words distinctive to a few
// comments get boosted. The fitted vocabulary is shared with the topic model,
// so a column index means the same term in both stages.
//
// Weighting: raw term count x smoothed idf, idf = ln((1 + n) / (1 + df)) + 1,
// then each row is L2-normalised.

use std::collections::{HashMap, HashSet};

use stop_words::{get, LANGUAGE};
use tracing::{debug, info};

use crate::error::AnalysisError;

/// Unicode letters, digits and underscore.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Lower-case a record and split it into candidate terms (stop words not yet removed).
///
/// A term is a maximal run of two or more word characters, so accented
/// words stay whole.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !is_word_char(c))
        .filter(|t| t.chars().nth(1).is_some())
        .map(str::to_string)
        .collect()
}

/// English stop words (the NLTK list) as a lookup set.
pub fn english_stop_words() -> HashSet<String> {
    let words: Vec<String> = get(LANGUAGE::English);
    words.into_iter().map(|w| w.to_lowercase()).collect()
}

/// Ordered term list; a term's index is its column in the TF-IDF matrix.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    terms: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Build from terms that are already sorted and deduplicated.
    fn from_sorted(terms: Vec<String>) -> Self {
        let index = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();
        Self { terms, index }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn term(&self, idx: usize) -> &str {
        &self.terms[idx]
    }

    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

/// Records x vocabulary sparse weight matrix.
#[derive(Debug, Clone)]
pub struct TfIdfMatrix {
    pub vocabulary: Vocabulary,
    /// One row per record: (term index, weight), sorted by term index
    rows: Vec<Vec<(usize, f64)>>,
}

impl TfIdfMatrix {
    pub fn rows(&self) -> &[Vec<(usize, f64)>] {
        &self.rows
    }

    pub fn n_records(&self) -> usize {
        self.rows.len()
    }

    /// Sum of each term's column across all records.
    pub fn column_sums(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.vocabulary.len()];
        for row in &self.rows {
            for &(idx, w) in row {
                sums[idx] += w;
            }
        }
        sums
    }

    /// The `n` terms with the largest aggregate weight, highest first.
    ///
    /// Ties keep vocabulary (lexicographic) order.
    pub fn top_terms(&self, n: usize) -> Vec<(String, f64)> {
        let sums = self.column_sums();
        let mut order: Vec<usize> = (0..sums.len()).collect();
        order.sort_by(|&a, &b| sums[b].total_cmp(&sums[a]));
        order
            .into_iter()
            .take(n)
            .map(|i| (self.vocabulary.term(i).to_string(), sums[i]))
            .collect()
    }
}

/// TF-IDF fitter with English stop-word removal and a bounded vocabulary.
pub struct TfIdfExtractor {
    /// Maximum vocabulary size; the most frequent terms are kept
    pub max_features: usize,
    stop_words: HashSet<String>,
}

impl Default for TfIdfExtractor {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl TfIdfExtractor {
    pub fn new(max_features: usize) -> Self {
        Self {
            max_features,
            stop_words: english_stop_words(),
        }
    }

    /// Fit the vocabulary and weight every record.
    ///
    /// Fails with `EmptyCorpus` when no term survives stop-word removal.
    pub fn fit_transform(&self, records: &[String]) -> Result<TfIdfMatrix, AnalysisError> {
        let docs: Vec<Vec<String>> = records
            .iter()
            .map(|r| {
                tokenize(r)
                    .into_iter()
                    .filter(|t| !self.stop_words.contains(t))
                    .collect()
            })
            .collect();

        // Corpus-wide count and document frequency per term
        let mut term_counts: HashMap<&str, usize> = HashMap::new();
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for doc in &docs {
            let mut seen: HashSet<&str> = HashSet::new();
            for term in doc {
                *term_counts.entry(term.as_str()).or_insert(0) += 1;
                if seen.insert(term.as_str()) {
                    *doc_freq.entry(term.as_str()).or_insert(0) += 1;
                }
            }
        }

        if term_counts.is_empty() {
            return Err(AnalysisError::EmptyCorpus);
        }

        // Keep the most frequent terms; ties go to the lexicographically smaller term
        let mut ranked: Vec<(&str, usize)> = term_counts.into_iter().collect();
        let distinct = ranked.len();
        if ranked.len() > self.max_features {
            ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
            ranked.truncate(self.max_features);
        }
        let mut terms: Vec<String> = ranked.into_iter().map(|(t, _)| t.to_string()).collect();
        terms.sort();
        let vocabulary = Vocabulary::from_sorted(terms);

        let n = docs.len() as f64;
        let idf: Vec<f64> = vocabulary
            .terms()
            .iter()
            .map(|t| {
                let df = doc_freq.get(t.as_str()).copied().unwrap_or(0) as f64;
                ((1.0 + n) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let rows: Vec<Vec<(usize, f64)>> = docs
            .iter()
            .map(|doc| weight_row(doc, &vocabulary, &idf))
            .collect();

        info!(
            records = records.len(),
            distinct_terms = distinct,
            vocabulary = vocabulary.len(),
            "Fitted TF-IDF"
        );
        debug!(terms = ?vocabulary.terms().iter().take(10).collect::<Vec<_>>(), "Vocabulary head");

        Ok(TfIdfMatrix { vocabulary, rows })
    }
}

fn weight_row(doc: &[String], vocabulary: &Vocabulary, idf: &[f64]) -> Vec<(usize, f64)> {
    let mut counts: HashMap<usize, f64> = HashMap::new();
    for term in doc {
        if let Some(idx) = vocabulary.index_of(term) {
            *counts.entry(idx).or_insert(0.0) += 1.0;
        }
    }

    let mut row: Vec<(usize, f64)> = counts
        .into_iter()
        .map(|(idx, tf)| (idx, tf * idf[idx]))
        .collect();
    row.sort_by_key(|&(idx, _)| idx);

    let norm = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for (_, w) in &mut row {
            *w /= norm;
        }
    }
    row
}
