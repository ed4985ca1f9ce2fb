// TF-IDF vectorizer.
//
// Tokens are lowercase runs of 2+ word characters. Stop words (optional)
// are dropped before n-grams are formed. The vocabulary keeps the
// `max_features` terms with the highest corpus frequency, then is indexed
// alphabetically. Weights are raw term counts times smoothed IDF,
// ln((1 + n) / (1 + df)) + 1, with each row scaled to unit L2 norm.

use std::collections::{BTreeMap, HashMap, HashSet};

use ndarray::Array2;
use regex_lite::Regex;
use stop_words::{get, LANGUAGE};
use tracing::info;

use crate::error::FeatureError;

const TOKEN_PATTERN: &str = r"\b\w\w+\b";

/// Stop word list applied before n-gram generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopWords {
    None,
    English,
}

/// Vectorizer settings.
#[derive(Debug, Clone, PartialEq)]
pub struct TfidfParams {
    /// Keep only the most frequent terms across the corpus (default 5000)
    pub max_features: Option<usize>,
    /// Smallest and largest n-gram length, inclusive (default 1-2)
    pub ngram_range: (usize, usize),
    /// Drop terms that appear in fewer documents than this (default 1)
    pub min_df: usize,
    pub lowercase: bool,
    pub stop_words: StopWords,
}

impl Default for TfidfParams {
    fn default() -> Self {
        Self {
            max_features: Some(5000),
            ngram_range: (1, 2),
            min_df: 1,
            lowercase: true,
            stop_words: StopWords::None,
        }
    }
}

/// A vectorizer fitted on a corpus. Holds the vocabulary and IDF weights so
/// new text can be projected into the same feature space.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    params: TfidfParams,
    token_re: Regex,
    stop_words: HashSet<String>,
    vocabulary: HashMap<String, usize>,
    /// Terms ordered by column index
    terms: Vec<String>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn new(params: TfidfParams) -> Self {
        let stop_words = match params.stop_words {
            StopWords::None => HashSet::new(),
            StopWords::English => get(LANGUAGE::English).into_iter().collect(),
        };

        Self {
            params,
            // The pattern is a compile-time constant
            token_re: Regex::new(TOKEN_PATTERN).expect("token pattern is valid"),
            stop_words,
            vocabulary: HashMap::new(),
            terms: Vec::new(),
            idf: Vec::new(),
        }
    }

    /// Learn the vocabulary and IDF weights, then return the document-term matrix.
    pub fn fit_transform(&mut self, docs: &[String]) -> Result<Array2<f64>, FeatureError> {
        self.fit(docs)?;
        self.transform(docs)
    }

    /// Learn the vocabulary and IDF weights from `docs`.
    pub fn fit(&mut self, docs: &[String]) -> Result<(), FeatureError> {
        if docs.is_empty() {
            return Err(FeatureError::NoDocuments);
        }

        // Ordered maps keep ties in the frequency cut alphabetical
        let mut corpus_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut doc_freq: BTreeMap<String, usize> = BTreeMap::new();

        for doc in docs {
            let counts = self.term_counts(doc);
            for (term, count) in counts {
                *corpus_counts.entry(term.clone()).or_insert(0) += count;
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let mut candidates: Vec<(String, usize)> = corpus_counts
            .into_iter()
            .filter(|(term, _)| doc_freq.get(term).copied().unwrap_or(0) >= self.params.min_df)
            .collect();

        if let Some(limit) = self.params.max_features {
            // Stable sort: equal counts stay in alphabetical order
            candidates.sort_by(|a, b| b.1.cmp(&a.1));
            candidates.truncate(limit);
        }

        let mut terms: Vec<String> = candidates.into_iter().map(|(term, _)| term).collect();
        terms.sort();

        if terms.is_empty() {
            return Err(FeatureError::EmptyVocabulary);
        }

        let n_docs = docs.len() as f64;
        self.idf = terms
            .iter()
            .map(|term| {
                let df = doc_freq.get(term).copied().unwrap_or(0) as f64;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();
        self.vocabulary = terms
            .iter()
            .enumerate()
            .map(|(i, term)| (term.clone(), i))
            .collect();
        self.terms = terms;

        info!(
            documents = docs.len(),
            vocabulary = self.terms.len(),
            "TF-IDF vocabulary fitted"
        );

        Ok(())
    }

    /// Project documents onto the fitted vocabulary. Unknown terms are ignored;
    /// a document with no known terms becomes a zero row.
    pub fn transform(&self, docs: &[String]) -> Result<Array2<f64>, FeatureError> {
        if self.terms.is_empty() {
            return Err(FeatureError::NotFitted);
        }

        let mut matrix = Array2::<f64>::zeros((docs.len(), self.terms.len()));

        for (row, doc) in docs.iter().enumerate() {
            for (term, count) in self.term_counts(doc) {
                if let Some(&col) = self.vocabulary.get(&term) {
                    matrix[[row, col]] = count as f64 * self.idf[col];
                }
            }

            let mut row_view = matrix.row_mut(row);
            let norm = row_view.dot(&row_view).sqrt();
            if norm > 0.0 {
                row_view /= norm;
            }
        }

        Ok(matrix)
    }

    /// Number of retained terms (matrix columns).
    pub fn vocabulary_size(&self) -> usize {
        self.terms.len()
    }

    /// Terms in column order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Column index of a term, if it is in the vocabulary.
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// IDF weight per column.
    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    /// Split a document into tokens, dropping stop words.
    pub fn tokenize(&self, doc: &str) -> Vec<String> {
        let text = if self.params.lowercase {
            doc.to_lowercase()
        } else {
            doc.to_string()
        };
        self.token_re
            .find_iter(&text)
            .map(|m| m.as_str().to_string())
            .filter(|token| !self.stop_words.contains(token))
            .collect()
    }

    /// All n-grams of the document within the configured range, counted.
    fn term_counts(&self, doc: &str) -> HashMap<String, usize> {
        let tokens = self.tokenize(doc);
        let (min_n, max_n) = self.params.ngram_range;
        let mut counts = HashMap::new();

        for n in min_n.max(1)..=max_n {
            if n > tokens.len() {
                break;
            }
            for window in tokens.windows(n) {
                *counts.entry(window.join(" ")).or_insert(0) += 1;
            }
        }
        counts
    }
}
