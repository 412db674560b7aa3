//! TF-IDF vectorization of collected responses.
//!
//! Tokens are lower-cased runs of word characters at least two characters
//! long. Weights use smoothed inverse document frequency,
//! `ln((1 + n) / (1 + df)) + 1`, and every row is L2-normalised.

use domain::models::ResponseSet;
use ndarray::Array2;
use shared::error::SemanticMapError;
use shared::types::Result;
use std::collections::{BTreeSet, HashMap};

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does",
    "did", "will", "would", "could", "should", "may", "might", "must", "can", "shall",
    "this", "that", "these", "those", "i", "you", "he", "she", "it", "we", "they", "me",
    "him", "her", "us", "them", "my", "your", "his", "its", "our", "their", "what", "which",
    "who", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so",
    "than", "too", "very", "just", "now", "here", "there", "then", "once", "also", "as",
    "from", "into", "about", "often", "something", "one",
];

/// Document-term weight matrix plus the vocabulary naming its columns.
#[derive(Debug, Clone)]
pub struct VectorSpace {
    /// Sorted; column `j` of `matrix` is `vocabulary[j]`.
    pub vocabulary: Vec<String>,
    /// One row per response, in response order.
    pub matrix: Array2<f64>,
}

impl VectorSpace {
    pub fn n_documents(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn n_terms(&self) -> usize {
        self.matrix.ncols()
    }
}

pub struct Embedder {
    stop_words: bool,
}

impl Default for Embedder {
    fn default() -> Self {
        Self::new()
    }
}

impl Embedder {
    pub fn new() -> Self {
        Self { stop_words: true }
    }

    /// Keep every token, including common English function words.
    pub fn without_stop_words() -> Self {
        Self { stop_words: false }
    }

    pub fn embed(&self, responses: &ResponseSet) -> Result<VectorSpace> {
        self.fit_transform(&responses.texts())
    }

    pub fn fit_transform(&self, texts: &[&str]) -> Result<VectorSpace> {
        if texts.is_empty() {
            return Err(SemanticMapError::data("no responses to vectorize"));
        }

        let documents: Vec<HashMap<String, usize>> = texts
            .iter()
            .map(|text| {
                let mut counts = HashMap::new();
                for token in self.tokenize(text) {
                    *counts.entry(token).or_insert(0) += 1;
                }
                counts
            })
            .collect();

        let vocabulary: Vec<String> = documents
            .iter()
            .flat_map(|doc| doc.keys().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if vocabulary.is_empty() {
            return Err(SemanticMapError::data(
                "empty vocabulary: every response is empty or contains only stop words",
            ));
        }

        let column: HashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(j, term)| (term.as_str(), j))
            .collect();

        let n = documents.len() as f64;
        let mut idf = vec![0.0; vocabulary.len()];
        for (j, term) in vocabulary.iter().enumerate() {
            let df = documents.iter().filter(|doc| doc.contains_key(term)).count() as f64;
            idf[j] = ((1.0 + n) / (1.0 + df)).ln() + 1.0;
        }

        let mut matrix = Array2::<f64>::zeros((documents.len(), vocabulary.len()));
        for (i, doc) in documents.iter().enumerate() {
            for (term, count) in doc {
                let j = column[term.as_str()];
                matrix[[i, j]] = *count as f64 * idf[j];
            }
            let mut row = matrix.row_mut(i);
            let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                row.mapv_inplace(|v| v / norm);
            }
        }

        tracing::debug!(
            documents = documents.len(),
            terms = vocabulary.len(),
            "built tf-idf matrix"
        );
        Ok(VectorSpace { vocabulary, matrix })
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|token| token.chars().count() >= 2)
            .filter(|token| !self.stop_words || !STOP_WORDS.contains(token))
            .map(str::to_string)
            .collect()
    }
}
