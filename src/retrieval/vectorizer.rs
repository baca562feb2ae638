//! TF-IDF document vectorizer

use crate::config::IndexConfig;
use crate::error::{Result, SkillMatchError};
use crate::retrieval::text_processor::TextProcessor;
use log::debug;
use std::collections::HashMap;

/// Sparse term-weight vector, sorted by feature index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    fn from_counts(counts: HashMap<usize, f64>) -> Self {
        let mut entries: Vec<(usize, f64)> = counts.into_iter().filter(|(_, w)| *w != 0.0).collect();
        entries.sort_by_key(|(idx, _)| *idx);
        Self { entries }
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_idx, a_w) = self.entries[i];
            let (b_idx, b_w) = other.entries[j];
            match a_idx.cmp(&b_idx) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_w * b_w;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    /// Cosine similarity; 0.0 when either vector is all zeros.
    pub fn cosine(&self, other: &SparseVector) -> f64 {
        let norms = self.norm() * other.norm();
        if norms == 0.0 {
            0.0
        } else {
            (self.dot(other) / norms).clamp(-1.0, 1.0)
        }
    }

    /// Feature indices present in both vectors.
    pub fn shared_indices(&self, other: &SparseVector) -> Vec<usize> {
        let theirs: std::collections::HashSet<usize> = other.entries.iter().map(|(i, _)| *i).collect();
        self.entries
            .iter()
            .map(|(i, _)| *i)
            .filter(|i| theirs.contains(i))
            .collect()
    }

    fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in &mut self.entries {
                *w /= norm;
            }
        }
    }
}

/// Term-frequency times smoothed inverse-document-frequency encoder.
///
/// The vocabulary is rebuilt from scratch on every fit; there is no
/// incremental update.
pub struct TfIdfVectorizer {
    processor: TextProcessor,
    max_features: usize,
    min_df: usize,
    max_df: f64,
    ngram_max: usize,
    /// Feature names in index order (alphabetical).
    features: Vec<String>,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfIdfVectorizer {
    pub fn new(config: &IndexConfig) -> Self {
        Self {
            processor: TextProcessor::new(),
            max_features: config.max_features,
            min_df: config.min_df.max(1),
            max_df: config.max_df,
            ngram_max: config.ngram_max.max(1),
            features: Vec::new(),
            vocabulary: HashMap::new(),
            idf: Vec::new(),
        }
    }

    pub fn is_fitted(&self) -> bool {
        !self.features.is_empty()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.features.len()
    }

    pub fn feature_name(&self, index: usize) -> Option<&str> {
        self.features.get(index).map(String::as_str)
    }

    pub fn processor(&self) -> &TextProcessor {
        &self.processor
    }

    /// Number of indexable terms in `text`; zero means it cannot be encoded.
    pub fn term_count(&self, text: &str) -> usize {
        self.processor.terms(text, self.ngram_max).len()
    }

    /// Forget the current vocabulary.
    pub fn reset(&mut self) {
        self.features.clear();
        self.vocabulary.clear();
        self.idf.clear();
    }

    pub fn fit(&mut self, documents: &[&str]) -> Result<()> {
        if documents.is_empty() {
            self.reset();
            return Ok(());
        }

        let n_docs = documents.len();
        let mut document_frequency: HashMap<String, usize> = HashMap::new();
        let mut corpus_frequency: HashMap<String, usize> = HashMap::new();

        for document in documents {
            let terms = self.processor.terms(document, self.ngram_max);
            let mut seen = std::collections::HashSet::new();
            for term in terms {
                *corpus_frequency.entry(term.clone()).or_default() += 1;
                if seen.insert(term.clone()) {
                    *document_frequency.entry(term).or_default() += 1;
                }
            }
        }

        if document_frequency.is_empty() {
            return Err(SkillMatchError::EmptyDocument("corpus".to_string()));
        }

        let max_doc_count = self.max_df * n_docs as f64;
        let above_min: Vec<&String> = document_frequency
            .iter()
            .filter(|(_, df)| **df >= self.min_df)
            .map(|(term, _)| term)
            .collect();
        let mut kept: Vec<&String> = above_min
            .iter()
            .copied()
            .filter(|term| document_frequency[*term] as f64 <= max_doc_count)
            .collect();
        if kept.is_empty() {
            debug!("max_df pruning would empty the vocabulary; skipping it");
            kept = above_min;
        }
        if kept.is_empty() {
            return Err(SkillMatchError::EmptyDocument("corpus".to_string()));
        }

        if kept.len() > self.max_features {
            kept.sort_by(|a, b| {
                corpus_frequency[*b]
                    .cmp(&corpus_frequency[*a])
                    .then_with(|| a.cmp(b))
            });
            kept.truncate(self.max_features);
        }
        kept.sort();

        self.features = kept.into_iter().cloned().collect();
        self.vocabulary = self
            .features
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx))
            .collect();
        self.idf = self
            .features
            .iter()
            .map(|term| {
                let df = document_frequency[term] as f64;
                ((1.0 + n_docs as f64) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        debug!(
            "Fitted vectorizer on {} documents ({} features)",
            n_docs,
            self.features.len()
        );
        Ok(())
    }

    pub fn transform(&self, document: &str) -> Result<SparseVector> {
        if !self.is_fitted() {
            return Err(SkillMatchError::NotFitted);
        }

        let mut counts: HashMap<usize, f64> = HashMap::new();
        for term in self.processor.terms(document, self.ngram_max) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                *counts.entry(idx).or_default() += 1.0;
            }
        }
        for (idx, weight) in counts.iter_mut() {
            *weight *= self.idf[*idx];
        }

        let mut vector = SparseVector::from_counts(counts);
        vector.normalize();
        Ok(vector)
    }

    pub fn fit_transform(&mut self, documents: &[&str]) -> Result<Vec<SparseVector>> {
        self.fit(documents)?;
        if !self.is_fitted() {
            return Ok(Vec::new());
        }
        documents.iter().map(|d| self.transform(d)).collect()
    }
}
