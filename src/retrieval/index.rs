//! Two-partition similarity index over resumes and job postings

use crate::config::IndexConfig;
use crate::error::{Result, SkillMatchError};
use crate::retrieval::posting::JobPosting;
use crate::retrieval::vectorizer::{SparseVector, TfIdfVectorizer};
use chrono::{DateTime, Utc};
use log::{debug, info};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

const SNAPSHOT_VERSION: u32 = 1;
const MAX_SHARED_TERMS: usize = 10;

/// Index shared between readers and a single writer at a time.
pub type SharedIndex = Arc<RwLock<SimilarityIndex>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Partition {
    Resumes,
    Jobs,
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Partition::Resumes => f.write_str("resumes"),
            Partition::Jobs => f.write_str("jobs"),
        }
    }
}

impl FromStr for Partition {
    type Err = SkillMatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "resumes" | "resume" => Ok(Partition::Resumes),
            "jobs" | "job" => Ok(Partition::Jobs),
            other => Err(SkillMatchError::invalid(
                "partition",
                format!("must be `resumes` or `jobs`, got `{}`", other),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexState {
    Empty,
    Indexed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
    /// Set by the index when the document is stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexed_at: Option<DateTime<Utc>>,
}

impl DocumentMetadata {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }
}

/// Document text and metadata as persisted in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub metadata: DocumentMetadata,
}

#[derive(Debug, Clone)]
pub struct IndexedDocument {
    pub id: String,
    pub text: String,
    pub metadata: DocumentMetadata,
    vector: SparseVector,
}

impl IndexedDocument {
    pub fn vector(&self) -> &SparseVector {
        &self.vector
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub score: f64,
    pub metadata: DocumentMetadata,
    /// Leading characters of the stored text.
    pub preview: String,
    /// Vocabulary terms present in both the query and the document.
    pub shared_terms: Vec<String>,
}

/// Serialisable corpus, handed to a persistence collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSnapshot {
    pub version: u32,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub resumes: Vec<StoredDocument>,
    #[serde(default)]
    pub jobs: Vec<StoredDocument>,
}

impl IndexSnapshot {
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let snapshot: IndexSnapshot = serde_json::from_str(&content)?;
        if snapshot.version > SNAPSHOT_VERSION {
            return Err(SkillMatchError::invalid(
                "snapshot.version",
                format!("{} is newer than supported version {}", snapshot.version, SNAPSHOT_VERSION),
            ));
        }
        Ok(snapshot)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Resumes and jobs encoded with one shared TF-IDF vocabulary.
///
/// Every mutation refits the vocabulary and re-encodes both partitions, so the
/// index is always consistent after a successful write. The refit is
/// O(documents x vocabulary); past a few tens of thousands of documents an
/// incremental vocabulary would be needed.
pub struct SimilarityIndex {
    config: IndexConfig,
    vectorizer: TfIdfVectorizer,
    resumes: Vec<IndexedDocument>,
    jobs: Vec<IndexedDocument>,
}

impl SimilarityIndex {
    pub fn new(config: IndexConfig) -> Self {
        let vectorizer = TfIdfVectorizer::new(&config);
        Self {
            config,
            vectorizer,
            resumes: Vec::new(),
            jobs: Vec::new(),
        }
    }

    pub fn shared(self) -> SharedIndex {
        Arc::new(RwLock::new(self))
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn state(&self) -> IndexState {
        if self.vectorizer.is_fitted() {
            IndexState::Indexed
        } else {
            IndexState::Empty
        }
    }

    pub fn len(&self, partition: Partition) -> usize {
        self.partition(partition).len()
    }

    pub fn is_empty(&self) -> bool {
        self.resumes.is_empty() && self.jobs.is_empty()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.vocabulary_size()
    }

    pub fn document(&self, partition: Partition, id: &str) -> Option<&IndexedDocument> {
        self.partition(partition).iter().find(|d| d.id == id)
    }

    pub fn ids(&self, partition: Partition) -> impl Iterator<Item = &str> {
        self.partition(partition).iter().map(|d| d.id.as_str())
    }

    /// Insert or replace a document, then refit.
    ///
    /// Text with nothing indexable is rejected and leaves the index untouched.
    pub fn add_document(
        &mut self,
        partition: Partition,
        id: &str,
        text: &str,
        metadata: DocumentMetadata,
    ) -> Result<()> {
        let document = self.prepare(id, text, metadata)?;

        let mut resumes = stored(&self.resumes);
        let mut jobs = stored(&self.jobs);
        let target = match partition {
            Partition::Resumes => &mut resumes,
            Partition::Jobs => &mut jobs,
        };
        let updated = upsert(target, document);

        self.rebuild(resumes, jobs)?;
        info!(
            "{} {} document `{}` ({} resumes, {} jobs)",
            if updated { "Updated" } else { "Added" },
            partition,
            id,
            self.resumes.len(),
            self.jobs.len()
        );
        Ok(())
    }

    /// Insert or replace several documents with a single refit.
    pub fn add_documents(
        &mut self,
        partition: Partition,
        documents: Vec<(String, String, DocumentMetadata)>,
    ) -> Result<()> {
        let mut resumes = stored(&self.resumes);
        let mut jobs = stored(&self.jobs);
        let target = match partition {
            Partition::Resumes => &mut resumes,
            Partition::Jobs => &mut jobs,
        };
        let count = documents.len();
        for (id, text, metadata) in documents {
            upsert(target, self.prepare(&id, &text, metadata)?);
        }

        self.rebuild(resumes, jobs)?;
        info!("Indexed {} {} documents", count, partition);
        Ok(())
    }

    pub fn add_job(&mut self, posting: &JobPosting) -> Result<()> {
        self.add_document(
            Partition::Jobs,
            &posting.id,
            &posting.to_document_text(),
            posting.metadata(),
        )
    }

    /// Remove a document and refit; `false` if it was not indexed.
    pub fn remove_document(&mut self, partition: Partition, id: &str) -> Result<bool> {
        let mut resumes = stored(&self.resumes);
        let mut jobs = stored(&self.jobs);
        let target = match partition {
            Partition::Resumes => &mut resumes,
            Partition::Jobs => &mut jobs,
        };
        let before = target.len();
        target.retain(|d| d.id != id);
        if target.len() == before {
            return Ok(false);
        }

        self.rebuild(resumes, jobs)?;
        info!("Removed {} document `{}`", partition, id);
        Ok(true)
    }

    /// Documents in `partition` most similar to `query`, best first.
    ///
    /// Hits at or below the similarity floor are dropped. An empty partition,
    /// an unfitted index or a query with no known terms yields no hits.
    pub fn search(&self, partition: Partition, query: &str, top_n: usize) -> Vec<SearchHit> {
        let documents = self.partition(partition);
        if documents.is_empty() || top_n == 0 {
            return Vec::new();
        }
        let query_vector = match self.vectorizer.transform(query) {
            Ok(vector) if !vector.is_empty() => vector,
            Ok(_) => return Vec::new(),
            Err(e) => {
                debug!("Search on {} skipped: {}", partition, e);
                return Vec::new();
            }
        };

        let mut scored: Vec<(&IndexedDocument, f64)> = documents
            .iter()
            .map(|doc| (doc, query_vector.cosine(&doc.vector)))
            .filter(|(_, score)| *score > self.config.similarity_floor)
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(top_n);

        debug!(
            "Search on {} returned {} of {} documents",
            partition,
            scored.len(),
            documents.len()
        );

        scored
            .into_iter()
            .map(|(doc, score)| SearchHit {
                id: doc.id.clone(),
                score,
                metadata: doc.metadata.clone(),
                preview: preview(&doc.text, self.config.preview_chars),
                shared_terms: query_vector
                    .shared_indices(&doc.vector)
                    .into_iter()
                    .filter_map(|idx| self.vectorizer.feature_name(idx))
                    .take(MAX_SHARED_TERMS)
                    .map(str::to_string)
                    .collect(),
            })
            .collect()
    }

    pub fn snapshot(&self) -> IndexSnapshot {
        IndexSnapshot {
            version: SNAPSHOT_VERSION,
            created_at: Utc::now(),
            resumes: stored(&self.resumes),
            jobs: stored(&self.jobs),
        }
    }

    /// Rebuild an index from a snapshot with one refit.
    pub fn restore(config: IndexConfig, snapshot: IndexSnapshot) -> Result<Self> {
        let mut index = Self::new(config);
        for (partition, documents) in [
            (Partition::Resumes, &snapshot.resumes),
            (Partition::Jobs, &snapshot.jobs),
        ] {
            for document in documents {
                if index.vectorizer.term_count(&document.text) == 0 {
                    return Err(SkillMatchError::EmptyDocument(format!(
                        "{}/{}",
                        partition, document.id
                    )));
                }
            }
        }
        index.rebuild(snapshot.resumes, snapshot.jobs)?;
        info!(
            "Restored index with {} resumes and {} jobs",
            index.resumes.len(),
            index.jobs.len()
        );
        Ok(index)
    }

    fn partition(&self, partition: Partition) -> &[IndexedDocument] {
        match partition {
            Partition::Resumes => &self.resumes,
            Partition::Jobs => &self.jobs,
        }
    }

    fn prepare(&self, id: &str, text: &str, mut metadata: DocumentMetadata) -> Result<StoredDocument> {
        if id.trim().is_empty() {
            return Err(SkillMatchError::invalid("document.id", "must not be empty"));
        }
        if self.vectorizer.term_count(text) == 0 {
            return Err(SkillMatchError::EmptyDocument(id.to_string()));
        }
        metadata.indexed_at = Some(Utc::now());
        Ok(StoredDocument {
            id: id.to_string(),
            text: text.to_string(),
            metadata,
        })
    }

    /// Refit on resumes then jobs; the current state survives a failed refit.
    fn rebuild(&mut self, resumes: Vec<StoredDocument>, jobs: Vec<StoredDocument>) -> Result<()> {
        let mut vectorizer = TfIdfVectorizer::new(&self.config);
        let texts: Vec<&str> = resumes
            .iter()
            .chain(jobs.iter())
            .map(|d| d.text.as_str())
            .collect();
        let mut vectors = vectorizer.fit_transform(&texts)?.into_iter();

        let mut encode = |documents: Vec<StoredDocument>| -> Vec<IndexedDocument> {
            documents
                .into_iter()
                .map(|d| IndexedDocument {
                    id: d.id,
                    text: d.text,
                    metadata: d.metadata,
                    vector: vectors.next().unwrap_or_default(),
                })
                .collect()
        };
        let resumes = encode(resumes);
        let jobs = encode(jobs);

        debug!(
            "Refitted index: {} resumes, {} jobs, {} features",
            resumes.len(),
            jobs.len(),
            vectorizer.vocabulary_size()
        );

        self.vectorizer = vectorizer;
        self.resumes = resumes;
        self.jobs = jobs;
        Ok(())
    }
}

fn stored(documents: &[IndexedDocument]) -> Vec<StoredDocument> {
    documents
        .iter()
        .map(|d| StoredDocument {
            id: d.id.clone(),
            text: d.text.clone(),
            metadata: d.metadata.clone(),
        })
        .collect()
}

/// Replace in place when the id exists, else append. Returns whether it replaced.
fn upsert(documents: &mut Vec<StoredDocument>, document: StoredDocument) -> bool {
    match documents.iter_mut().find(|d| d.id == document.id) {
        Some(existing) => {
            *existing = document;
            true
        }
        None => {
            documents.push(document);
            false
        }
    }
}

fn preview(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= max_chars {
        trimmed.to_string()
    } else {
        let cut: String = trimmed.chars().take(max_chars).collect();
        format!("{}...", cut.trim_end())
    }
}
