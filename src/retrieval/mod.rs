//! Free-text retrieval: TF-IDF encoding and cosine-similarity search

pub mod index;
pub mod posting;
pub mod text_processor;
pub mod vectorizer;

pub use index::{
    DocumentMetadata, IndexSnapshot, IndexState, IndexedDocument, Partition, SearchHit,
    SharedIndex, SimilarityIndex, StoredDocument,
};
pub use posting::JobPosting;
pub use text_processor::TextProcessor;
pub use vectorizer::{SparseVector, TfIdfVectorizer};
