//! Document store access
//!
//! The persistence engine is an external collaborator: everything in this
//! module speaks to it through the [`DocumentStore`] trait, which exposes
//! count-by-filter and find-with-skip/limit/sort over plain JSON documents.
//! Records cross this boundary as plain data (`serde_json` maps) immediately
//! upon retrieval; typed access happens through [`Collection`].
//!
//! Uniqueness and existence checks issued through this seam are best-effort,
//! time-of-check reads. Two concurrent requests can both pass a `unique`
//! check and both insert; true uniqueness must be enforced by a
//! persistence-layer constraint.

pub mod collection;
pub mod filter;
pub mod memory;
pub mod paginate;
pub mod query;
pub mod scope;

pub use collection::Collection;
pub use filter::Filter;
pub use memory::MemoryStore;
pub use paginate::{PageRequest, PageResult};
pub use scope::{ResourceKind, Subject, scope_for};

use async_trait::async_trait;
use serde_json::Value;

/// A persisted record, already converted to plain data
pub type Document = serde_json::Map<String, Value>;

/// Errors raised by a document store implementation
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store operation timed out: {0}")]
    Timeout(String),

    #[error("malformed document in '{collection}': {reason}")]
    Malformed { collection: String, reason: String },
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Sort specification for find operations
#[derive(Debug, Clone)]
pub struct Sort {
    pub field: String,
    pub order: SortOrder,
}

impl Sort {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Desc,
        }
    }
}

/// Options for find operations
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
    pub sort: Option<Sort>,
}

/// An opaque, async document store reachable by filter predicates.
///
/// Implementations must treat filters as the only selection mechanism;
/// callers never see the store's native query representation.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Count documents matching the filter
    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError>;

    /// Find documents matching the filter, honoring skip/limit/sort
    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        options: &FindOptions,
    ) -> Result<Vec<Document>, StoreError>;

    /// Find the first document matching the filter
    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError>;

    /// Insert a document, assigning an identifier when absent.
    /// Returns the stored document.
    async fn insert_one(&self, collection: &str, doc: Document) -> Result<Document, StoreError>;

    /// Merge `changes` into the first document matching the filter.
    /// `null` values overwrite (references may be detached this way).
    /// Returns the updated document, or `None` when nothing matched.
    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        changes: Document,
    ) -> Result<Option<Document>, StoreError>;

    /// Delete the first document matching the filter.
    /// Returns the deleted document, or `None` when nothing matched.
    async fn delete_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError>;
}
