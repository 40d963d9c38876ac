use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use thiserror::Error;

/// What went wrong inside a [`DocumentCollection`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    /// The filter matched nothing.
    NoDocuments,
    /// A stored document could not be decoded.
    Decode,
    /// The caller's token fired before the store answered.
    Cancelled,
    Other,
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct StoreError {
    pub kind: StoreErrorKind,
    pub message: String,
}

impl StoreError {
    pub fn new(kind: StoreErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn no_documents() -> Self {
        Self::new(StoreErrorKind::NoDocuments, "no documents in result")
    }

    pub fn cancelled() -> Self {
        Self::new(StoreErrorKind::Cancelled, "operation cancelled")
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::Other, message)
    }
}

/// Outcome of a single-document update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateCounts {
    pub matched: u64,
    pub modified: u64,
}

/// Minimal surface of a document collection keyed by object id.
///
/// Each call is one round-trip against the store.
#[async_trait]
pub trait DocumentCollection: Send + Sync {
    /// Inserts `document` and returns the `_id` the store assigned.
    async fn insert_one(&self, document: Document) -> Result<Bson, StoreError>;

    /// Fails with [`StoreErrorKind::NoDocuments`] when `id` is absent.
    async fn find_one_by_id(&self, id: ObjectId) -> Result<Document, StoreError>;

    async fn find_all(&self) -> Result<Vec<Document>, StoreError>;

    /// Applies `fields` as a `$set` on the document with `id`.
    async fn update_one_by_id(
        &self,
        id: ObjectId,
        fields: Document,
    ) -> Result<UpdateCounts, StoreError>;

    /// Returns the number of deleted documents.
    async fn delete_one_by_id(&self, id: ObjectId) -> Result<u64, StoreError>;
}
