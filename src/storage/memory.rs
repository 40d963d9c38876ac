use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};

use super::collection::{DocumentCollection, StoreError, StoreErrorKind, UpdateCounts};

/// In-memory stand-in for a MongoDB collection.
///
/// Clones share state, so a test can keep a handle to inspect call counts
/// after moving the collection into a storage.
#[derive(Clone, Default)]
pub struct MemoryCollection {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    documents: Vec<Document>,
    calls: usize,
    stalled: bool,
    failure: Option<StoreErrorKind>,
    inserted_id: Option<Bson>,
}

impl MemoryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call pends until the caller gives up.
    pub fn stalled() -> Self {
        let collection = Self::default();
        collection.inner.lock().unwrap().stalled = true;
        collection
    }

    /// Every call fails with `kind`.
    pub fn failing(kind: StoreErrorKind) -> Self {
        let collection = Self::default();
        collection.inner.lock().unwrap().failure = Some(kind);
        collection
    }

    /// Inserts report `id` instead of a generated object id.
    pub fn reporting_inserted_id(id: Bson) -> Self {
        let collection = Self::default();
        collection.inner.lock().unwrap().inserted_id = Some(id);
        collection
    }

    /// Stores `document` directly, bypassing the call counter.
    pub fn seed(&self, document: Document) {
        self.inner.lock().unwrap().documents.push(document);
    }

    /// Number of round-trips made against this collection.
    pub fn calls(&self) -> usize {
        self.inner.lock().unwrap().calls
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().documents.len()
    }

    async fn begin(&self) -> Result<(), StoreError> {
        let (stalled, failure) = {
            let mut inner = self.inner.lock().unwrap();
            inner.calls += 1;
            (inner.stalled, inner.failure)
        };

        if stalled {
            std::future::pending::<()>().await;
        }
        match failure {
            Some(kind) => Err(StoreError::new(kind, "injected failure")),
            None => Ok(()),
        }
    }
}

fn has_id(document: &Document, id: &ObjectId) -> bool {
    matches!(document.get("_id"), Some(Bson::ObjectId(stored)) if stored == id)
}

#[async_trait]
impl DocumentCollection for MemoryCollection {
    async fn insert_one(&self, document: Document) -> Result<Bson, StoreError> {
        self.begin().await?;

        let mut inner = self.inner.lock().unwrap();
        let id = match document.get("_id") {
            Some(id) => id.clone(),
            None => Bson::ObjectId(ObjectId::new()),
        };

        let mut stored = Document::new();
        stored.insert("_id", id.clone());
        for (key, value) in document {
            if key != "_id" {
                stored.insert(key, value);
            }
        }
        inner.documents.push(stored);

        Ok(inner.inserted_id.clone().unwrap_or(id))
    }

    async fn find_one_by_id(&self, id: ObjectId) -> Result<Document, StoreError> {
        self.begin().await?;

        let inner = self.inner.lock().unwrap();
        inner
            .documents
            .iter()
            .find(|document| has_id(document, &id))
            .cloned()
            .ok_or_else(StoreError::no_documents)
    }

    async fn find_all(&self) -> Result<Vec<Document>, StoreError> {
        self.begin().await?;
        Ok(self.inner.lock().unwrap().documents.clone())
    }

    async fn update_one_by_id(
        &self,
        id: ObjectId,
        fields: Document,
    ) -> Result<UpdateCounts, StoreError> {
        self.begin().await?;

        let mut inner = self.inner.lock().unwrap();
        let Some(document) = inner.documents.iter_mut().find(|document| has_id(document, &id))
        else {
            return Ok(UpdateCounts::default());
        };

        let before = document.clone();
        for (key, value) in fields {
            document.insert(key, value);
        }

        Ok(UpdateCounts {
            matched: 1,
            modified: u64::from(*document != before),
        })
    }

    async fn delete_one_by_id(&self, id: ObjectId) -> Result<u64, StoreError> {
        self.begin().await?;

        let mut inner = self.inner.lock().unwrap();
        let before = inner.documents.len();
        let position = inner.documents.iter().position(|document| has_id(document, &id));
        if let Some(position) = position {
            inner.documents.remove(position);
        }
        Ok((before - inner.documents.len()) as u64)
    }
}
