//! User persistence.
//!
//! [`UserStorage`] is the contract handlers program against.
//! [`DocumentStorage`] implements it over any [`DocumentCollection`],
//! turning store failures into [`StorageError`]s.

pub mod collection;
pub mod error;
#[cfg(test)]
mod memory;
pub mod mongo;

pub use collection::*;
pub use error::*;
pub use mongo::*;

use std::future::Future;

use async_trait::async_trait;
use mongodb::bson::{self, oid::ObjectId, Bson};
use tokio_util::sync::CancellationToken;

use crate::models::User;

#[async_trait]
pub trait UserStorage: Send + Sync {
    /// Persists a new user and returns its assigned identifier.
    async fn create(&self, ctx: &CancellationToken, user: User) -> Result<String, StorageError>;

    async fn find_one(&self, ctx: &CancellationToken, id: &str) -> Result<User, StorageError>;

    /// All users in store order. An empty collection is not an error.
    async fn find_all(&self, ctx: &CancellationToken) -> Result<Vec<User>, StorageError>;

    /// Replaces every field of the user identified by `user.id`.
    async fn update(&self, ctx: &CancellationToken, user: User) -> Result<(), StorageError>;

    async fn delete(&self, ctx: &CancellationToken, id: &str) -> Result<(), StorageError>;
}

/// Stateless [`UserStorage`] over a document collection.
pub struct DocumentStorage<C> {
    collection: C,
}

pub type MongoUserStorage = DocumentStorage<MongoCollection>;

impl<C: DocumentCollection> DocumentStorage<C> {
    pub fn new(collection: C) -> Self {
        Self { collection }
    }
}

fn parse_id(id: &str) -> Result<ObjectId, StorageError> {
    ObjectId::parse_str(id).map_err(|_| StorageError::invalid_identifier(id))
}

/// Races a store call against the caller's token.
async fn cancellable<T, F>(ctx: &CancellationToken, call: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    tokio::select! {
        biased;
        _ = ctx.cancelled() => Err(StoreError::cancelled()),
        result = call => result,
    }
}

#[async_trait]
impl<C: DocumentCollection> UserStorage for DocumentStorage<C> {
    async fn create(&self, ctx: &CancellationToken, user: User) -> Result<String, StorageError> {
        log::debug!("create user");
        let mut document = bson::to_document(&user)
            .map_err(|e| StorageError::persistence("create user", e))?;
        document.remove("_id");

        let inserted_id = cancellable(ctx, self.collection.insert_one(document))
            .await
            .map_err(|e| StorageError::persistence("create user", e))?;

        log::debug!("convert inserted id to object id");
        match inserted_id {
            Bson::ObjectId(oid) => Ok(oid.to_hex()),
            other => {
                log::trace!("{:?}", user);
                Err(StorageError::Conversion(format!(
                    "expected object id, store returned {}",
                    other
                )))
            }
        }
    }

    async fn find_one(&self, ctx: &CancellationToken, id: &str) -> Result<User, StorageError> {
        let oid = parse_id(id)?;

        let document = cancellable(ctx, self.collection.find_one_by_id(oid))
            .await
            .map_err(|e| match e.kind {
                StoreErrorKind::NoDocuments => StorageError::not_found(id),
                _ => StorageError::persistence("find user", format!("id {}: {}", id, e)),
            })?;

        bson::from_document(document).map_err(|e| {
            StorageError::persistence("decode user", format!("id {}: {}", id, e))
        })
    }

    async fn find_all(&self, ctx: &CancellationToken) -> Result<Vec<User>, StorageError> {
        let documents = cancellable(ctx, self.collection.find_all())
            .await
            .map_err(|e| StorageError::persistence("find all users", e))?;

        documents
            .into_iter()
            .map(bson::from_document)
            .collect::<Result<Vec<User>, _>>()
            .map_err(|e| StorageError::persistence("read all users", e))
    }

    async fn update(&self, ctx: &CancellationToken, user: User) -> Result<(), StorageError> {
        let oid = parse_id(&user.id)?;

        let mut fields = bson::to_document(&user).map_err(|e| {
            StorageError::persistence("marshal user", format!("id {}: {}", user.id, e))
        })?;
        fields.remove("_id");

        let counts = cancellable(ctx, self.collection.update_one_by_id(oid, fields))
            .await
            .map_err(|e| {
                StorageError::persistence("update user", format!("id {}: {}", user.id, e))
            })?;

        if counts.matched == 0 {
            return Err(StorageError::not_found(&user.id));
        }
        log::trace!(
            "matched {} documents and modified {}",
            counts.matched,
            counts.modified
        );

        Ok(())
    }

    async fn delete(&self, ctx: &CancellationToken, id: &str) -> Result<(), StorageError> {
        let oid = parse_id(id)?;

        let deleted = cancellable(ctx, self.collection.delete_one_by_id(oid))
            .await
            .map_err(|e| StorageError::persistence("delete user", format!("id {}: {}", id, e)))?;

        if deleted == 0 {
            return Err(StorageError::not_found(id));
        }
        log::trace!("deleted {} documents", deleted);

        Ok(())
    }
}
