use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use mongodb::error::ErrorKind;
use mongodb::Collection;

use super::collection::{DocumentCollection, StoreError, StoreErrorKind, UpdateCounts};

/// [`DocumentCollection`] backed by a MongoDB collection.
#[derive(Clone)]
pub struct MongoCollection {
    collection: Collection<Document>,
}

impl MongoCollection {
    pub fn new(collection: Collection<Document>) -> Self {
        Self { collection }
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        match *err.kind {
            ErrorKind::BsonDeserialization(_) => {
                StoreError::new(StoreErrorKind::Decode, err.to_string())
            }
            _ => StoreError::other(err.to_string()),
        }
    }
}

#[async_trait]
impl DocumentCollection for MongoCollection {
    async fn insert_one(&self, document: Document) -> Result<Bson, StoreError> {
        let result = self.collection.insert_one(document).await?;
        Ok(result.inserted_id)
    }

    async fn find_one_by_id(&self, id: ObjectId) -> Result<Document, StoreError> {
        self.collection
            .find_one(doc! { "_id": id })
            .await?
            .ok_or_else(StoreError::no_documents)
    }

    async fn find_all(&self) -> Result<Vec<Document>, StoreError> {
        let cursor = self.collection.find(doc! {}).await?;
        let documents = cursor.try_collect().await?;
        Ok(documents)
    }

    async fn update_one_by_id(
        &self,
        id: ObjectId,
        fields: Document,
    ) -> Result<UpdateCounts, StoreError> {
        let result = self
            .collection
            .update_one(doc! { "_id": id }, doc! { "$set": fields })
            .await?;

        Ok(UpdateCounts {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn delete_one_by_id(&self, id: ObjectId) -> Result<u64, StoreError> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count)
    }
}
