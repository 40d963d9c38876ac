use mongodb::bson::Document;
use serde::{Deserialize, Serialize};

/// A user record as stored in the users collection.
///
/// `id` is the hex form of the document `_id` and stays empty until the
/// record has been inserted. Every other field lives in `profile` and is
/// persisted as-is at the top level of the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(
        rename = "_id",
        default,
        skip_serializing_if = "String::is_empty",
        serialize_with = "object_id::serialize",
        deserialize_with = "object_id::deserialize"
    )]
    pub id: String,

    #[serde(flatten)]
    pub profile: Document,
}

impl User {
    /// A user that has not been persisted yet.
    pub fn new(profile: Document) -> Self {
        Self {
            id: String::new(),
            profile,
        }
    }

    pub fn with_id(id: impl Into<String>, profile: Document) -> Self {
        Self {
            id: id.into(),
            profile,
        }
    }
}

/// `_id` is a native ObjectId in the store but a hex string on `User`.
mod object_id {
    use mongodb::bson::{oid::ObjectId, Bson};
    use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(id: &str, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match ObjectId::parse_str(id) {
            Ok(oid) => oid.serialize(serializer),
            Err(_) => serializer.serialize_str(id),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Bson::deserialize(deserializer)? {
            Bson::ObjectId(oid) => Ok(oid.to_hex()),
            Bson::String(id) => Ok(id),
            other => Err(D::Error::custom(format!("unexpected _id value: {}", other))),
        }
    }
}
