//! Document storage.
//!
//! Cards are persisted exactly as submitted, as schemaless BSON documents in
//! a single collection. [`DocumentStore`] is the seam the API handlers go
//! through; [`MongoStore`] is the MongoDB-backed implementation used in
//! production.
pub mod init;

use async_trait::async_trait;
use mongodb::{
    bson::{Bson, Document},
    Client, Collection,
};

/// Name of the database holding the card collection.
pub const DATABASE_NAME: &str = "sampleDatabase";
/// Name of the collection the cards live in.
pub const COLLECTION_NAME: &str = "sampleCollection";

/// Persistence operations the document API needs.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Return every document matching `filter`, in store order.
    async fn find(&self, filter: Document) -> anyhow::Result<Vec<Document>>;
    /// Insert `document` and return the identifier the store filed it under.
    async fn insert(&self, document: Document) -> anyhow::Result<Bson>;
}

/// MongoDB-backed document store.
#[derive(Debug, Clone)]
pub struct MongoStore {
    collection: Collection<Document>,
}

impl MongoStore {
    /// Point a store at the card collection of the given client.
    #[must_use]
    pub fn new(client: &Client) -> Self {
        Self {
            collection: client.database(DATABASE_NAME).collection(COLLECTION_NAME),
        }
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find(&self, filter: Document) -> anyhow::Result<Vec<Document>> {
        let mut cursor = self.collection.find(filter, None).await?;
        let mut documents = Vec::new();
        while cursor.advance().await? {
            documents.push(cursor.deserialize_current()?);
        }
        Ok(documents)
    }

    async fn insert(&self, document: Document) -> anyhow::Result<Bson> {
        let result = self.collection.insert_one(document, None).await?;
        Ok(result.inserted_id)
    }
}
