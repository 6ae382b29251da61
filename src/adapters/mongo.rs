use crate::domain::model::{CardDocument, CardUpdate};
use crate::domain::ports::CardStore;
use crate::utils::error::{CardError, Result};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use mongodb::options::{ClientOptions, ReadPreference, SelectionCriteria};
use mongodb::{Client, Collection};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct MongoCardStore {
    client: Client,
    collection: Collection<CardDocument>,
}

impl MongoCardStore {
    /// Connects and pings the primary. Failure here is meant to abort startup.
    pub async fn connect(
        uri: &str,
        database: &str,
        collection: &str,
        connect_timeout: Duration,
    ) -> Result<Self> {
        let mut options = ClientOptions::parse(uri).await?;
        options.app_name = Some("card-service".to_string());
        options.connect_timeout = Some(connect_timeout);
        options.server_selection_timeout = Some(connect_timeout);

        let client = Client::with_options(options)?;
        let store = Self::from_client(client, database, collection);

        tokio::time::timeout(connect_timeout, store.ping())
            .await
            .map_err(|_| CardError::Timeout {
                operation: "connect",
                seconds: connect_timeout.as_secs(),
            })??;

        tracing::info!(database, collection, "Connected to MongoDB");
        Ok(store)
    }

    pub fn from_client(client: Client, database: &str, collection: &str) -> Self {
        let collection = client.database(database).collection::<CardDocument>(collection);
        Self { client, collection }
    }
}

pub(crate) fn set_document(update: &CardUpdate) -> Document {
    let mut fields = Document::new();
    if let Some(name) = &update.name {
        fields.insert("name", name.as_str());
    }
    if let Some(number) = update.number {
        fields.insert("number", number);
    }
    doc! { "$set": fields }
}

#[async_trait]
impl CardStore for MongoCardStore {
    fn kind(&self) -> &'static str {
        "mongodb"
    }

    async fn ping(&self) -> Result<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .selection_criteria(SelectionCriteria::ReadPreference(ReadPreference::Primary))
            .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<CardDocument>> {
        Ok(self.collection.find_one(doc! { "_id": *id }).await?)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<CardDocument>> {
        Ok(self.collection.find_one(doc! { "name": name }).await?)
    }

    async fn find_all(&self) -> Result<Vec<CardDocument>> {
        let cursor = self.collection.find(doc! {}).await?;
        let cards: Vec<CardDocument> = cursor.try_collect().await?;
        Ok(cards)
    }

    async fn insert(&self, card: &CardDocument) -> Result<()> {
        self.collection.insert_one(card).await?;
        Ok(())
    }

    async fn update_fields(&self, id: &ObjectId, update: &CardUpdate) -> Result<u64> {
        // `$set` with an empty document is rejected by the server
        if update.is_empty() {
            return Ok(self.collection.count_documents(doc! { "_id": *id }).await?);
        }
        let result = self
            .collection
            .update_one(doc! { "_id": *id }, set_document(update))
            .await?;
        Ok(result.matched_count)
    }

    async fn delete(&self, id: &ObjectId) -> Result<u64> {
        let result = self.collection.delete_one(doc! { "_id": *id }).await?;
        Ok(result.deleted_count)
    }
}
