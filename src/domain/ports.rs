use crate::domain::model::{CardDocument, CardUpdate};
use crate::utils::error::Result;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// Storage collaborator for cards, keyed by `_id`.
#[async_trait]
pub trait CardStore: Send + Sync {
    /// Short label used in logs and health output.
    fn kind(&self) -> &'static str;

    async fn ping(&self) -> Result<()>;
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<CardDocument>>;
    async fn find_by_name(&self, name: &str) -> Result<Option<CardDocument>>;
    async fn find_all(&self) -> Result<Vec<CardDocument>>;
    async fn insert(&self, card: &CardDocument) -> Result<()>;
    /// Returns the number of matched documents.
    async fn update_fields(&self, id: &ObjectId, update: &CardUpdate) -> Result<u64>;
    /// Returns the number of deleted documents.
    async fn delete(&self, id: &ObjectId) -> Result<u64>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Mongo,
    Memory,
}

pub trait ConfigProvider: Send + Sync {
    fn listen_addr(&self) -> Result<SocketAddr>;
    fn mongo_uri(&self) -> &str;
    fn database(&self) -> &str;
    fn collection(&self) -> &str;
    fn operation_timeout(&self) -> Duration;
    fn connect_timeout(&self) -> Duration;
    fn store_kind(&self) -> StoreKind;
}
