use crate::domain::model::{CardDocument, CardUpdate};
use crate::domain::ports::CardStore;
use crate::utils::error::{CardError, Result};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// Process-local card store with the same semantics as the MongoDB adapter.
///
/// Records are kept in insertion order.
#[derive(Debug)]
pub struct InMemoryCardStore {
    cards: RwLock<Vec<CardDocument>>,
    reachable: AtomicBool,
}

impl Default for InMemoryCardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCardStore {
    pub fn new() -> Self {
        Self {
            cards: RwLock::new(Vec::new()),
            reachable: AtomicBool::new(true),
        }
    }

    /// Makes subsequent calls fail as if the backend went away.
    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }

    fn check_reachable(&self) -> Result<()> {
        if self.reachable.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(CardError::BackendError {
                message: "in-memory store is unreachable".to_string(),
            })
        }
    }

    pub async fn len(&self) -> usize {
        self.cards.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.cards.read().await.is_empty()
    }
}

#[async_trait]
impl CardStore for InMemoryCardStore {
    fn kind(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<()> {
        self.check_reachable()
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<CardDocument>> {
        self.check_reachable()?;
        let cards = self.cards.read().await;
        Ok(cards.iter().find(|card| card.id == *id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<CardDocument>> {
        self.check_reachable()?;
        let cards = self.cards.read().await;
        Ok(cards.iter().find(|card| card.name == name).cloned())
    }

    async fn find_all(&self) -> Result<Vec<CardDocument>> {
        self.check_reachable()?;
        Ok(self.cards.read().await.clone())
    }

    async fn insert(&self, card: &CardDocument) -> Result<()> {
        self.check_reachable()?;
        let mut cards = self.cards.write().await;
        if cards.iter().any(|existing| existing.id == card.id) {
            return Err(CardError::BackendError {
                message: format!("duplicate key: _id {}", card.id.to_hex()),
            });
        }
        cards.push(card.clone());
        Ok(())
    }

    async fn update_fields(&self, id: &ObjectId, update: &CardUpdate) -> Result<u64> {
        self.check_reachable()?;
        let mut cards = self.cards.write().await;
        match cards.iter_mut().find(|card| card.id == *id) {
            Some(card) => {
                update.apply_to(card);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: &ObjectId) -> Result<u64> {
        self.check_reachable()?;
        let mut cards = self.cards.write().await;
        let before = cards.len();
        cards.retain(|card| card.id != *id);
        Ok((before - cards.len()) as u64)
    }
}
