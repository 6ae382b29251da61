use crate::domain::model::{parse_card_id, Card, CardDocument, CardUpdate};
use crate::domain::ports::CardStore;
use crate::utils::error::{CardError, Result};
use crate::utils::validation::validate_card_name;
use mongodb::bson::oid::ObjectId;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(5);

/// Card operations over an injected store. Every operation runs under one deadline.
#[derive(Clone)]
pub struct CardRepository {
    store: Arc<dyn CardStore>,
    timeout: Duration,
}

impl CardRepository {
    pub fn new(store: Arc<dyn CardStore>) -> Self {
        Self::with_timeout(store, DEFAULT_OPERATION_TIMEOUT)
    }

    pub fn with_timeout(store: Arc<dyn CardStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    pub fn store_kind(&self) -> &'static str {
        self.store.kind()
    }

    async fn bounded<T, F>(&self, operation: &'static str, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                tracing::error!(operation, timeout = ?self.timeout, "Storage operation timed out");
                Err(CardError::Timeout {
                    operation,
                    seconds: self.timeout.as_secs(),
                })
            }
        }
    }

    /// Inserts a card under a fresh id after checking its name is unused.
    ///
    /// The name check and the insert are separate store calls, so two concurrent creates with
    /// the same name can both succeed.
    pub async fn create(&self, card: Card) -> Result<Card> {
        validate_card_name(&card.name)?;
        let mut document = CardDocument::from_wire(card)?;

        self.bounded("create", async move {
            if self.store.find_by_name(&document.name).await?.is_some() {
                tracing::warn!(name = %document.name, "Card name already taken");
                return Err(CardError::Conflict {
                    name: document.name.clone(),
                });
            }

            document.id = ObjectId::new();
            self.store.insert(&document).await?;
            tracing::debug!(id = %document.id, name = %document.name, "Card created");
            Ok(document.into_wire())
        })
        .await
    }

    pub async fn get(&self, id: &str) -> Result<Card> {
        let oid = parse_card_id(id)?;
        self.bounded("get", async {
            self.store
                .find_by_id(&oid)
                .await?
                .map(CardDocument::into_wire)
                .ok_or(CardError::NotFound)
        })
        .await
    }

    pub async fn list(&self) -> Result<Vec<Card>> {
        self.bounded("list", async {
            let documents = self.store.find_all().await?;
            tracing::debug!(count = documents.len(), "Listed cards");
            Ok(documents.into_iter().map(CardDocument::into_wire).collect())
        })
        .await
    }

    /// Writes only the supplied fields, then re-reads the card.
    ///
    /// Zero matched documents is reported as `NotFound`.
    pub async fn update(&self, id: &str, update: CardUpdate) -> Result<Card> {
        let oid = parse_card_id(id)?;
        if let Some(name) = &update.name {
            validate_card_name(name)?;
        }

        self.bounded("update", async {
            let matched = self.store.update_fields(&oid, &update).await?;
            if matched == 0 {
                return Err(CardError::NotFound);
            }
            tracing::debug!(id = %oid, "Card updated");
            self.store
                .find_by_id(&oid)
                .await?
                .map(CardDocument::into_wire)
                .ok_or(CardError::NotFound)
        })
        .await
    }

    /// Returns the number of deleted cards (0 or 1).
    pub async fn delete(&self, id: &str) -> Result<u64> {
        let oid = parse_card_id(id)?;
        self.bounded("delete", async {
            let deleted = self.store.delete(&oid).await?;
            tracing::debug!(id = %oid, deleted, "Card delete requested");
            Ok(deleted)
        })
        .await
    }

    pub async fn ping(&self) -> Result<()> {
        self.bounded("ping", self.store.ping()).await
    }
}
