use crate::adapters::{InMemoryCardStore, MongoCardStore};
use crate::app::server::{Server, ServerConfig};
use crate::core::{CardRepository, CardStore, ConfigProvider, StoreKind};
use crate::utils::error::Result;
use std::sync::Arc;

/// Opens the configured store. A MongoDB connection that cannot be pinged is an error.
pub async fn connect_store(provider: &dyn ConfigProvider) -> Result<Arc<dyn CardStore>> {
    match provider.store_kind() {
        StoreKind::Mongo => {
            tracing::info!(
                database = provider.database(),
                collection = provider.collection(),
                "Connecting to MongoDB"
            );
            let store = MongoCardStore::connect(
                provider.mongo_uri(),
                provider.database(),
                provider.collection(),
                provider.connect_timeout(),
            )
            .await?;
            Ok(Arc::new(store))
        }
        StoreKind::Memory => {
            tracing::warn!("Using in-memory card store; data is lost on exit");
            Ok(Arc::new(InMemoryCardStore::new()))
        }
    }
}

pub async fn build_server(provider: &dyn ConfigProvider) -> Result<Server> {
    let addr = provider.listen_addr()?;
    let store = connect_store(provider).await?;
    let repository = CardRepository::with_timeout(store, provider.operation_timeout());
    Ok(Server::new(ServerConfig { addr }, repository))
}
