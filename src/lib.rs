pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{InMemoryCardStore, MongoCardStore};
pub use app::{router, Envelope, Server, ServerConfig};
pub use config::{toml_config::TomlConfig, CliConfig};
pub use core::{Card, CardRepository, CardStore, CardUpdate, ConfigProvider, StoreKind};
pub use utils::error::{CardError, Result};
