pub mod toml_config;

use crate::core::{ConfigProvider, StoreKind};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017";
pub const DEFAULT_DATABASE: &str = "cards";
pub const DEFAULT_COLLECTION: &str = "cardscollection";
pub const DEFAULT_OPERATION_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "card-service")]
#[command(about = "HTTP service for managing cards stored in MongoDB")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: String,

    #[arg(long, default_value = DEFAULT_MONGO_URI)]
    pub mongo_uri: String,

    #[arg(long, default_value = DEFAULT_DATABASE)]
    pub database: String,

    #[arg(long, default_value = DEFAULT_COLLECTION)]
    pub collection: String,

    #[arg(long, default_value_t = DEFAULT_OPERATION_TIMEOUT_SECS)]
    pub operation_timeout_secs: u64,

    #[arg(long, default_value_t = DEFAULT_CONNECT_TIMEOUT_SECS)]
    pub connect_timeout_secs: u64,

    #[arg(long, value_enum, default_value_t = StoreKind::Mongo)]
    pub store: StoreKind,

    #[arg(long, help = "Load settings from a TOML file instead of flags")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl ConfigProvider for CliConfig {
    fn listen_addr(&self) -> Result<SocketAddr> {
        validation::validate_socket_addr("listen_addr", &self.listen_addr)
    }

    fn mongo_uri(&self) -> &str {
        &self.mongo_uri
    }

    fn database(&self) -> &str {
        &self.database
    }

    fn collection(&self) -> &str {
        &self.collection
    }

    fn operation_timeout(&self) -> Duration {
        Duration::from_secs(self.operation_timeout_secs)
    }

    fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    fn store_kind(&self) -> StoreKind {
        self.store
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

/// Checks the settings every provider must satisfy before the service starts.
pub fn validate_provider(provider: &dyn ConfigProvider) -> Result<()> {
    provider.listen_addr()?;
    if provider.store_kind() == StoreKind::Mongo {
        validation::validate_mongo_uri("mongo_uri", provider.mongo_uri())?;
    }
    validation::validate_non_empty_string("database", provider.database())?;
    validation::validate_non_empty_string("collection", provider.collection())?;
    validation::validate_positive_number(
        "operation_timeout_secs",
        provider.operation_timeout().as_secs(),
        1,
    )?;
    validation::validate_positive_number(
        "connect_timeout_secs",
        provider.connect_timeout().as_secs(),
        1,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let config = CliConfig::parse_from(["card-service"]);
        assert_eq!(config.listen_addr().unwrap().port(), 8000);
        assert_eq!(config.mongo_uri(), DEFAULT_MONGO_URI);
        assert_eq!(config.database(), "cards");
        assert_eq!(config.collection(), "cardscollection");
        assert_eq!(config.operation_timeout(), Duration::from_secs(5));
        assert_eq!(config.store_kind(), StoreKind::Mongo);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_overrides() {
        let config = CliConfig::parse_from([
            "card-service",
            "--listen-addr",
            "127.0.0.1:9000",
            "--store",
            "memory",
            "--operation-timeout-secs",
            "2",
        ]);
        assert_eq!(config.listen_addr().unwrap().port(), 9000);
        assert_eq!(config.store_kind(), StoreKind::Memory);
        assert_eq!(config.operation_timeout(), Duration::from_secs(2));
    }

    #[test]
    fn test_cli_validation_rejects_zero_timeout() {
        let config = CliConfig::parse_from(["card-service", "--operation-timeout-secs", "0"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_memory_store_skips_uri_check() {
        let config =
            CliConfig::parse_from(["card-service", "--store", "memory", "--mongo-uri", ""]);
        assert!(config.validate().is_ok());
    }
}
