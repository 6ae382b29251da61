use crate::config::{
    validate_provider, DEFAULT_COLLECTION, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_DATABASE,
    DEFAULT_LISTEN_ADDR, DEFAULT_MONGO_URI, DEFAULT_OPERATION_TIMEOUT_SECS,
};
use crate::core::{ConfigProvider, StoreKind};
use crate::utils::error::{CardError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub database: DatabaseSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSection {
    #[serde(default = "default_store")]
    pub store: StoreKind,
    #[serde(default = "default_uri")]
    pub uri: String,
    #[serde(default = "default_database")]
    pub name: String,
    #[serde(default = "default_collection")]
    pub collection: String,
    pub connect_timeout_seconds: Option<u64>,
    pub operation_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSection {
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub json: bool,
}

fn default_listen_addr() -> String {
    DEFAULT_LISTEN_ADDR.to_string()
}

fn default_store() -> StoreKind {
    StoreKind::Mongo
}

fn default_uri() -> String {
    DEFAULT_MONGO_URI.to_string()
}

fn default_database() -> String {
    DEFAULT_DATABASE.to_string()
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            store: default_store(),
            uri: default_uri(),
            name: default_database(),
            collection: default_collection(),
            connect_timeout_seconds: None,
            operation_timeout_seconds: None,
        }
    }
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| CardError::ConfigError {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CardError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables stay verbatim.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CardError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn verbose(&self) -> bool {
        self.logging.verbose
    }

    pub fn json_logs(&self) -> bool {
        self.logging.json
    }
}

impl ConfigProvider for TomlConfig {
    fn listen_addr(&self) -> Result<SocketAddr> {
        validation::validate_socket_addr("server.listen_addr", &self.server.listen_addr)
    }

    fn mongo_uri(&self) -> &str {
        &self.database.uri
    }

    fn database(&self) -> &str {
        &self.database.name
    }

    fn collection(&self) -> &str {
        &self.database.collection
    }

    fn operation_timeout(&self) -> Duration {
        Duration::from_secs(
            self.database
                .operation_timeout_seconds
                .unwrap_or(DEFAULT_OPERATION_TIMEOUT_SECS),
        )
    }

    fn connect_timeout(&self) -> Duration {
        Duration::from_secs(
            self.database
                .connect_timeout_seconds
                .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
        )
    }

    fn store_kind(&self) -> StoreKind {
        self.database.store
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[server]
listen_addr = "127.0.0.1:8080"

[database]
store = "mongo"
uri = "mongodb://db.internal:27017"
name = "deck"
collection = "cards"
connect_timeout_seconds = 3
operation_timeout_seconds = 2

[logging]
json = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.listen_addr().unwrap().port(), 8080);
        assert_eq!(config.mongo_uri(), "mongodb://db.internal:27017");
        assert_eq!(config.database(), "deck");
        assert_eq!(config.collection(), "cards");
        assert_eq!(config.connect_timeout(), Duration::from_secs(3));
        assert_eq!(config.operation_timeout(), Duration::from_secs(2));
        assert!(config.json_logs());
        assert!(!config.verbose());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.listen_addr().unwrap().port(), 8000);
        assert_eq!(config.collection(), "cardscollection");
        assert_eq!(config.operation_timeout(), Duration::from_secs(5));
        assert_eq!(config.store_kind(), StoreKind::Mongo);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CARD_SERVICE_TEST_MONGO_URI", "mongodb://from-env:27017");

        let toml_content = r#"
[database]
uri = "${CARD_SERVICE_TEST_MONGO_URI}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.mongo_uri(), "mongodb://from-env:27017");

        std::env::remove_var("CARD_SERVICE_TEST_MONGO_URI");
    }

    #[test]
    fn test_unset_env_var_is_left_verbatim() {
        let toml_content = r#"
[database]
uri = "${CARD_SERVICE_TEST_UNSET_VARIABLE}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.mongo_uri(), "${CARD_SERVICE_TEST_UNSET_VARIABLE}");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[server]
listen_addr = "not-an-address"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[server").unwrap_err();
        assert!(matches!(err, CardError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[database]
store = "memory"
name = "file-test"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.database(), "file-test");
        assert_eq!(config.store_kind(), StoreKind::Memory);
    }
}
