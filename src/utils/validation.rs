use crate::utils::error::{CardError, Result};
use std::net::SocketAddr;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_mongo_uri(field_name: &str, uri: &str) -> Result<()> {
    if uri.is_empty() {
        return Err(CardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: uri.to_string(),
            reason: "URI cannot be empty".to_string(),
        });
    }

    match Url::parse(uri) {
        Ok(url) => match url.scheme() {
            "mongodb" | "mongodb+srv" => Ok(()),
            scheme => Err(CardError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: uri.to_string(),
                reason: format!("Unsupported URI scheme: {}", scheme),
            }),
        },
        Err(e) => Err(CardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: uri.to_string(),
            reason: format!("Invalid URI format: {}", e),
        }),
    }
}

pub fn validate_socket_addr(field_name: &str, addr: &str) -> Result<SocketAddr> {
    addr.parse::<SocketAddr>()
        .map_err(|e| CardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: addr.to_string(),
            reason: format!("Invalid socket address: {}", e),
        })
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(CardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Card names are user input, so failures are reported as invalid input rather than config errors.
pub fn validate_card_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(CardError::invalid_input("Card name cannot be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_mongo_uri() {
        assert!(validate_mongo_uri("database.uri", "mongodb://localhost:27017").is_ok());
        assert!(validate_mongo_uri("database.uri", "mongodb+srv://cluster.example.com").is_ok());
        assert!(validate_mongo_uri("database.uri", "").is_err());
        assert!(validate_mongo_uri("database.uri", "not a uri").is_err());
        assert!(validate_mongo_uri("database.uri", "http://localhost:27017").is_err());
    }

    #[test]
    fn test_validate_socket_addr() {
        let addr = validate_socket_addr("server.listen_addr", "127.0.0.1:8000").unwrap();
        assert_eq!(addr.port(), 8000);
        assert!(validate_socket_addr("server.listen_addr", "localhost").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("operation_timeout_seconds", 5, 1).is_ok());
        assert!(validate_positive_number("operation_timeout_seconds", 0, 1).is_err());
    }

    #[test]
    fn test_validate_card_name_is_invalid_input() {
        assert!(validate_card_name("Ace of Spades").is_ok());
        let err = validate_card_name("   ").unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(validate_non_empty_string("database.name", "").is_err());
    }
}
