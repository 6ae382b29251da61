use crate::utils::error::{CardError, Result};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Card as it travels over HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub number: i64,
}

/// Card as it is persisted in the document store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub number: i64,
}

/// Sparse update payload. Only fields that are `Some` are written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CardUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<i64>,
}

impl CardUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.number.is_none()
    }

    /// Applies the supplied fields onto an existing document.
    pub fn apply_to(&self, document: &mut CardDocument) {
        if let Some(name) = &self.name {
            document.name = name.clone();
        }
        if let Some(number) = self.number {
            document.number = number;
        }
    }
}

pub fn parse_card_id(id: &str) -> Result<ObjectId> {
    ObjectId::parse_str(id).map_err(|e| CardError::InvalidId {
        id: id.to_string(),
        reason: e.to_string(),
    })
}

impl CardDocument {
    /// Converts the wire shape into the storage shape.
    ///
    /// A missing id is replaced by a freshly allocated one; a present id must be 24 hex chars.
    pub fn from_wire(card: Card) -> Result<Self> {
        let id = match card.id.as_deref() {
            Some(raw) => parse_card_id(raw)?,
            None => ObjectId::new(),
        };
        Ok(Self {
            id,
            name: card.name,
            number: card.number,
        })
    }

    pub fn into_wire(self) -> Card {
        Card {
            id: Some(self.id.to_hex()),
            name: self.name,
            number: self.number,
        }
    }
}
