pub mod repository;

pub use crate::domain::model::{Card, CardDocument, CardUpdate};
pub use crate::domain::ports::{CardStore, ConfigProvider, StoreKind};
pub use crate::utils::error::Result;
pub use repository::CardRepository;
