// Adapters layer: concrete card stores behind the `CardStore` port.

pub mod memory;
pub mod mongo;

pub use memory::InMemoryCardStore;
pub use mongo::MongoCardStore;
