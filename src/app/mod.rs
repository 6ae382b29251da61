pub mod bootstrap;
pub mod envelope;
pub mod handlers;
pub mod server;

pub use bootstrap::{build_server, connect_store};
pub use envelope::Envelope;
pub use server::{router, serve, AppState, Server, ServerConfig};
