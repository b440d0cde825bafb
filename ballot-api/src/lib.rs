/// Ballot Relay API Library
///
/// HTTP layer of the relay: routes token and ballot requests to a
/// `RelayService` and serves the results as JSON.

pub mod config;
pub mod handlers;
pub mod server;

// Re-export commonly used types
pub use config::{ConfigError, RelayConfig};
pub use handlers::{ApiError, AppState};
pub use server::{cors_layer, create_router, run_server};
