//! Application state management.

use mongodb::{Client, Database};

/// Shared application state.
///
/// Cloned into the routers that need it (cheap: the client shares its
/// connection pool).
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MongoDB client (cloneable, shares underlying connection pool)
    pub mongo_client: Client,
    /// MongoDB database instance
    pub db: Database,
}
