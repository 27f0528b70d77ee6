//! Users Domain
//!
//! The user resource: entity, storage contract with its MongoDB
//! implementation, and the HTTP operations that register onto a router.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, registered via ResourceHandler
//! └──────┬──────┘
//!        │ one call per request
//! ┌──────▼──────┐
//! │   Storage   │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Mapping   │  ← User <-> BSON document field table
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum::Router;
//! use axum_helpers::ResourceHandler;
//! use domain_users::{MongoUserStorage, UserHandler};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let storage = MongoUserStorage::new(&client.database("mydb"), "users");
//!
//! let router = UserHandler::new(storage).register(Router::new());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod mapping;
pub mod models;
pub mod mongodb;
pub mod storage;

// Re-export commonly used types
pub use error::{UserError, UserResult};
pub use handlers::{ApiDoc, UserHandler};
pub use models::{CreateUser, CreatedResponse, PatchUser, UpdateUser, User, UserPatch, UserResponse};
pub use self::mongodb::MongoUserStorage;
pub use storage::UserStorage;
