//! # Axum Helpers
//!
//! Shared building blocks for the workspace's Axum services.
//!
//! ## Modules
//!
//! - **[`resource`]**: the [`ResourceHandler`] registration contract
//! - **[`server`]**: router assembly, listeners, health checks, graceful shutdown
//! - **[`errors`]**: structured error responses with error codes
//! - **[`extractors`]**: custom extractors (validated JSON)
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::{ResourceHandler, register_all, server::{create_router, serve}};
//! use core_config::server::ServerConfig;
//!
//! let config = ServerConfig::default();
//! let api = register_all(Router::new(), &[&users]);
//! let router = create_router::<ApiDoc>(api, &config);
//! serve(router, &config, Duration::from_secs(30), async {}).await?;
//! ```

pub mod errors;
pub mod extractors;
pub mod resource;
pub mod server;

pub use errors::{AppError, ErrorCode, ErrorResponse};
pub use extractors::ValidatedJson;
pub use resource::{ResourceHandler, register_all};
pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_router, health_router,
    run_health_checks, serve, serve_until,
};
