//! Server infrastructure module.
//!
//! - router assembly with OpenAPI docs, tracing and timeouts
//! - TCP or Unix socket listeners
//! - liveness and readiness endpoints
//! - graceful shutdown coordination
//!
//! ```ignore
//! use axum_helpers::server::{create_router, health_router, serve};
//! use core_config::app_info;
//!
//! let router = create_router::<ApiDoc>(api_routes, &config.server)
//!     .merge(health_router(app_info!()));
//!
//! serve(router, &config.server, Duration::from_secs(30), async {}).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_router, serve, serve_until};
pub use health::{HealthCheckFuture, HealthResponse, health_router, run_health_checks};
pub use shutdown::ShutdownCoordinator;
