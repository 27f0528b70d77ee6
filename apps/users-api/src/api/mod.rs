//! API routes module
//!
//! This module defines all HTTP API routes for the users service.

pub mod health;
pub mod users;

use axum::Router;
use axum_helpers::register_all;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    let users = users::handler(state);

    register_all(Router::new(), &[&users]).merge(health::router(state.clone()))
}
