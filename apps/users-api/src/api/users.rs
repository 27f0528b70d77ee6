//! Users API routes
//!
//! This module wires the users domain onto MongoDB.

use domain_users::{MongoUserStorage, UserHandler};

use crate::state::AppState;

/// Build the users handler over the configured collection
pub fn handler(state: &AppState) -> UserHandler<MongoUserStorage> {
    let mongodb = &state.config.mongodb;
    let mut storage = MongoUserStorage::new(&state.db, mongodb.collection());

    if let Some(timeout) = mongodb.operation_timeout() {
        storage = storage.with_operation_timeout(timeout);
    }

    UserHandler::new(storage)
}
