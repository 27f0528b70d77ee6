//! Resource registration.
//!
//! A resource module owns its routes and their state. It binds them onto a
//! stateless [`Router`] through [`ResourceHandler::register`], so the
//! application assembling the router never sees the entity or its storage.
//!
//! ```ignore
//! let users = UserHandler::new(storage);
//! let api = register_all(Router::new(), &[&users]);
//! ```

use axum::Router;

/// A set of HTTP operations that can attach itself to a router.
pub trait ResourceHandler: Send + Sync {
    /// Bind this resource's routes onto `router` and return it.
    fn register(&self, router: Router) -> Router;
}

/// Register every handler in order onto `router`.
pub fn register_all(router: Router, handlers: &[&dyn ResourceHandler]) -> Router {
    handlers
        .iter()
        .fold(router, |router, handler| handler.register(router))
}
