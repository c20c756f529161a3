//! API Module
//!
//! HTTP handlers, middleware and routing for the dashboard REST API.

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

pub use handlers::*;
pub use routes::create_router;
pub use state::AppState;
