//! Middleware components for request processing.
//!
//! Request ID tracking, request logging, error rendering, authentication
//! and role guards.

mod auth;
mod error_handler;
mod logging;
mod request_id;

pub use auth::{AuthUser, auth_middleware, require_admin, require_owner};
pub use error_handler::attach_request_id;
pub use logging::logging_middleware;
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
