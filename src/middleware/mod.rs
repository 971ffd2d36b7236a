//! HTTP middleware: the bearer-token auth gate for post routes.

pub mod auth;

pub use auth::{authenticate, require_auth, AuthenticatedContext, BearerHeader};
