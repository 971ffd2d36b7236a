//! HTTP request handlers.

pub mod blog;
pub mod http;

pub use blog::*;
pub use http::*;
