//! Request and response payloads.

pub mod post;

pub use post::*;
