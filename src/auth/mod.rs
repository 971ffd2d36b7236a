//! Authentication: signup, signin, token issuance and verification.

mod handlers;
mod jwt;
mod service;

pub use handlers::{signin, signup, SigninRequest, SignupRequest, TokenResponse};
pub use jwt::{Claims, SigningSecret, TokenService};
pub use service::PasswordService;
