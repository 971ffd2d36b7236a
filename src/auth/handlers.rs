//! Auth HTTP handlers: signup, signin.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use validator::Validate;

use crate::auth::PasswordService;
use crate::db::{user_create, user_find_by_email};
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::handlers::http::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "invalid email"))]
    pub email: String,
    #[validate(length(min = 6, max = 128, message = "password must be 6-128 characters"))]
    pub password: String,
    #[serde(default)]
    #[validate(length(max = 255, message = "name is too long"))]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SigninRequest {
    #[validate(email(message = "invalid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "password required"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub jwt: String,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// POST /api/v1/user/signup
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<SignupRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let email = normalize_email(&body.email);
    let password_hash = PasswordService::hash(&body.password)?;

    let user = user_create(state.db(), &email, body.name.as_deref(), &password_hash)
        .await
        .map_err(|e| {
            warn!(error = %e, "signup rejected: user insert failed");
            AppError::Forbidden("Invalid".to_string())
        })?
        .ok_or_else(|| {
            debug!("signup rejected: email already registered");
            AppError::Forbidden("Invalid".to_string())
        })?;

    let jwt = state.tokens().issue(&user.id.to_string())?;
    info!(user_id = %user.id, "user signed up");
    Ok(Json(TokenResponse { jwt }))
}

/// POST /api/v1/user/signin
pub async fn signin(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<SigninRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let not_found = || AppError::Forbidden("user not found".to_string());

    let user = user_find_by_email(state.db(), &normalize_email(&body.email))
        .await?
        .ok_or_else(not_found)?;

    if !PasswordService::verify(&body.password, &user.password_hash)? {
        debug!(user_id = %user.id, "signin rejected: wrong password");
        return Err(not_found());
    }

    let jwt = state.tokens().issue(&user.id.to_string())?;
    info!(user_id = %user.id, "user signed in");
    Ok(Json(TokenResponse { jwt }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn signup_requires_email_and_long_password() {
        let ok: SignupRequest =
            serde_json::from_value(json!({ "email": "a@b.co", "password": "secret1" })).unwrap();
        assert!(ok.validate().is_ok());
        assert!(ok.name.is_none());

        let bad: SignupRequest =
            serde_json::from_value(json!({ "email": "nope", "password": "123" })).unwrap();
        let err = bad.validate().unwrap_err();
        assert!(err.field_errors().contains_key("email"));
        assert!(err.field_errors().contains_key("password"));
    }

    #[test]
    fn emails_are_normalized() {
        assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
    }

    #[test]
    fn token_response_uses_jwt_key() {
        let json = serde_json::to_value(TokenResponse { jwt: "t".into() }).unwrap();
        assert_eq!(json, json!({ "jwt": "t" }));
    }
}
