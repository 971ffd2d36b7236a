//! Auth gate: bearer header parsing, token verification, and the authenticated context.
//!
//! Protected routers are wrapped with [`require_auth`]; handlers behind it take an
//! [`AuthenticatedContext`] argument to learn who is calling.

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::auth::TokenService;
use crate::error::{AppError, AuthError};
use crate::handlers::http::AppState;

const BEARER_SCHEME: &str = "Bearer";

/// Outcome of parsing the `Authorization` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BearerHeader<'a> {
    Absent,
    /// Present but not exactly `Bearer <token>`.
    Malformed,
    Token(&'a str),
}

impl<'a> BearerHeader<'a> {
    pub fn from_headers(headers: &'a HeaderMap) -> Self {
        Self::parse(headers.get(AUTHORIZATION))
    }

    pub fn parse(value: Option<&'a HeaderValue>) -> Self {
        let Some(value) = value else {
            return BearerHeader::Absent;
        };
        let Ok(value) = value.to_str() else {
            return BearerHeader::Malformed;
        };
        let mut parts = value.split_ascii_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case(BEARER_SCHEME) => {
                BearerHeader::Token(token)
            }
            _ => BearerHeader::Malformed,
        }
    }
}

/// Identity bound to a request once its credential verified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedContext {
    pub subject_id: String,
}

impl AuthenticatedContext {
    /// Subject as a user id. A verified token whose subject is not a user id is still unusable.
    pub fn user_id(&self) -> Result<Uuid, AuthError> {
        Uuid::parse_str(&self.subject_id).map_err(|_| {
            debug!(subject = %self.subject_id, "subject is not a user id");
            AuthError::InvalidCredential
        })
    }
}

/// Run the gate over request headers without touching the rest of the request.
pub fn authenticate(
    tokens: &TokenService,
    headers: &HeaderMap,
) -> Result<AuthenticatedContext, AuthError> {
    let token = match BearerHeader::from_headers(headers) {
        BearerHeader::Absent => {
            debug!("rejected request: missing authorization header");
            return Err(AuthError::MissingCredential);
        }
        BearerHeader::Malformed => {
            debug!("rejected request: malformed authorization header");
            return Err(AuthError::InvalidCredential);
        }
        BearerHeader::Token(token) => token,
    };

    let subject_id = tokens.verify(token).map_err(|e| {
        match &e {
            AuthError::VerificationFault(detail) => warn!(%detail, "token verifier fault"),
            _ => debug!("rejected request: token failed verification"),
        }
        e
    })?;

    Ok(AuthenticatedContext { subject_id })
}

/// Middleware: reject unauthenticated requests, otherwise bind [`AuthenticatedContext`].
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let context = authenticate(state.tokens(), request.headers())?;
    request.extensions_mut().insert(context);
    Ok(next.run(request).await)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Only present when the route sits behind `require_auth`.
        parts
            .extensions
            .get::<AuthenticatedContext>()
            .cloned()
            .ok_or(AppError::Auth(AuthError::MissingCredential))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SigningSecret;

    fn tokens() -> TokenService {
        TokenService::new(&SigningSecret::new("gate-secret").unwrap())
    }

    fn headers(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn parse_absent_header() {
        assert_eq!(BearerHeader::parse(None), BearerHeader::Absent);
    }

    #[test]
    fn parse_bearer_token() {
        let value = HeaderValue::from_static("Bearer abc.def.ghi");
        assert_eq!(
            BearerHeader::parse(Some(&value)),
            BearerHeader::Token("abc.def.ghi")
        );
        let value = HeaderValue::from_static("bearer   abc");
        assert_eq!(BearerHeader::parse(Some(&value)), BearerHeader::Token("abc"));
    }

    #[test]
    fn parse_malformed_headers() {
        for raw in ["Bearer", "Bearer ", "", "abc.def.ghi", "Basic dXNlcjpwdw==", "Bearer a b"] {
            let value = HeaderValue::from_static(raw);
            assert_eq!(
                BearerHeader::parse(Some(&value)),
                BearerHeader::Malformed,
                "header {:?}",
                raw
            );
        }
        let value = HeaderValue::from_bytes(b"Bearer \xfftoken").unwrap();
        assert_eq!(BearerHeader::parse(Some(&value)), BearerHeader::Malformed);
    }

    #[test]
    fn authenticate_binds_subject() {
        let tokens = tokens();
        let token = tokens.issue("u1").unwrap();
        let mut map = HeaderMap::new();
        map.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );
        let ctx = authenticate(&tokens, &map).unwrap();
        assert_eq!(ctx.subject_id, "u1");
        // Same token, separate request: same subject.
        assert_eq!(authenticate(&tokens, &map).unwrap(), ctx);
    }

    #[test]
    fn authenticate_rejects_missing_and_malformed() {
        let tokens = tokens();
        assert!(matches!(
            authenticate(&tokens, &HeaderMap::new()),
            Err(AuthError::MissingCredential)
        ));
        assert!(matches!(
            authenticate(&tokens, &headers("Bearer")),
            Err(AuthError::InvalidCredential)
        ));
        assert!(matches!(
            authenticate(&tokens, &headers("Bearer not-a-real-token")),
            Err(AuthError::InvalidCredential)
        ));
    }

    #[test]
    fn user_id_requires_uuid_subject() {
        let ctx = AuthenticatedContext {
            subject_id: "u1".into(),
        };
        assert!(matches!(ctx.user_id(), Err(AuthError::InvalidCredential)));
        let id = Uuid::new_v4();
        let ctx = AuthenticatedContext {
            subject_id: id.to_string(),
        };
        assert_eq!(ctx.user_id().unwrap(), id);
    }
}
