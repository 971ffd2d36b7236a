//! Token issuance and verification (HS256 JWT carrying `{ id }`).

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

const ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub id: String, // subject (user id)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

/// Process-wide signing secret. Never empty.
#[derive(Clone)]
pub struct SigningSecret(Arc<str>);

impl SigningSecret {
    pub fn new(secret: impl Into<String>) -> Result<Self, AuthError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(AuthError::Configuration("signing secret is empty".to_string()));
        }
        Ok(Self(Arc::from(secret)))
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret(**redacted**)")
    }
}

/// Issues and verifies credentials against one signing secret.
///
/// Keys are derived once; clones share nothing mutable.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &SigningSecret) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        // Credentials carry no expiry.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Sign a credential binding `subject_id`.
    pub fn issue(&self, subject_id: &str) -> Result<String, AuthError> {
        if subject_id.is_empty() {
            return Err(AuthError::Configuration(
                "cannot issue a token for an empty subject".to_string(),
            ));
        }
        let claims = Claims {
            id: subject_id.to_string(),
            iat: Some(Utc::now().timestamp()),
        };
        encode(&Header::new(ALGORITHM), &claims, &self.encoding)
            .map_err(|e| AuthError::Configuration(e.to_string()))
    }

    /// Verify a raw credential and return the subject it binds.
    pub fn verify(&self, token: &str) -> Result<String, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(classify)?;
        if data.claims.id.is_empty() {
            return Err(AuthError::InvalidCredential);
        }
        Ok(data.claims.id)
    }
}

/// Token problems are the caller's fault (401); key or crypto problems are ours (403).
fn classify(err: jsonwebtoken::errors::Error) -> AuthError {
    match err.kind() {
        ErrorKind::InvalidEcdsaKey
        | ErrorKind::InvalidRsaKey(_)
        | ErrorKind::RsaFailedSigning
        | ErrorKind::InvalidKeyFormat
        | ErrorKind::Crypto(_) => AuthError::VerificationFault(err.to_string()),
        _ => AuthError::InvalidCredential,
    }
}
