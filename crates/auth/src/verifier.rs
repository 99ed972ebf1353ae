//! RS256 bearer-token verification.

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header, errors::ErrorKind};
use thiserror::Error;

use crate::jwks::Jwks;

/// Verified token claims, kept as the raw map the token carried.
pub type Claims = serde_json::Map<String, serde_json::Value>;

/// Token verification failures. Every variant surfaces as a 401.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token expired")]
    Expired,

    #[error("invalid token: {0}")]
    Invalid(String),

    #[error("public key not found")]
    KeyNotFound,

    #[error("key set fetch failed: {0}")]
    Jwks(String),
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => AuthError::Expired,
            _ => AuthError::Invalid(err.to_string()),
        }
    }
}

/// Verification seam held by the API middleware.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Verify a bearer token and return its claims.
    async fn verify(&self, token: &str) -> Result<Claims, AuthError>;
}

/// Production verifier. Re-fetches the key set on every call; keys can
/// rotate at any time and nothing here caches them.
#[derive(Debug, Clone)]
pub struct JwksVerifier {
    http: reqwest::Client,
    jwks_url: String,
}

impl JwksVerifier {
    pub fn new(http: reqwest::Client, jwks_url: impl Into<String>) -> Self {
        Self {
            http,
            jwks_url: jwks_url.into(),
        }
    }

    async fn fetch_jwks(&self) -> Result<Jwks, AuthError> {
        let response = self
            .http
            .get(&self.jwks_url)
            .send()
            .await
            .map_err(|e| AuthError::Jwks(e.to_string()))?
            .error_for_status()
            .map_err(|e| AuthError::Jwks(e.to_string()))?;

        response
            .json::<Jwks>()
            .await
            .map_err(|e| AuthError::Jwks(e.to_string()))
    }
}

#[async_trait]
impl TokenVerifier for JwksVerifier {
    async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token)?;
        let kid = header
            .kid
            .ok_or_else(|| AuthError::Invalid("token header missing kid".to_string()))?;

        let jwks = self.fetch_jwks().await?;
        let jwk = jwks.find(&kid).ok_or(AuthError::KeyNotFound)?;

        let key = DecodingKey::from_rsa_components(&jwk.n, &jwk.e)?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_aud = false;

        let data = decode::<Claims>(token, &key, &validation)?;
        Ok(data.claims)
    }
}
