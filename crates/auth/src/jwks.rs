//! JSON Web Key Set wire model.

use serde::Deserialize;

/// A published key set, as served by the identity provider's
/// `/.well-known/jwks.json` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Jwks {
    pub keys: Vec<Jwk>,
}

impl Jwks {
    /// Find the key matching a token's `kid` header.
    pub fn find(&self, kid: &str) -> Option<&Jwk> {
        self.keys.iter().find(|k| k.kid == kid)
    }
}

/// A single RSA public key from the set.
///
/// `n` and `e` are base64url-encoded modulus and exponent, which is exactly
/// what `jsonwebtoken::DecodingKey::from_rsa_components` wants.
#[derive(Debug, Clone, Deserialize)]
pub struct Jwk {
    pub kid: String,
    pub kty: String,
    #[serde(default)]
    pub alg: Option<String>,
    pub n: String,
    pub e: String,
}
