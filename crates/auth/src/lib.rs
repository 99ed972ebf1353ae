//! `bookwell-auth` — bearer-token verification against a JWKS endpoint.
//!
//! The identity provider publishes its RSA signing keys as a JSON Web Key
//! Set; this crate fetches that set, matches the token's key id, and
//! verifies the RS256 signature. It is deliberately decoupled from HTTP
//! routing: the API layer holds a `dyn TokenVerifier` and maps every
//! [`AuthError`] to a 401.

pub mod jwks;
pub mod verifier;

pub use jwks::{Jwk, Jwks};
pub use verifier::{AuthError, Claims, JwksVerifier, TokenVerifier};
