use bookwell_auth::Claims;

/// Authenticated identity for a request, derived from the verified token.
#[derive(Debug, Clone)]
pub struct AuthContext {
    claims: Claims,
}

impl AuthContext {
    pub fn new(claims: Claims) -> Self {
        Self { claims }
    }

    /// The token's `sub` claim, when present.
    pub fn subject(&self) -> Option<&str> {
        self.claims.get("sub").and_then(|v| v.as_str())
    }

    pub fn claims(&self) -> &Claims {
        &self.claims
    }
}
