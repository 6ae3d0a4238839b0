use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identity carried in the `id` claim. Issuers write it as a JSON number or string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Subject {
    Number(i64),
    Text(String),
}

impl Subject {
    /// The subject as an author id, when it is a number that fits one
    pub fn author_id(&self) -> Option<i32> {
        match self {
            Subject::Number(n) => i32::try_from(*n).ok(),
            Subject::Text(s) => s.trim().parse().ok(),
        }
    }

    fn is_blank(&self) -> bool {
        matches!(self, Subject::Text(s) if s.trim().is_empty())
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Subject::Number(n) => write!(f, "{}", n),
            Subject::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i32> for Subject {
    fn from(id: i32) -> Self {
        Subject::Number(id.into())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub id: Subject,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    pub fn new(id: Subject, ttl: Option<Duration>) -> Self {
        let now = Utc::now();
        Self {
            id,
            iat: Some(now.timestamp()),
            exp: ttl.map(|ttl| (now + ttl).timestamp()),
        }
    }
}

/// Why a presented token was not accepted
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("no token presented")]
    MissingToken,
    #[error("token signature does not verify")]
    InvalidSignature,
    #[error("token has expired")]
    Expired,
    #[error("token is not valid yet")]
    NotYetValid,
    #[error("token subject is empty")]
    InvalidSubject,
    #[error("malformed token: {0}")]
    Malformed(String),
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature => AuthError::InvalidSignature,
            ErrorKind::ExpiredSignature => AuthError::Expired,
            ErrorKind::ImmatureSignature => AuthError::NotYetValid,
            _ => AuthError::Malformed(err.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),
    #[error("Invalid JWT secret")]
    InvalidSecret,
}

/// HS256 verifier and issuer bound to one shared secret
#[derive(Clone)]
pub struct TokenAuthenticator {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    accept_bearer_prefix: bool,
}

impl TokenAuthenticator {
    pub fn new(secret: &str) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::InvalidSecret);
        }

        // `exp`/`nbf` are checked when a token carries them but never required.
        // No audience is configured, so an `aud` claim is not checked either.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.validate_aud = false;
        validation.validate_nbf = true;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            accept_bearer_prefix: true,
        })
    }

    /// Whether `Bearer <token>` is accepted in addition to the raw token
    pub fn with_bearer_prefix(mut self, accept: bool) -> Self {
        self.accept_bearer_prefix = accept;
        self
    }

    /// Verify the raw value of an `authorization` header
    pub fn verify_header(&self, header_value: &str) -> Result<Claims, AuthError> {
        let token = match header_value.strip_prefix("Bearer ") {
            Some(token) if self.accept_bearer_prefix => token,
            _ => header_value,
        };
        self.verify(token.trim())
    }

    /// Verify a token's signature and decode its claims
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        if token.is_empty() {
            return Err(AuthError::MissingToken);
        }

        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)?.claims;
        if claims.id.is_blank() {
            return Err(AuthError::InvalidSubject);
        }
        Ok(claims)
    }

    /// Sign a token for `subject`, expiring after `ttl` if given
    pub fn issue(&self, subject: Subject, ttl: Option<Duration>) -> Result<String, JwtError> {
        let claims = Claims::new(subject, ttl);
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::TokenGeneration(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authenticator() -> TokenAuthenticator {
        TokenAuthenticator::new("test-secret").unwrap()
    }

    #[test]
    fn empty_secret_is_rejected() {
        assert!(matches!(TokenAuthenticator::new(""), Err(JwtError::InvalidSecret)));
    }

    #[test]
    fn issued_token_verifies() {
        let auth = authenticator();
        let token = auth.issue(Subject::from(7), Some(Duration::hours(1))).unwrap();
        let claims = auth.verify(&token).unwrap();
        assert_eq!(claims.id, Subject::Number(7));
        assert_eq!(claims.id.author_id(), Some(7));
    }

    #[test]
    fn tokens_without_expiry_are_accepted() {
        let auth = authenticator();
        let token = auth.issue(Subject::Text("12".to_string()), None).unwrap();
        let claims = auth.verify(&token).unwrap();
        assert_eq!(claims.exp, None);
        assert_eq!(claims.id.author_id(), Some(12));
    }

    #[test]
    fn expired_token_fails() {
        let auth = authenticator();
        let token = auth.issue(Subject::from(1), Some(Duration::hours(-2))).unwrap();
        assert_eq!(auth.verify(&token).unwrap_err(), AuthError::Expired);
    }

    #[test]
    fn foreign_secret_fails() {
        let other = TokenAuthenticator::new("other-secret").unwrap();
        let token = other.issue(Subject::from(1), None).unwrap();
        assert_eq!(authenticator().verify(&token).unwrap_err(), AuthError::InvalidSignature);
    }

    #[test]
    fn garbage_and_empty_tokens_fail() {
        let auth = authenticator();
        assert_eq!(auth.verify("").unwrap_err(), AuthError::MissingToken);
        assert!(matches!(auth.verify("not.a.token").unwrap_err(), AuthError::Malformed(_)));
    }

    #[test]
    fn blank_subject_fails() {
        let auth = authenticator();
        let token = auth.issue(Subject::Text("  ".to_string()), None).unwrap();
        assert_eq!(auth.verify(&token).unwrap_err(), AuthError::InvalidSubject);
    }

    #[test]
    fn bearer_prefix_is_optional() {
        let auth = authenticator();
        let token = auth.issue(Subject::from(3), None).unwrap();
        assert!(auth.verify_header(&token).is_ok());
        assert!(auth.verify_header(&format!("Bearer {}", token)).is_ok());

        let strict = authenticator().with_bearer_prefix(false);
        assert!(strict.verify_header(&token).is_ok());
        assert!(strict.verify_header(&format!("Bearer {}", token)).is_err());
    }

    fn sign(claims: serde_json::Value) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret("test-secret".as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn audience_claim_does_not_block_verification() {
        let token = sign(serde_json::json!({"id": 5, "aud": "blog-frontend"}));
        let claims = authenticator().verify(&token).unwrap();
        assert_eq!(claims.id.author_id(), Some(5));
    }

    #[test]
    fn future_not_before_is_not_yet_valid() {
        let nbf = (Utc::now() + Duration::hours(2)).timestamp();
        let token = sign(serde_json::json!({"id": 5, "nbf": nbf}));
        assert_eq!(authenticator().verify(&token).unwrap_err(), AuthError::NotYetValid);
    }

    #[test]
    fn non_numeric_subjects_have_no_author_id() {
        assert_eq!(Subject::Text("alice".to_string()).author_id(), None);
        assert_eq!(Subject::Number(i64::MAX).author_id(), None);
    }
}
