//! Token Codec
//!
//! Issues and verifies compact JWS tokens. Access and refresh tokens share
//! the format and differ only in the secret that signs them, so a token of
//! one kind never verifies as the other.

use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::errors::{Error as JwtError, ErrorKind as JwtErrorKind};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use platform::clock::Clock;
use platform::crypto::{SecretKey, SigningAlgorithm};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Verified token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Account login
    pub sub: String,
    /// Expiry, seconds since epoch
    pub exp: i64,
    /// Issued at, seconds since epoch
    pub iat: i64,
    /// Unique per issued token
    pub jti: String,
}

/// Signs and verifies access and refresh tokens
#[derive(Debug)]
pub struct TokenCodec {
    algorithm: Algorithm,
    access_secret: SecretKey,
    refresh_secret: SecretKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl TokenCodec {
    pub fn new(config: &AuthConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            algorithm: jwt_algorithm(config.algorithm),
            access_secret: config.access_secret.clone(),
            refresh_secret: config.refresh_secret.clone(),
            access_ttl: config.access_token_ttl,
            refresh_ttl: config.refresh_token_ttl,
            clock,
        }
    }

    pub fn issue_access(&self, subject: &str) -> AuthResult<String> {
        self.issue(TokenKind::Access, subject)
    }

    pub fn issue_refresh(&self, subject: &str) -> AuthResult<String> {
        self.issue(TokenKind::Refresh, subject)
    }

    /// Issue a token for `subject` expiring one TTL from now
    pub fn issue(&self, kind: TokenKind, subject: &str) -> AuthResult<String> {
        let iat = self.clock.now().timestamp();
        let ttl = i64::try_from(self.ttl(kind).as_secs())
            .map_err(|_| AuthError::Internal("token TTL out of range".to_string()))?;

        let claims = TokenClaims {
            sub: subject.to_string(),
            exp: iat.saturating_add(ttl),
            iat,
            jti: Uuid::new_v4().simple().to_string(),
        };

        encode(
            &Header::new(self.algorithm),
            &claims,
            &EncodingKey::from_secret(self.secret(kind).as_bytes()),
        )
        .map_err(|e| AuthError::Internal(format!("token encoding: {e}")))
    }

    /// Verify a token of the given kind.
    ///
    /// The library checks header and signature; expiry is checked here
    /// against the injected clock, with no leeway, and only once the
    /// signature holds. A forged token never reports `ExpiredToken`.
    pub fn verify(&self, token: &str, kind: TokenKind) -> AuthResult<TokenClaims> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.leeway = 0;

        let claims = decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.secret(kind).as_bytes()),
            &validation,
        )
        .map_err(verification_error)?
        .claims;

        if claims.exp <= self.clock.now().timestamp() {
            return Err(AuthError::ExpiredToken);
        }

        Ok(claims)
    }

    fn secret(&self, kind: TokenKind) -> &SecretKey {
        match kind {
            TokenKind::Access => &self.access_secret,
            TokenKind::Refresh => &self.refresh_secret,
        }
    }

    fn ttl(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        }
    }
}

fn jwt_algorithm(algorithm: SigningAlgorithm) -> Algorithm {
    match algorithm {
        SigningAlgorithm::HS256 => Algorithm::HS256,
        SigningAlgorithm::HS384 => Algorithm::HS384,
        SigningAlgorithm::HS512 => Algorithm::HS512,
    }
}

// A header naming another algorithm is reported like a bad signature.
fn verification_error(err: JwtError) -> AuthError {
    match err.kind() {
        JwtErrorKind::InvalidSignature | JwtErrorKind::InvalidAlgorithm => {
            AuthError::InvalidSignature
        }
        JwtErrorKind::InvalidToken
        | JwtErrorKind::Base64(_)
        | JwtErrorKind::Json(_)
        | JwtErrorKind::Utf8(_)
        | JwtErrorKind::MissingRequiredClaim(_) => AuthError::MalformedToken,
        _ => AuthError::Internal(format!("token verification: {err}")),
    }
}
