use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::{error::Error as StdError, fmt};
use uuid::Uuid;

use crate::error::AppError;
use crate::services::auth::token_issuer::{IssuedToken, TokenIssuer};

// Errors returned by access-token verification + strict claim validation.
#[derive(Debug)]
pub enum AccessJwtError {
    Jwt(jsonwebtoken::errors::Error),
    EmptyClaim(&'static str),
    InvalidSubUuid,
}

impl fmt::Display for AccessJwtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jwt(e) => write!(f, "jwt verification failed: {}", e),
            Self::EmptyClaim(name) => write!(f, "empty '{}' claim", name),
            Self::InvalidSubUuid => write!(f, "invalid 'sub' (expected UUID)"),
        }
    }
}

impl StdError for AccessJwtError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Jwt(e) => Some(e),
            _ => None,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AccessJwtError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        Self::Jwt(e)
    }
}

/// Access token (JWT) claims, shared by the issuer and the verifier.
///
/// `sub` is the user id, `username` rides along so handlers can log it
/// without a store round-trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    pub iss: String,
    pub aud: String,
    pub sub: String,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

/// AuthService が返す「検証済み・アプリ側で使う型」
///
/// - `sub` はプロジェクト規約として UUID なので、ここでは `Uuid` に昇格させる
/// - `iss/aud/exp` の整合性は `verify_strict` の中で保証される前提
#[derive(Debug, Clone)]
pub struct VerifiedAccessToken {
    pub user_id: Uuid,
    pub username: String,
    pub jti: Option<String>,
}

/// HS256 access-token issuer + verifier.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct AuthService {
    issuer: TokenIssuer,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("AuthService")
            .field("issuer", &self.issuer.issuer())
            .field("audience", &self.issuer.audience())
            .field("validation", &self.validation)
            .finish()
    }
}

impl AuthService {
    pub fn new(issuer: TokenIssuer, secret: &str, leeway_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer.issuer()]);
        validation.set_audience(&[issuer.audience()]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation.leeway = leeway_seconds;

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            validation,
        }
    }

    pub fn issue(&self, user_id: Uuid, username: &str) -> Result<IssuedToken, AppError> {
        self.issuer.issue_access_token(user_id, username)
    }

    // Verify and decode a JWT access token.
    pub fn verify(&self, token: &str) -> Result<AccessTokenClaims, jsonwebtoken::errors::Error> {
        let data =
            jsonwebtoken::decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)?;

        Ok(data.claims)
    }

    /// Verify + strict claim validation.
    ///
    /// `jsonwebtoken::Validation` already checks:
    /// - signature
    /// - `exp` (with leeway)
    /// - `iss` and `aud` (because we set them)
    ///
    /// This method additionally checks:
    /// - `sub` and `username` are present *and not empty*
    /// - `sub` is a UUID
    pub fn verify_strict(&self, token: &str) -> Result<AccessTokenClaims, AccessJwtError> {
        let claims = self.verify(token)?;

        if claims.sub.trim().is_empty() {
            return Err(AccessJwtError::EmptyClaim("sub"));
        }
        if claims.username.trim().is_empty() {
            return Err(AccessJwtError::EmptyClaim("username"));
        }
        if Uuid::parse_str(&claims.sub).is_err() {
            return Err(AccessJwtError::InvalidSubUuid);
        }

        Ok(claims)
    }

    /// Verify + strict claim validation, then convert claims into an application-friendly type.
    ///
    /// This is the recommended entry-point for middleware/handlers.
    pub fn verify_verified(&self, token: &str) -> Result<VerifiedAccessToken, AccessJwtError> {
        let claims = self.verify_strict(token)?;

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AccessJwtError::InvalidSubUuid)?;

        Ok(VerifiedAccessToken {
            user_id,
            username: claims.username,
            jti: claims.jti,
        })
    }
}
