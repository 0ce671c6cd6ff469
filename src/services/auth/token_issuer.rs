use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::Serialize;
use tracing::error;
use uuid::Uuid;

use crate::error::AppError;
use crate::services::auth::access_jwt::AccessTokenClaims;

/// HS256 signer for access tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    issuer: String,
    audience: String,
    ttl_seconds: u64,
    encoding_key: EncodingKey,
}

/// What `POST /login` hands back, minus the user fields.
#[derive(Clone, Debug)]
pub struct IssuedToken {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
}

impl TokenIssuer {
    pub fn new(secret: &str, issuer: String, audience: String, ttl_seconds: u64) -> Self {
        Self {
            issuer,
            audience,
            ttl_seconds,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    pub fn sign<T: Serialize>(&self, claims: &T) -> Result<String, AppError> {
        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());
        jsonwebtoken::encode(&header, claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "failed to sign JWT");
            AppError::Internal
        })
    }

    /// Issue an access token whose `sub` is the user id.
    pub fn issue_access_token(
        &self,
        user_id: Uuid,
        username: &str,
    ) -> Result<IssuedToken, AppError> {
        let now = chrono::Utc::now().timestamp();
        let ttl = i64::try_from(self.ttl_seconds).map_err(|_| AppError::Internal)?;

        let claims = AccessTokenClaims {
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            sub: user_id.to_string(),
            username: username.to_string(),
            iat: now,
            exp: now + ttl,
            jti: Some(Uuid::new_v4().to_string()),
        };

        Ok(IssuedToken {
            access_token: self.sign(&claims)?,
            token_type: "Bearer",
            expires_in: self.ttl_seconds,
        })
    }
}
