/// Factory: build `AuthService` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::{AuthService, TokenIssuer};

pub fn build_auth_service(config: &Config) -> Arc<AuthService> {
    let issuer = TokenIssuer::new(
        &config.jwt_secret,
        config.auth_issuer.clone(),
        config.auth_audience.clone(),
        config.access_token_ttl_seconds,
    );

    Arc::new(AuthService::new(
        issuer,
        &config.jwt_secret,
        config.access_token_leeway_seconds,
    ))
}
