pub mod access_jwt;
pub mod factory;
pub mod token_issuer;

pub use access_jwt::{AccessJwtError, AuthService, VerifiedAccessToken};
pub use factory::build_auth_service;
pub use token_issuer::{IssuedToken, TokenIssuer};
