//! bcrypt password hashing.
//!
//! bcrypt is CPU-bound, so both operations run on the blocking pool to keep
//! the async executor free.

use tracing::error;

use crate::error::AppError;

#[derive(Clone, Copy, Debug)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub async fn hash(&self, plain: String) -> Result<String, AppError> {
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(plain, cost))
            .await
            .map_err(|e| {
                error!(error = %e, "password hashing task failed");
                AppError::Internal
            })?
            .map_err(|e| {
                error!(error = %e, "failed to hash password");
                AppError::Internal
            })
    }

    /// `Ok(false)` for a wrong password; a malformed stored hash is an internal error.
    pub async fn verify(&self, plain: String, hash: String) -> Result<bool, AppError> {
        tokio::task::spawn_blocking(move || bcrypt::verify(plain, &hash))
            .await
            .map_err(|e| {
                error!(error = %e, "password verification task failed");
                AppError::Internal
            })?
            .map_err(|e| {
                error!(error = %e, "failed to verify password hash");
                AppError::Internal
            })
    }
}
