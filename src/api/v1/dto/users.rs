/*
 * Responsibility
 * - Users の request/response DTO
 * - passwordHash は response に含めない
 * - blogs は公開 ID (encode 済み) で返す
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_NAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 3;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub username: String,
    pub name: String,
    pub password: String,
}

impl CreateUserRequest {
    pub fn validate(self) -> Result<UserDraft, &'static str> {
        let username = self.username.unwrap_or_default();
        let name = self.name.unwrap_or_default();
        let password = self.password.unwrap_or_default();

        if username.trim().is_empty() || name.trim().is_empty() {
            return Err("username and name must be included");
        }
        if username.chars().count() < MIN_USERNAME_LEN {
            return Err("username must be at least 3 characters long");
        }
        if name.chars().count() < MIN_NAME_LEN {
            return Err("name must be at least 3 characters long");
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err("password must be at least 3 characters long");
        }

        Ok(UserDraft {
            username,
            name,
            password,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub blogs: Vec<String>, // encoded blog ids
}
