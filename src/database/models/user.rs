use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Row in the `users` table, password hash included
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct User {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub first_name: String,
    pub email: String,
    pub password: String,
    pub family_id: Option<Uuid>,
}

/// Public view of a user; never carries the password hash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub first_name: String,
    pub email: String,
    pub family_id: Option<Uuid>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            created_at: user.created_at,
            updated_at: user.updated_at,
            first_name: user.first_name,
            email: user.email,
            family_id: user.family_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateUserParams {
    pub first_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateUserEmailParams {
    pub id: Uuid,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateUserInfoParams {
    pub id: Uuid,
    pub first_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateUserPasswordParams {
    pub id: Uuid,
    pub password: String,
}
