use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Family {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub name: String,
    pub created_by_user_id: Uuid,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateFamilyParams {
    pub name: String,
    pub created_by_user_id: Uuid,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateFamilyParams {
    pub id: Uuid,
    pub name: String,
}
