// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) → Protected (bearer token verified by auth_middleware)
pub mod public;
pub mod protected;

use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ApiError;

/// Reject the nil UUID, which the store would never have issued
pub(crate) fn require_id(id: Uuid, field: &str) -> Result<Uuid, ApiError> {
    if id.is_nil() {
        return Err(ApiError::bad_request(format!("{} must be a non-nil UUID", field)));
    }
    Ok(id)
}

/// Confirmation body returned by delete endpoints
pub(crate) fn deleted(entity: &str, id: impl std::fmt::Display) -> Value {
    json!({ "message": format!("deleted {} with id {}", entity, id) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nil_uuid_is_rejected() {
        let err = require_id(Uuid::nil(), "id").unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);

        let id = Uuid::new_v4();
        assert_eq!(require_id(id, "id").unwrap(), id);
    }
}
