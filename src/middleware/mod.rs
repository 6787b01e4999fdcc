pub mod auth;
pub mod extract;
pub mod response;

pub use auth::{auth_middleware, AuthError, AuthPayload};
pub use extract::{ApiPath, ValidatedJson};
pub use response::{ApiResponse, ApiResult};
