use chrono::Duration;
use thiserror::Error;

pub mod paseto;
pub mod password;
pub mod payload;

pub use paseto::{PasetoMaker, SYMMETRIC_KEY_SIZE};
pub use password::{hash_password, verify_password, PasswordError};
pub use payload::Payload;

/// Errors produced while issuing or verifying bearer tokens
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("invalid key size: must be exactly {expected} bytes, got {actual}")]
    InvalidKeySize { expected: usize, actual: usize },

    #[error("failed to build token payload: {0}")]
    PayloadConstruction(String),

    #[error("failed to encrypt token")]
    Encryption,

    #[error("token is invalid")]
    InvalidToken,

    #[error("token has expired")]
    ExpiredToken,
}

/// Issues and verifies opaque bearer tokens.
///
/// Implementations hold only immutable key material, so a single instance is
/// shared across every request handler behind an `Arc`.
pub trait TokenMaker: Send + Sync {
    /// Create a token for `subject` that stays valid for `duration`
    fn create_token(&self, subject: &str, duration: Duration) -> Result<String, TokenError>;

    /// Decrypt the token and check that it has not expired
    fn verify_token(&self, token: &str) -> Result<Payload, TokenError>;
}
