use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use uuid::{Builder, Uuid};

use super::TokenError;

/// Claims carried inside a token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    pub id: Uuid,
    pub subject: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Payload {
    /// Build a fresh payload for `subject` expiring `duration` from now.
    ///
    /// Negative durations are accepted and yield an already expired payload.
    /// A duration that overflows the calendar is a `PayloadConstruction` error.
    pub fn new(subject: impl Into<String>, duration: Duration) -> Result<Self, TokenError> {
        let mut bytes = [0u8; 16];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| TokenError::PayloadConstruction(e.to_string()))?;

        let issued_at = Utc::now();
        let expires_at = issued_at.checked_add_signed(duration).ok_or_else(|| {
            TokenError::PayloadConstruction(format!("duration {} is out of range", duration))
        })?;

        Ok(Self {
            id: Builder::from_random_bytes(bytes).into_uuid(),
            subject: subject.into(),
            issued_at,
            expires_at,
        })
    }

    /// Check the payload against the given instant
    pub fn valid_at(&self, now: DateTime<Utc>) -> Result<(), TokenError> {
        if now > self.expires_at {
            return Err(TokenError::ExpiredToken);
        }
        Ok(())
    }

    pub fn valid(&self) -> Result<(), TokenError> {
        self.valid_at(Utc::now())
    }
}
