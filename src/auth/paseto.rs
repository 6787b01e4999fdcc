use chrono::Duration;
use rand::{rngs::OsRng, RngCore};
use rusty_paseto::core::{
    Key, Local, Paseto, PasetoNonce, PasetoSymmetricKey, Payload as PasetoPayload, V4,
};

use super::{Payload, TokenError, TokenMaker};

/// Required length of the symmetric key in bytes
pub const SYMMETRIC_KEY_SIZE: usize = 32;

const NONCE_SIZE: usize = 32;

/// Local (symmetric) PASETO token maker.
///
/// Tokens are PASETO `v4.local` with the JSON-encoded [`Payload`] as the
/// encrypted message and no footer.
pub struct PasetoMaker {
    key: PasetoSymmetricKey<V4, Local>,
}

impl PasetoMaker {
    pub fn new(symmetric_key: &[u8]) -> Result<Self, TokenError> {
        let key_bytes: [u8; SYMMETRIC_KEY_SIZE] =
            symmetric_key
                .try_into()
                .map_err(|_| TokenError::InvalidKeySize {
                    expected: SYMMETRIC_KEY_SIZE,
                    actual: symmetric_key.len(),
                })?;

        Ok(Self {
            key: PasetoSymmetricKey::<V4, Local>::from(Key::from(key_bytes)),
        })
    }

    fn seal(&self, payload: &Payload) -> Result<String, TokenError> {
        let message = serde_json::to_string(payload)
            .map_err(|e| TokenError::PayloadConstruction(e.to_string()))?;

        let mut nonce = [0u8; NONCE_SIZE];
        OsRng
            .try_fill_bytes(&mut nonce)
            .map_err(|_| TokenError::Encryption)?;
        let nonce = Key::from(nonce);
        let nonce = PasetoNonce::<V4, Local>::from(&nonce);

        let token = Paseto::<V4, Local>::builder()
            .set_payload(PasetoPayload::from(message.as_str()))
            .try_encrypt(&self.key, &nonce)
            .map_err(|e| {
                tracing::error!("Failed to encrypt token: {}", e);
                TokenError::Encryption
            })?;

        Ok(token.to_string())
    }

    // Every failure collapses to InvalidToken so callers cannot tell a
    // tampered token from a malformed one.
    fn open(&self, token: &str) -> Result<Payload, TokenError> {
        let message = Paseto::<V4, Local>::try_decrypt(token, &self.key, None, None)
            .map_err(|_| TokenError::InvalidToken)?;

        serde_json::from_str(&message).map_err(|_| TokenError::InvalidToken)
    }
}

impl TokenMaker for PasetoMaker {
    fn create_token(&self, subject: &str, duration: Duration) -> Result<String, TokenError> {
        let payload = Payload::new(subject, duration)?;
        self.seal(&payload)
    }

    fn verify_token(&self, token: &str) -> Result<Payload, TokenError> {
        let payload = self.open(token)?;
        payload.valid()?;
        Ok(payload)
    }
}

impl std::fmt::Debug for PasetoMaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasetoMaker").finish_non_exhaustive()
    }
}
