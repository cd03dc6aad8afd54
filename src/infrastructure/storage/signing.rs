//! HMAC-SHA256 URL signing for time-limited asset access.
//!
//! The signature covers `"{key}\n{expires}"`, where `expires` is a Unix
//! timestamp in seconds.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("signature is not valid hex")]
    Malformed,
    #[error("signature does not match")]
    Mismatch,
    #[error("signed URL expired")]
    Expired,
}

#[derive(Clone)]
pub struct UrlSigner {
    secret: Vec<u8>,
}

impl std::fmt::Debug for UrlSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrlSigner").finish_non_exhaustive()
    }
}

impl UrlSigner {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self { secret: secret.into() }
    }

    fn mac(&self, key: &str, expires: i64) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(&self.secret).expect("HMAC can take key of any size");
        mac.update(key.as_bytes());
        mac.update(b"\n");
        mac.update(expires.to_string().as_bytes());
        mac
    }

    pub fn sign(&self, key: &str, expires: i64) -> String {
        hex::encode(self.mac(key, expires).finalize().into_bytes())
    }

    /// Checks `signature` for `key` and that `expires` is not before `now`.
    pub fn verify(&self, key: &str, expires: i64, signature: &str, now: i64) -> Result<(), SignatureError> {
        let raw = hex::decode(signature).map_err(|_| SignatureError::Malformed)?;
        self.mac(key, expires)
            .verify_slice(&raw)
            .map_err(|_| SignatureError::Mismatch)?;
        if expires < now {
            return Err(SignatureError::Expired);
        }
        Ok(())
    }
}
