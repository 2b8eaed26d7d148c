//! Segment encoding and HMAC-SHA256 signing for access tokens

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::errors::ManagerError;

type HmacSha256 = Hmac<Sha256>;

/// Base64url without padding
pub(crate) fn encode_segment(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Strict base64url without padding
pub(crate) fn decode_segment(segment: &str) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(segment)
}

/// HMAC-SHA256 keyed once at construction and cloned per signature.
#[derive(Clone)]
pub(crate) struct TokenSigner {
    mac: HmacSha256,
}

impl TokenSigner {
    pub(crate) fn new(key: &[u8]) -> Result<Self, ManagerError> {
        let mac = <HmacSha256 as Mac>::new_from_slice(key)
            .map_err(|_| ManagerError::InvalidSigningKey)?;
        Ok(Self { mac })
    }

    /// Base64url signature over the exact `header.payload` text
    pub(crate) fn sign(&self, signing_input: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(signing_input.as_bytes());
        encode_segment(&mac.finalize().into_bytes())
    }

    /// Compares the encoded signatures in constant time
    pub(crate) fn verify(&self, signing_input: &str, signature: &str) -> bool {
        let expected = self.sign(signing_input);
        constant_time_eq(expected.as_bytes(), signature.as_bytes())
    }
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("algorithm", &"HS256")
            .field("key", &"***redacted***")
            .finish()
    }
}
