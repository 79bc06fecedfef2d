//! HMAC signature computation.
//!
//! The gateway configures its key as a hex-digit string; the digest is keyed
//! over the canonical string with the raw decoded bytes and rendered as
//! lowercase hex.

use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};
use std::str::FromStr;
use thiserror::Error;

use crate::config::schema::GlobalsConfig;

type HmacSha256 = Hmac<Sha256>;
type HmacSha384 = Hmac<Sha384>;
type HmacSha512 = Hmac<Sha512>;

/// Errors raised while computing a signature.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SigningError {
    /// The configured key is not a hex-digit string of even length.
    #[error("hmac key is not a valid hex string")]
    BadKeyEncoding,

    /// The configured algorithm identifier is not supported.
    #[error("unsupported hmac algorithm '{0}'")]
    UnsupportedAlgorithm(String),
}

/// Supported HMAC hash algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HmacAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

impl FromStr for HmacAlgorithm {
    type Err = SigningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha256" => Ok(HmacAlgorithm::Sha256),
            "sha384" => Ok(HmacAlgorithm::Sha384),
            "sha512" => Ok(HmacAlgorithm::Sha512),
            _ => Err(SigningError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

/// Compute the lowercase-hex HMAC digest of `message` under the context's
/// hex-encoded key and named algorithm.
pub fn sign(globals: &GlobalsConfig, message: &str) -> Result<String, SigningError> {
    let key = hex::decode(&globals.hmac_key).map_err(|_| SigningError::BadKeyEncoding)?;
    let algorithm: HmacAlgorithm = globals.hmac_algorithm.parse()?;

    let digest = match algorithm {
        HmacAlgorithm::Sha256 => {
            let mut mac =
                HmacSha256::new_from_slice(&key).expect("HMAC accepts any key length");
            mac.update(message.as_bytes());
            hex::encode(mac.finalize().into_bytes())
        }
        HmacAlgorithm::Sha384 => {
            let mut mac =
                HmacSha384::new_from_slice(&key).expect("HMAC accepts any key length");
            mac.update(message.as_bytes());
            hex::encode(mac.finalize().into_bytes())
        }
        HmacAlgorithm::Sha512 => {
            let mut mac =
                HmacSha512::new_from_slice(&key).expect("HMAC accepts any key length");
            mac.update(message.as_bytes());
            hex::encode(mac.finalize().into_bytes())
        }
    };

    Ok(digest)
}
