//! Users and credential hashing.
//!
//! Passwords are never stored. A [`PasswordHash`] keeps a random salt and a
//! Blake3 digest derived from salt and password.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// Key-derivation context for password digests.
const PASSWORD_CONTEXT: &str = "boxoffice 2024-01-01 user password v1";

const SALT_LEN: usize = 16;

/// A registered user as seen by the rest of the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub preferred_name: String,
}

impl User {
    pub fn new(username: impl Into<String>, preferred_name: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            preferred_name: preferred_name.into(),
        }
    }
}

/// A user together with its stored credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub user: User,
    pub password_hash: PasswordHash,
}

impl UserRecord {
    /// Hash `password` with a fresh salt.
    pub fn new(user: User, password: &str) -> Self {
        Self {
            user,
            password_hash: PasswordHash::new(password),
        }
    }
}

/// Salted Blake3 password digest.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash {
    salt: [u8; SALT_LEN],
    digest: [u8; 32],
}

impl PasswordHash {
    /// Hash `password` with a random salt.
    pub fn new(password: &str) -> Self {
        let mut salt = [0u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        Self::with_salt(password, salt)
    }

    /// Hash `password` with a caller-provided salt.
    pub fn with_salt(password: &str, salt: [u8; SALT_LEN]) -> Self {
        let mut hasher = blake3::Hasher::new_derive_key(PASSWORD_CONTEXT);
        hasher.update(&salt);
        hasher.update(password.as_bytes());
        Self {
            salt,
            digest: *hasher.finalize().as_bytes(),
        }
    }

    /// Check a candidate password. The digest comparison is constant-time.
    pub fn verify(&self, password: &str) -> bool {
        let candidate = Self::with_salt(password, self.salt);
        blake3::Hash::from(self.digest) == blake3::Hash::from(candidate.digest)
    }

    /// Encode as `salt_hex$digest_hex` for storage.
    pub fn encode(&self) -> String {
        format!("{}${}", hex::encode(self.salt), hex::encode(self.digest))
    }

    /// Decode a value produced by [`PasswordHash::encode`].
    pub fn decode(encoded: &str) -> Result<Self, CoreError> {
        let malformed = |reason: &str| CoreError::MalformedPasswordHash(reason.to_string());

        let (salt_hex, digest_hex) = encoded.split_once('$').ok_or_else(|| malformed("missing separator"))?;
        let salt: [u8; SALT_LEN] = hex::decode(salt_hex)
            .map_err(|e| malformed(&e.to_string()))?
            .try_into()
            .map_err(|_| malformed("salt has wrong length"))?;
        let digest: [u8; 32] = hex::decode(digest_hex)
            .map_err(|e| malformed(&e.to_string()))?
            .try_into()
            .map_err(|_| malformed("digest has wrong length"))?;

        Ok(Self { salt, digest })
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PasswordHash(<redacted>)")
    }
}
