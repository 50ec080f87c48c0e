use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;
use sha2::Digest;
use sha2::Sha256;

use super::errors::PasswordError;

/// Length of a hex encoded SHA-256 digest.
const SHA256_HEX_LEN: usize = 64;

/// Storage formats accepted for a password hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashScheme {
    /// Unsalted SHA-256, hex encoded.
    Sha256Hex,
    /// Argon2 PHC string (`$argon2id$v=19$...`).
    Argon2Phc,
}

impl HashScheme {
    /// Detect the scheme of a stored hash.
    ///
    /// # Returns
    /// The scheme, or None when the string matches neither format
    pub fn detect(stored: &str) -> Option<Self> {
        if stored.starts_with("$argon2") {
            return PasswordHash::new(stored).ok().map(|_| HashScheme::Argon2Phc);
        }

        if stored.len() == SHA256_HEX_LEN && stored.chars().all(|c| c.is_ascii_hexdigit()) {
            return Some(HashScheme::Sha256Hex);
        }

        None
    }
}

/// Password hashing implementation.
///
/// Produces and checks both the unsalted SHA-256 digests used by the
/// default credential table and Argon2id PHC strings.
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hex encoded SHA-256 digest of a password.
    ///
    /// # Arguments
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// 64 character lowercase hex string
    pub fn digest(&self, password: &str) -> String {
        hex::encode(Sha256::digest(password.as_bytes()))
    }

    /// Hash a plaintext password with Argon2id and a random salt.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash of either scheme.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored` - Stored hash (SHA-256 hex or PHC string)
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `UnknownScheme` - Stored hash matches neither format
    /// * `VerificationFailed` - PHC string could not be parsed
    pub fn verify(&self, password: &str, stored: &str) -> Result<bool, PasswordError> {
        match HashScheme::detect(stored).ok_or(PasswordError::UnknownScheme)? {
            HashScheme::Sha256Hex => Ok(self.digest(password).eq_ignore_ascii_case(stored)),
            HashScheme::Argon2Phc => {
                let parsed_hash = PasswordHash::new(stored).map_err(|e| {
                    PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
                })?;

                Ok(Argon2::default()
                    .verify_password(password.as_bytes(), &parsed_hash)
                    .is_ok())
            }
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
