use std::collections::HashMap;

use super::errors::CredentialError;
use crate::password::HashScheme;
use crate::password::PasswordHasher;

/// Lookup of username/password pairs.
pub trait CredentialStore: Send + Sync + 'static {
    /// Check a password for a user.
    ///
    /// # Arguments
    /// * `username` - Account name
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// True only for a known user whose stored hash matches the password.
    /// Unknown users yield false.
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// Credential table fixed for the lifetime of the process.
///
/// Holds only password hashes, never plaintext.
pub struct StaticCredentialStore {
    users: HashMap<String, String>,
    hasher: PasswordHasher,
}

impl StaticCredentialStore {
    /// Build a store from a username → hash table.
    ///
    /// # Arguments
    /// * `users` - Map of username to SHA-256 hex or Argon2 PHC hash
    ///
    /// # Errors
    /// * `EmptyUsername` - A key is empty or whitespace
    /// * `InvalidHash` - A hash matches neither supported format
    pub fn from_hashes<I, K, V>(users: I) -> Result<Self, CredentialError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut table = HashMap::new();

        for (username, hash) in users {
            let username = username.into();
            let hash = hash.into();

            if username.trim().is_empty() {
                return Err(CredentialError::EmptyUsername);
            }
            if HashScheme::detect(&hash).is_none() {
                return Err(CredentialError::InvalidHash(username));
            }

            table.insert(username, hash);
        }

        Ok(Self {
            users: table,
            hasher: PasswordHasher::new(),
        })
    }

    /// Empty store, to be filled with [`StaticCredentialStore::with_password`].
    pub fn new() -> Self {
        Self {
            users: HashMap::new(),
            hasher: PasswordHasher::new(),
        }
    }

    /// Add a user from a plaintext password, stored as its SHA-256 digest.
    pub fn with_password(mut self, username: impl Into<String>, password: &str) -> Self {
        let digest = self.hasher.digest(password);
        self.users.insert(username.into(), digest);
        self
    }

    /// Number of registered users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Default for StaticCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore for StaticCredentialStore {
    fn verify(&self, username: &str, password: &str) -> bool {
        let Some(stored) = self.users.get(username) else {
            tracing::debug!(username = %username, "Unknown username");
            return false;
        };

        match self.hasher.verify(password, stored) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::error!(username = %username, error = %e, "Stored password hash is unusable");
                false
            }
        }
    }
}
