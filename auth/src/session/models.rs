use std::fmt;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::DateTime;
use chrono::Utc;
use rand::rngs::OsRng;
use rand::RngCore;

/// Opaque session identifier handed to the client.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(pub(crate) String);

impl SessionToken {
    /// Bytes of entropy behind each token.
    pub const ENTROPY_BYTES: usize = 32;

    /// Draw a new token from the operating system CSPRNG.
    ///
    /// # Returns
    /// URL-safe base64 token (43 characters, no padding)
    pub fn generate() -> Self {
        let mut bytes = [0u8; Self::ENTROPY_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self(URL_SAFE_NO_PAD.encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// Keep tokens out of debug logs.
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(..)")
    }
}

/// A logged-in session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: SessionToken,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// A session is expired strictly after its expiry instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}
