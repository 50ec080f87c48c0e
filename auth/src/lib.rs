//! Session authentication library
//!
//! Provides the authentication core of the dashboard:
//! - Password hashing (unsalted SHA-256 hex or Argon2id PHC)
//! - Credential store (username → hash table fixed at startup)
//! - Session store (opaque tokens with lazy expiry)
//! - Authentication coordination (session reuse, basic-auth fallback, login/logout)
//!
//! The library knows nothing about HTTP. Callers extract the session cookie
//! and basic credentials themselves and deliver any issued session back to
//! the client.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let digest = hasher.digest("admin123");
//! assert!(hasher.verify("admin123", &digest).unwrap());
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use std::sync::Arc;
//!
//! use auth::{AuthRequest, Authenticator, InMemorySessionStore, StaticCredentialStore};
//!
//! let credentials = Arc::new(StaticCredentialStore::new().with_password("admin", "admin123"));
//! let sessions: Arc<InMemorySessionStore> = Arc::new(InMemorySessionStore::default());
//! let auth = Authenticator::new(credentials, sessions);
//!
//! // Login: verify and start a session
//! let session = auth.login("admin", "admin123").unwrap();
//!
//! // Later requests present the token
//! let request = AuthRequest::new().with_session_token(Some(session.token.to_string()));
//! let result = auth.authenticate(&request).unwrap();
//! assert_eq!(result.username, "admin");
//!
//! // Logout
//! auth.logout(Some(session.token.as_str()));
//! assert!(auth.authenticate(&request).is_err());
//! ```

pub mod authenticator;
pub mod credentials;
pub mod password;
pub mod session;

// Re-export commonly used items
pub use authenticator::AuthRequest;
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use authenticator::BasicCredentials;
pub use credentials::CredentialError;
pub use credentials::CredentialStore;
pub use credentials::StaticCredentialStore;
pub use password::HashScheme;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use session::Clock;
pub use session::InMemorySessionStore;
pub use session::ManualClock;
pub use session::Session;
pub use session::SessionStore;
pub use session::SessionToken;
pub use session::SystemClock;
