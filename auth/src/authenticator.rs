use std::fmt;
use std::sync::Arc;

use chrono::Duration;

use crate::credentials::CredentialStore;
use crate::session::Session;
use crate::session::SessionStore;

/// Authentication coordinator combining credential verification and
/// session bookkeeping.
///
/// Owns neither store; both are injected so that the serving process
/// decides their lifetime.
pub struct Authenticator<C, S>
where
    C: CredentialStore,
    S: SessionStore,
{
    credentials: Arc<C>,
    sessions: Arc<S>,
}

/// Username/password pair taken from an `Authorization: Basic` header.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl BasicCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// What a request presented for authentication.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthRequest {
    pub session_token: Option<String>,
    pub basic: Option<BasicCredentials>,
}

impl AuthRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session_token(mut self, token: Option<String>) -> Self {
        self.session_token = token;
        self
    }

    pub fn with_basic(mut self, basic: Option<BasicCredentials>) -> Self {
        self.basic = basic;
        self
    }
}

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// Resolved identity
    pub username: String,

    /// Session created during this call. The caller must hand its token
    /// back to the client as a cookie.
    pub issued_session: Option<Session>,
}

/// Authentication operation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthenticationError {
    /// Form login with a wrong username or password
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Form login with an empty username or password
    #[error("Username and password are required")]
    MissingFields,

    /// Neither a live session nor credentials were presented
    #[error("Authentication required")]
    AuthenticationRequired,

    /// Basic credentials were presented but did not verify
    #[error("Invalid username or password")]
    Unauthorized,
}

impl<C, S> Authenticator<C, S>
where
    C: CredentialStore,
    S: SessionStore,
{
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `credentials` - Username/password table
    /// * `sessions` - Live session storage
    pub fn new(credentials: Arc<C>, sessions: Arc<S>) -> Self {
        Self {
            credentials,
            sessions,
        }
    }

    pub fn create_session(&self, username: &str) -> Session {
        self.sessions.create(username)
    }

    pub fn validate_session(&self, token: &str) -> Option<Session> {
        self.sessions.validate(token)
    }

    /// Lifetime of newly issued sessions, used as the cookie max-age.
    pub fn session_ttl(&self) -> Duration {
        self.sessions.ttl()
    }

    /// Drop every expired session from the store.
    pub fn purge_expired_sessions(&self) -> usize {
        self.sessions.purge_expired()
    }

    /// Resolve the identity behind a request.
    ///
    /// A live session wins. Otherwise basic credentials are checked and, if
    /// they verify, a new session is issued.
    ///
    /// # Arguments
    /// * `request` - Session token and/or basic credentials from the request
    ///
    /// # Returns
    /// Username plus the session issued by this call, if any
    ///
    /// # Errors
    /// * `Unauthorized` - Basic credentials present but wrong
    /// * `AuthenticationRequired` - Nothing usable presented
    pub fn authenticate(
        &self,
        request: &AuthRequest,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if let Some(session) = request
            .session_token
            .as_deref()
            .and_then(|token| self.sessions.validate(token))
        {
            return Ok(AuthenticationResult {
                username: session.username,
                issued_session: None,
            });
        }

        let Some(basic) = &request.basic else {
            return Err(AuthenticationError::AuthenticationRequired);
        };

        if !self.credentials.verify(&basic.username, &basic.password) {
            tracing::warn!(username = %basic.username, "Basic authentication failed");
            return Err(AuthenticationError::Unauthorized);
        }

        let session = self.sessions.create(&basic.username);
        tracing::info!(username = %basic.username, "Session issued from basic credentials");

        Ok(AuthenticationResult {
            username: session.username.clone(),
            issued_session: Some(session),
        })
    }

    /// Interactive login.
    ///
    /// # Arguments
    /// * `username` - Account name (surrounding whitespace ignored)
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// The new session
    ///
    /// # Errors
    /// * `MissingFields` - Username or password empty
    /// * `InvalidCredentials` - Verification failed
    pub fn login(&self, username: &str, password: &str) -> Result<Session, AuthenticationError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthenticationError::MissingFields);
        }

        if !self.credentials.verify(username, password) {
            tracing::warn!(username = %username, "Login failed");
            return Err(AuthenticationError::InvalidCredentials);
        }

        let session = self.sessions.create(username);
        tracing::info!(username = %username, "Login succeeded");

        Ok(session)
    }

    /// End a session. Succeeds whether or not the token was live.
    pub fn logout(&self, token: Option<&str>) {
        if let Some(token) = token {
            self.sessions.delete(token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::StaticCredentialStore;
    use crate::session::InMemorySessionStore;
    use crate::session::ManualClock;

    type TestAuthenticator = Authenticator<StaticCredentialStore, InMemorySessionStore>;

    fn setup() -> (TestAuthenticator, Arc<InMemorySessionStore>) {
        let credentials = Arc::new(
            StaticCredentialStore::new()
                .with_password("admin", "admin123")
                .with_password("user", "user123"),
        );
        let sessions = Arc::new(InMemorySessionStore::new(Duration::hours(24)));
        let authenticator = Authenticator::new(credentials, Arc::clone(&sessions));
        (authenticator, sessions)
    }

    #[test]
    fn test_authenticate_with_valid_session() {
        let (authenticator, sessions) = setup();
        let session = authenticator.create_session("admin");

        let request = AuthRequest::new().with_session_token(Some(session.token.to_string()));
        let result = authenticator
            .authenticate(&request)
            .expect("Authentication failed");

        assert_eq!(result.username, "admin");
        assert!(result.issued_session.is_none());
        assert_eq!(sessions.len(), 1);
    }

    #[test]
    fn test_session_takes_precedence_over_basic() {
        let (authenticator, sessions) = setup();
        let session = authenticator.create_session("user");

        let request = AuthRequest::new()
            .with_session_token(Some(session.token.to_string()))
            .with_basic(Some(BasicCredentials::new("admin", "wrong")));
        let result = authenticator
            .authenticate(&request)
            .expect("Authentication failed");

        assert_eq!(result.username, "user");
        assert!(result.issued_session.is_none());
        assert_eq!(sessions.len(), 1);
    }

    #[test]
    fn test_basic_credentials_issue_session() {
        let (authenticator, sessions) = setup();

        let request = AuthRequest::new().with_basic(Some(BasicCredentials::new("admin", "admin123")));
        let result = authenticator
            .authenticate(&request)
            .expect("Authentication failed");

        assert_eq!(result.username, "admin");
        let issued = result.issued_session.expect("Session should be issued");
        assert_eq!(issued.username, "admin");
        assert!(sessions.validate(issued.token.as_str()).is_some());
    }

    #[test]
    fn test_stale_token_falls_back_to_basic() {
        let (authenticator, _) = setup();

        let request = AuthRequest::new()
            .with_session_token(Some("stale".to_string()))
            .with_basic(Some(BasicCredentials::new("user", "user123")));
        let result = authenticator
            .authenticate(&request)
            .expect("Authentication failed");

        assert_eq!(result.username, "user");
        assert!(result.issued_session.is_some());
    }

    #[test]
    fn test_wrong_basic_credentials_are_unauthorized() {
        let (authenticator, sessions) = setup();

        let request = AuthRequest::new().with_basic(Some(BasicCredentials::new("admin", "wrong")));

        assert_eq!(
            authenticator.authenticate(&request),
            Err(AuthenticationError::Unauthorized)
        );
        assert!(sessions.is_empty());
    }

    #[test]
    fn test_nothing_presented_requires_authentication() {
        let (authenticator, _) = setup();

        assert_eq!(
            authenticator.authenticate(&AuthRequest::new()),
            Err(AuthenticationError::AuthenticationRequired)
        );

        let request = AuthRequest::new().with_session_token(Some("unknown".to_string()));
        assert_eq!(
            authenticator.authenticate(&request),
            Err(AuthenticationError::AuthenticationRequired)
        );
    }

    #[test]
    fn test_expired_session_requires_authentication() {
        let clock = Arc::new(ManualClock::default());
        let sessions = Arc::new(InMemorySessionStore::with_clock(
            Duration::hours(24),
            Arc::clone(&clock),
        ));
        let credentials = Arc::new(StaticCredentialStore::new().with_password("admin", "admin123"));
        let authenticator = Authenticator::new(credentials, Arc::clone(&sessions));

        let session = authenticator.create_session("admin");
        clock.advance(Duration::hours(25));

        let request = AuthRequest::new().with_session_token(Some(session.token.to_string()));
        assert_eq!(
            authenticator.authenticate(&request),
            Err(AuthenticationError::AuthenticationRequired)
        );
        assert!(sessions.is_empty());
    }

    #[test]
    fn test_login() {
        let (authenticator, sessions) = setup();

        let session = authenticator
            .login(" admin ", "admin123")
            .expect("Login failed");
        assert_eq!(session.username, "admin");
        assert!(sessions.validate(session.token.as_str()).is_some());

        assert_eq!(
            authenticator.login("admin", "wrong"),
            Err(AuthenticationError::InvalidCredentials)
        );
        assert_eq!(
            authenticator.login("nobody", "admin123"),
            Err(AuthenticationError::InvalidCredentials)
        );
        assert_eq!(sessions.len(), 1);
    }

    #[test]
    fn test_login_missing_fields() {
        let (authenticator, sessions) = setup();

        assert_eq!(
            authenticator.login("", "admin123"),
            Err(AuthenticationError::MissingFields)
        );
        assert_eq!(
            authenticator.login("   ", "admin123"),
            Err(AuthenticationError::MissingFields)
        );
        assert_eq!(
            authenticator.login("admin", ""),
            Err(AuthenticationError::MissingFields)
        );
        assert!(sessions.is_empty());
    }

    #[test]
    fn test_logout_is_idempotent() {
        let (authenticator, sessions) = setup();
        let session = authenticator
            .login("admin", "admin123")
            .expect("Login failed");

        authenticator.logout(Some(session.token.as_str()));
        assert!(authenticator.validate_session(session.token.as_str()).is_none());

        authenticator.logout(Some(session.token.as_str()));
        authenticator.logout(Some("unknown"));
        authenticator.logout(None);
        assert!(sessions.is_empty());
    }

    #[test]
    fn test_session_ttl() {
        let (authenticator, _) = setup();
        assert_eq!(authenticator.session_ttl(), Duration::hours(24));
    }
}
