use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::InMemorySessionStore;
use auth::StaticCredentialStore;
use dashboard_service::domain::system::errors::SystemInfoError;
use dashboard_service::domain::system::models::HostSnapshot;
use dashboard_service::domain::system::models::SystemInfo;
use dashboard_service::domain::system::ports::SystemInfoServicePort;
use dashboard_service::inbound::http::router::create_router;

/// SHA-256 of "admin123"
const ADMIN_HASH: &str = "240be518fabd2724ddb6f04eeb1da5967448d7e831c08c8fa822809f74c720a9";
/// SHA-256 of "user123"
const USER_HASH: &str = "e606e38b0d8c19b24cf0ee3808183162ea7cd63ff7912dbb22b5e803286b4446";

/// System info source that never touches the OS or the network
pub struct StubSystemInfo;

#[async_trait]
impl SystemInfoServicePort for StubSystemInfo {
    async fn system_info(&self) -> Result<SystemInfo, SystemInfoError> {
        Ok(SystemInfo {
            host: HostSnapshot {
                os: "Linux".to_string(),
                hostname: "test-host".to_string(),
                local_ip: "127.0.0.1".to_string(),
                cpu_count: 4,
                cpu_count_logical: 8,
                ram_total_gb: 16.0,
                ..HostSnapshot::default()
            },
            internet: false,
        })
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub sessions: Arc<InMemorySessionStore>,
    /// Client keeping cookies between requests, never following redirects
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let credentials = Arc::new(
            StaticCredentialStore::from_hashes([("admin", ADMIN_HASH), ("user", USER_HASH)])
                .expect("Failed to build credential store"),
        );
        let sessions = Arc::new(InMemorySessionStore::new(chrono::Duration::hours(24)));
        let authenticator = Arc::new(Authenticator::new(credentials, Arc::clone(&sessions)));

        let router = create_router(authenticator, Arc::new(StubSystemInfo), false);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            sessions,
            api_client: reqwest::Client::builder()
                .cookie_store(true)
                .redirect(reqwest::redirect::Policy::none())
                .build()
                .expect("Failed to create reqwest client"),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request without the shared cookie store
    pub fn get_anonymous(&self, path: &str) -> reqwest::RequestBuilder {
        reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to create reqwest client")
            .get(&format!("{}{}", self.address, path))
    }

    /// Log in through the JSON endpoint, storing the session cookie
    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/login")
            .json(&serde_json::json!({
                "username": username,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }
}

/// Value of the `session_id` cookie set by a response, if any
pub fn session_cookie(response: &reqwest::Response) -> Option<String> {
    response
        .cookies()
        .find(|cookie| cookie.name() == "session_id")
        .map(|cookie| cookie.value().to_string())
}
