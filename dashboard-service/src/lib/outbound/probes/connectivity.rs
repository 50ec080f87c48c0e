use std::time::Duration;

use async_trait::async_trait;

use crate::domain::system::ports::ConnectivityProbe;

/// Reports the host online when a GET to a well-known URL returns 200.
pub struct HttpConnectivityProbe {
    client: reqwest::Client,
    url: String,
}

impl HttpConnectivityProbe {
    /// Create a new connectivity probe.
    ///
    /// # Arguments
    /// * `url` - Address to fetch
    /// * `timeout` - Upper bound for the whole request
    ///
    /// # Errors
    /// * `reqwest::Error` - HTTP client could not be built
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl ConnectivityProbe for HttpConnectivityProbe {
    async fn is_online(&self) -> bool {
        match self.client.get(&self.url).send().await {
            Ok(response) => response.status() == reqwest::StatusCode::OK,
            Err(e) => {
                tracing::warn!(url = %self.url, error = %e, "Internet check failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_target_is_offline() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let address = listener.local_addr().unwrap();
        drop(listener);

        let probe = HttpConnectivityProbe::new(
            format!("http://{}/", address),
            Duration::from_millis(500),
        )
        .expect("Failed to build probe");

        assert!(!probe.is_online().await);
    }

    #[tokio::test]
    async fn test_reachable_target_is_online() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let address = listener.local_addr().unwrap();
        let app = axum::Router::new().route("/", axum::routing::get(|| async { "ok" }));
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        let probe =
            HttpConnectivityProbe::new(format!("http://{}/", address), Duration::from_secs(2))
                .expect("Failed to build probe");

        assert!(probe.is_online().await);
    }
}
