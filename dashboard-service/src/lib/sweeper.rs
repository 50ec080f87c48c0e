use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use auth::CredentialStore;
use auth::SessionStore;
use tokio::task::JoinHandle;

/// Spawn the background task that drops expired sessions every `interval`.
///
/// Lookups already evict expired sessions they touch; this covers the ones
/// nobody presents again.
pub fn spawn_session_sweeper<C, S>(
    authenticator: Arc<Authenticator<C, S>>,
    interval: Duration,
) -> JoinHandle<()>
where
    C: CredentialStore,
    S: SessionStore,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // First tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let removed = authenticator.purge_expired_sessions();
            if removed > 0 {
                tracing::debug!(removed, "Swept expired sessions");
            }
        }
    })
}
