use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::system::errors::SystemInfoError;
use crate::domain::system::models::SystemInfo;
use crate::domain::system::ports::ConnectivityProbe;
use crate::domain::system::ports::HostProbe;
use crate::domain::system::ports::SystemInfoServicePort;

/// Domain service serving host information from a short-lived cache.
///
/// Concurrent callers that miss the cache wait for a single refresh.
pub struct SystemInfoService<HP, CP>
where
    HP: HostProbe,
    CP: ConnectivityProbe,
{
    host_probe: Arc<HP>,
    connectivity_probe: Arc<CP>,
    cache_ttl: Duration,
    cache: Mutex<Option<CachedInfo>>,
}

struct CachedInfo {
    collected_at: Instant,
    info: SystemInfo,
}

impl<HP, CP> SystemInfoService<HP, CP>
where
    HP: HostProbe,
    CP: ConnectivityProbe,
{
    /// Create a new system info service with injected probes.
    ///
    /// # Arguments
    /// * `host_probe` - Operating system query implementation
    /// * `connectivity_probe` - Internet reachability check
    /// * `cache_ttl` - How long a collected snapshot is served as is
    pub fn new(host_probe: Arc<HP>, connectivity_probe: Arc<CP>, cache_ttl: Duration) -> Self {
        Self {
            host_probe,
            connectivity_probe,
            cache_ttl,
            cache: Mutex::new(None),
        }
    }
}

#[async_trait]
impl<HP, CP> SystemInfoServicePort for SystemInfoService<HP, CP>
where
    HP: HostProbe,
    CP: ConnectivityProbe,
{
    async fn system_info(&self) -> Result<SystemInfo, SystemInfoError> {
        let mut cache = self.cache.lock().await;

        if let Some(cached) = cache.as_ref() {
            if cached.collected_at.elapsed() <= self.cache_ttl {
                return Ok(cached.info.clone());
            }
        }

        let (host, internet) =
            tokio::join!(self.host_probe.snapshot(), self.connectivity_probe.is_online());
        let info = SystemInfo {
            host: host?,
            internet,
        };

        tracing::debug!(
            hostname = %info.host.hostname,
            internet = info.internet,
            "System info refreshed"
        );

        *cache = Some(CachedInfo {
            collected_at: Instant::now(),
            info: info.clone(),
        });

        Ok(info)
    }
}
