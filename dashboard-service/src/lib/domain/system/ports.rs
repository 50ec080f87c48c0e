use async_trait::async_trait;

use crate::domain::system::errors::SystemInfoError;
use crate::domain::system::models::HostSnapshot;
use crate::domain::system::models::SystemInfo;

/// Port for system information served to the dashboard.
#[async_trait]
pub trait SystemInfoServicePort: Send + Sync + 'static {
    /// Current host information, possibly served from cache.
    ///
    /// # Returns
    /// Host snapshot with internet reachability
    ///
    /// # Errors
    /// * `TaskAborted` - Collection task panicked or was cancelled
    async fn system_info(&self) -> Result<SystemInfo, SystemInfoError>;
}

/// Operating system queries.
#[async_trait]
pub trait HostProbe: Send + Sync + 'static {
    /// Collect a fresh snapshot of the host.
    ///
    /// # Errors
    /// * `TaskAborted` - Collection task panicked or was cancelled
    async fn snapshot(&self) -> Result<HostSnapshot, SystemInfoError>;
}

/// Internet reachability check.
#[async_trait]
pub trait ConnectivityProbe: Send + Sync + 'static {
    /// True when the check target answered successfully in time.
    async fn is_online(&self) -> bool;
}
