use thiserror::Error;

/// Error for host information collection
#[derive(Debug, Clone, Error)]
pub enum SystemInfoError {
    #[error("Host probe task aborted: {0}")]
    TaskAborted(String),
}
