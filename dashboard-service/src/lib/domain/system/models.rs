use serde::Serialize;

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Point-in-time description of the host, as collected by a `HostProbe`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HostSnapshot {
    pub os: String,
    pub os_release: String,
    pub os_version: String,
    pub architecture: String,
    pub hostname: String,
    pub local_ip: String,
    pub cpu_count: usize,
    pub cpu_count_logical: usize,
    /// Maximum CPU frequency in MHz, if the platform reports one
    pub cpu_freq: Option<f64>,
    pub cpu_percent: f64,
    pub ram_total_gb: f64,
    pub ram_used_gb: f64,
    pub ram_percent: f64,
    pub disk_total_gb: f64,
    pub disk_used_gb: f64,
    pub disk_percent: f64,
}

/// Host snapshot plus internet reachability, as served to the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemInfo {
    #[serde(flatten)]
    pub host: HostSnapshot,
    pub internet: bool,
}

/// Bytes to gigabytes, rounded to two decimals.
pub fn bytes_to_gb(bytes: u64) -> f64 {
    round2(bytes as f64 / BYTES_PER_GB)
}

/// Share of `used` in `total` as a percentage, rounded to one decimal.
pub fn percent(used: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (used as f64 / total as f64 * 1000.0).round() / 10.0
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
