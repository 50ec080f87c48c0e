use std::net::IpAddr;
use std::net::Ipv4Addr;
use std::net::ToSocketAddrs;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use sysinfo::Disks;
use sysinfo::System;

use crate::domain::system::errors::SystemInfoError;
use crate::domain::system::models::bytes_to_gb;
use crate::domain::system::models::percent;
use crate::domain::system::models::round2;
use crate::domain::system::models::HostSnapshot;
use crate::domain::system::ports::HostProbe;

/// Host probe backed by the `sysinfo` crate.
///
/// Keeps one `System` alive so CPU usage is measured between consecutive
/// snapshots rather than over an artificial sleep.
#[derive(Clone)]
pub struct SysinfoHostProbe {
    system: Arc<Mutex<System>>,
}

impl SysinfoHostProbe {
    /// Create the probe and take the first CPU reading.
    pub fn new() -> Self {
        let mut system = System::new();
        system.refresh_cpu();

        Self {
            system: Arc::new(Mutex::new(system)),
        }
    }
}

impl Default for SysinfoHostProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HostProbe for SysinfoHostProbe {
    async fn snapshot(&self) -> Result<HostSnapshot, SystemInfoError> {
        let system = Arc::clone(&self.system);

        tokio::task::spawn_blocking(move || collect(&mut system.lock()))
            .await
            .map_err(|e| SystemInfoError::TaskAborted(e.to_string()))
    }
}

fn collect(system: &mut System) -> HostSnapshot {
    system.refresh_cpu();
    system.refresh_memory();

    let hostname = System::host_name().unwrap_or_else(|| "localhost".to_string());
    let local_ip = resolve_local_ip(&hostname).to_string();

    let cpu_freq = system
        .cpus()
        .iter()
        .map(|cpu| cpu.frequency())
        .max()
        .filter(|mhz| *mhz > 0)
        .map(|mhz| mhz as f64);

    let ram_total = system.total_memory();
    let ram_used = system.used_memory();

    let (disk_total, disk_used) = root_disk_usage();

    HostSnapshot {
        os: System::name().unwrap_or_else(|| std::env::consts::OS.to_string()),
        os_release: System::kernel_version().unwrap_or_default(),
        os_version: System::long_os_version().unwrap_or_default(),
        architecture: std::env::consts::ARCH.to_string(),
        hostname,
        local_ip,
        cpu_count: system.physical_core_count().unwrap_or(0),
        cpu_count_logical: system.cpus().len(),
        cpu_freq,
        cpu_percent: round2(f64::from(system.global_cpu_info().cpu_usage())),
        ram_total_gb: bytes_to_gb(ram_total),
        ram_used_gb: bytes_to_gb(ram_used),
        ram_percent: percent(ram_used, ram_total),
        disk_total_gb: bytes_to_gb(disk_total),
        disk_used_gb: bytes_to_gb(disk_used),
        disk_percent: percent(disk_used, disk_total),
    }
}

/// Total and used bytes of the filesystem mounted at `/`, or of the first
/// disk when there is no such mount.
fn root_disk_usage() -> (u64, u64) {
    let disks = Disks::new_with_refreshed_list();
    let disk = disks
        .list()
        .iter()
        .find(|disk| disk.mount_point() == Path::new("/"))
        .or_else(|| disks.list().first());

    match disk {
        Some(disk) => {
            let total = disk.total_space();
            (total, total.saturating_sub(disk.available_space()))
        }
        None => (0, 0),
    }
}

fn resolve_local_ip(hostname: &str) -> IpAddr {
    (hostname, 0)
        .to_socket_addrs()
        .ok()
        .and_then(|mut addrs| addrs.find(|addr| addr.is_ipv4()))
        .map(|addr| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST))
}
