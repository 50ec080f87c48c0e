pub mod connectivity;
pub mod host;

pub use connectivity::HttpConnectivityProbe;
pub use host::SysinfoHostProbe;
