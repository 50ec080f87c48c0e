pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod sweeper;

pub use domain::system;
