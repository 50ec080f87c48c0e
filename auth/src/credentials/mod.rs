pub mod errors;
pub mod store;

pub use errors::CredentialError;
pub use store::CredentialStore;
pub use store::StaticCredentialStore;
