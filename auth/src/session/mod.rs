pub mod clock;
pub mod models;
pub mod store;

pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use models::Session;
pub use models::SessionToken;
pub use store::InMemorySessionStore;
pub use store::SessionStore;
