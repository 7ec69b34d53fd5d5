//! Persistence gateway implementations

pub mod in_memory;
pub mod postgrest;
#[cfg(feature = "rest")]
pub mod rest;

pub use in_memory::InMemoryGateway;
#[cfg(feature = "rest")]
pub use rest::RestGateway;
