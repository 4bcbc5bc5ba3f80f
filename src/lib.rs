//! DNS record sets for a zone, stored as SkyDNS-style leaves in a
//! hierarchical key-value store.

pub mod config;
pub mod core;
pub mod error;
pub mod path;
pub mod providers;
pub mod store;

pub use config::Config;
pub use error::Error;
pub use providers::skydns::SkyDnsProvider;
