//! SkyDNS provider: DNS records kept as JSON leaves in an etcd key tree.

pub mod changeset;
pub mod error;
pub mod rrsets;
pub mod types;
pub mod zone;


pub use changeset::Changeset;
pub use rrsets::RecordSets;
pub use zone::SkyDnsZone;

use log::info;
use std::sync::Arc;

use crate::config::Config;
use crate::core::provider::DnsProvider;
use crate::error::Error;
use crate::store::{EtcdClient, KeyValueStore};
use crate::providers::skydns::error::map_error;

pub const PROVIDER_NAME: &str = "local-skydns";

/// Serves a single zone out of a SkyDNS key tree.
#[derive(Debug)]
pub struct SkyDnsProvider {
    zone: SkyDnsZone,
}

impl SkyDnsProvider {
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let client = EtcdClient::new(config.etcd_endpoints.clone(), config.request_timeout)
            .map_err(map_error)?;
        info!(
            "Using SkyDNS provider for {:?} at {} (prefix {:?})",
            config.domain,
            config.etcd_endpoints.join(","),
            config.etcd_path_prefix
        );
        Ok(Self::with_store(
            Arc::new(client),
            &config.etcd_path_prefix,
            &config.domain,
        ))
    }

    pub fn with_store(store: Arc<dyn KeyValueStore>, path_prefix: &str, domain: &str) -> Self {
        Self {
            zone: SkyDnsZone::new(domain, path_prefix, store),
        }
    }

    pub fn zone(&self) -> &SkyDnsZone {
        &self.zone
    }
}

impl DnsProvider for SkyDnsProvider {
    type Zone = SkyDnsZone;

    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn zones(&self) -> Vec<&SkyDnsZone> {
        vec![&self.zone]
    }
}
