use std::fmt;
use std::sync::Arc;

use crate::core::provider::Zone;
use crate::path;
use crate::providers::skydns::rrsets::RecordSets;
use crate::store::KeyValueStore;

/// A domain served from one path prefix of a key-value store.
///
/// The prefix travels with the zone, so zones with different prefixes can
/// share a process and even a store connection.
pub struct SkyDnsZone {
    domain: String,
    path_prefix: String,
    store: Arc<dyn KeyValueStore>,
}

impl SkyDnsZone {
    pub fn new(domain: &str, path_prefix: &str, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            domain: domain.to_string(),
            path_prefix: path_prefix.to_string(),
            store,
        }
    }

    pub fn path_prefix(&self) -> &str {
        &self.path_prefix
    }

    /// Store key for a DNS name in this zone.
    pub(crate) fn key(&self, name: &str) -> String {
        path::path(&self.path_prefix, name)
    }

    pub(crate) fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }
}

impl fmt::Debug for SkyDnsZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkyDnsZone")
            .field("domain", &self.domain)
            .field("path_prefix", &self.path_prefix)
            .finish_non_exhaustive()
    }
}

impl Zone for SkyDnsZone {
    type RecordSets<'a> = RecordSets<'a>;

    fn name(&self) -> &str {
        &self.domain
    }

    fn id(&self) -> &str {
        &self.domain
    }

    fn resource_record_sets(&self) -> RecordSets<'_> {
        RecordSets::new(self)
    }
}
