use async_trait::async_trait;
use log::{debug, info};

use crate::core::provider::ResourceRecordChangeset;
use crate::core::record::ResourceRecordSet;
use crate::error::Error;
use crate::path;
use crate::providers::skydns::error::map_error;
use crate::providers::skydns::types::Service;
use crate::providers::skydns::zone::SkyDnsZone;
use crate::store::SetOptions;

/// A batch of removals and additions against one zone.
///
/// `apply` is not transactional: whatever was deleted or written before a
/// failing step stays in the store, and applying twice replays the batch.
pub struct Changeset<'a> {
    zone: &'a SkyDnsZone,
    additions: Vec<ResourceRecordSet>,
    removals: Vec<ResourceRecordSet>,
}

impl<'a> Changeset<'a> {
    pub(crate) fn new(zone: &'a SkyDnsZone) -> Self {
        Self {
            zone,
            additions: Vec::new(),
            removals: Vec::new(),
        }
    }

    pub fn additions(&self) -> &[ResourceRecordSet] {
        &self.additions
    }

    pub fn removals(&self) -> &[ResourceRecordSet] {
        &self.removals
    }

    async fn remove_name(&self, name: &str) -> Result<(), Error> {
        let key = self.zone.key(name);
        match self.zone.store().delete(&key, true).await {
            Ok(()) => {
                info!("Removed records for {name:?}");
                Ok(())
            }
            Err(e) if e.is_key_not_found() => {
                debug!("Nothing stored for {name:?}, skipping removal");
                Ok(())
            }
            Err(e) => Err(map_error(e)),
        }
    }

    async fn add_value(&self, name: &str, host: &str, ttl: u32) -> Result<(), Error> {
        let value = serde_json::to_string(&Service {
            host: host.to_string(),
            ttl,
        })
        .map_err(|e| Error::InvalidInput(e.to_string()))?;
        let label = path::content_hash(&value);
        let key = self.zone.key(&path::build_dns_name(&[name, label.as_str()]));

        match self.zone.store().get(&key, false).await {
            Ok(_) => return Err(Error::Conflict(key)),
            Err(e) if e.is_key_not_found() => {}
            Err(e) => return Err(map_error(e)),
        }

        // Create-only, so a concurrent writer of the same value loses with
        // a conflict instead of silently overwriting.
        self.zone
            .store()
            .set(&key, &value, SetOptions::create_only())
            .await
            .map_err(map_error)?;
        info!("Added {host:?} (ttl {ttl}) to {name:?}");
        Ok(())
    }
}

#[async_trait]
impl<'a> ResourceRecordChangeset for Changeset<'a> {
    fn add(&mut self, rrset: ResourceRecordSet) -> &mut Self {
        self.additions.push(rrset);
        self
    }

    fn remove(&mut self, rrset: ResourceRecordSet) -> &mut Self {
        self.removals.push(rrset);
        self
    }

    async fn apply(&self) -> Result<(), Error> {
        for removal in &self.removals {
            self.remove_name(&removal.name).await?;
        }

        for addition in &self.additions {
            for rrdata in &addition.rrdatas {
                self.add_value(&addition.name, rrdata, addition.ttl).await?;
            }
        }
        Ok(())
    }
}
