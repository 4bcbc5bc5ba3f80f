use async_trait::async_trait;
use log::{debug, error};

use crate::core::provider::ResourceRecordSets;
use crate::core::record::{ResourceRecordSet, RrsType};
use crate::error::Error;
use crate::providers::skydns::changeset::Changeset;
use crate::providers::skydns::error::map_error;
use crate::providers::skydns::types::Service;
use crate::providers::skydns::zone::SkyDnsZone;

/// Record-set view of a zone.
pub struct RecordSets<'a> {
    zone: &'a SkyDnsZone,
}

impl<'a> RecordSets<'a> {
    pub(crate) fn new(zone: &'a SkyDnsZone) -> Self {
        Self { zone }
    }
}

#[async_trait]
impl<'a> ResourceRecordSets for RecordSets<'a> {
    type Changeset<'c>
        = Changeset<'c>
    where
        Self: 'c;

    async fn list(&self) -> Result<Vec<ResourceRecordSet>, Error> {
        Err(Error::Unsupported(
            "listing every record set in a zone".to_string(),
        ))
    }

    async fn get(&self, name: &str) -> Result<Option<ResourceRecordSet>, Error> {
        let key = self.zone.key(name);
        let node = match self.zone.store().get(&key, true).await {
            Ok(node) => node,
            Err(e) if e.is_key_not_found() => {
                debug!("Subdomain {name:?} does not exist");
                return Ok(None);
            }
            Err(e) => {
                error!("Failed to get {name:?} from the store: {e}");
                return Err(map_error(e));
            }
        };
        if node.is_empty() {
            debug!("Subdomain {name:?} has no records");
            return Ok(None);
        }

        // The type follows the last leaf read, matching the order the
        // store returns leaves in.
        let mut rrset: Option<ResourceRecordSet> = None;
        for leaf in node.leaves() {
            let service: Service = serde_json::from_str(leaf.value.as_deref().unwrap_or_default())
                .map_err(|e| Error::Decode(format!("{}: {e}", leaf.key)))?;
            let rrs_type = RrsType::infer(&service.host);

            let set = rrset
                .get_or_insert_with(|| ResourceRecordSet::new(name, Vec::new(), 0, rrs_type));
            set.rrdatas.push(service.host);
            set.ttl = service.ttl;
            set.rrs_type = rrs_type;
        }

        if rrset.is_none() {
            debug!("Subdomain {name:?} has no records");
        }
        Ok(rrset)
    }

    fn new_record_set(
        &self,
        name: &str,
        rrdatas: Vec<String>,
        ttl: u32,
        rrs_type: RrsType,
    ) -> ResourceRecordSet {
        ResourceRecordSet::new(name, rrdatas, ttl, rrs_type)
    }

    fn start_changeset(&self) -> Changeset<'_> {
        Changeset::new(self.zone)
    }
}
