use crate::core::record::{ResourceRecordSet, RrsType};
use crate::error::Error;
use async_trait::async_trait;

pub trait DnsProvider: Send + Sync {
    type Zone: Zone;

    fn name(&self) -> &str;
    fn zones(&self) -> Vec<&Self::Zone>;
}

pub trait Zone: Send + Sync {
    type RecordSets<'a>: ResourceRecordSets
    where
        Self: 'a;

    fn name(&self) -> &str;
    fn id(&self) -> &str;
    fn resource_record_sets(&self) -> Self::RecordSets<'_>;
}

#[async_trait]
pub trait ResourceRecordSets: Send + Sync {
    type Changeset<'a>: ResourceRecordChangeset
    where
        Self: 'a;

    async fn list(&self) -> Result<Vec<ResourceRecordSet>, Error>;
    /// `Ok(None)` when nothing is stored for `name`.
    async fn get(&self, name: &str) -> Result<Option<ResourceRecordSet>, Error>;
    fn new_record_set(
        &self,
        name: &str,
        rrdatas: Vec<String>,
        ttl: u32,
        rrs_type: RrsType,
    ) -> ResourceRecordSet;
    fn start_changeset(&self) -> Self::Changeset<'_>;
}

#[async_trait]
pub trait ResourceRecordChangeset: Send + Sync {
    fn add(&mut self, rrset: ResourceRecordSet) -> &mut Self;
    fn remove(&mut self, rrset: ResourceRecordSet) -> &mut Self;
    /// Removals first, then additions. Stops at the first failure without
    /// undoing what was already written.
    async fn apply(&self) -> Result<(), Error>;
}
