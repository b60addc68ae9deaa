use super::models::{DnsRecord, DomainRecord};
use crate::error::UpdateError;
use async_trait::async_trait;

#[async_trait]
pub trait DnsApiClient {
    async fn get_record(
        &self,
        domain: &str,
        sub_domain: &str,
    ) -> Result<(DomainRecord, DnsRecord), UpdateError>;

    async fn modify_record(
        &self,
        sub_domain: &str,
        ip: &str,
        domain: &DomainRecord,
        record: &DnsRecord,
        ttl: u32,
    ) -> Result<(), UpdateError>;
}
