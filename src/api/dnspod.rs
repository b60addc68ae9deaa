use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use serde::de::DeserializeOwned;

use super::client::DnsApiClient;
use super::models::{ApiEnvelope, DnsRecord, DomainRecord, RecordListResponse};
use crate::error::UpdateError;

const PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

pub struct DnsPodClient {
    client: reqwest::Client,
    endpoint: String,
    login_token: String,
    record_line: String,
}

impl DnsPodClient {
    pub fn new(
        endpoint: impl Into<String>,
        login_id: &str,
        login_token: &str,
        record_line: impl Into<String>,
    ) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            endpoint,
            login_token: format!("{},{}", login_id, login_token),
            record_line: record_line.into(),
        }
    }

    async fn call<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        mut params: Vec<(&'static str, String)>,
    ) -> Result<T, UpdateError> {
        params.push(("login_token", self.login_token.clone()));
        params.push(("format", "json".to_string()));

        let response = self
            .client
            .post(format!("{}/{}", self.endpoint, operation))
            .timeout(PROVIDER_TIMEOUT)
            .form(&params)
            .send()
            .await
            .map_err(UpdateError::ProviderTransport)?
            .error_for_status()
            .map_err(UpdateError::ProviderTransport)?;

        let text = response
            .text()
            .await
            .map_err(UpdateError::ProviderTransport)?;

        // Check the status block first so application-level rejections
        // surface as ProviderStatus rather than a decode failure on a
        // payload the provider never sent.
        let envelope: ApiEnvelope =
            serde_json::from_str(&text).map_err(UpdateError::ProviderDecode)?;
        if envelope.status.code != "1" {
            return Err(UpdateError::ProviderStatus {
                operation,
                code: envelope.status.code,
                message: envelope.status.message,
            });
        }

        serde_json::from_str(&text).map_err(UpdateError::ProviderDecode)
    }
}

#[async_trait]
impl DnsApiClient for DnsPodClient {
    async fn get_record(
        &self,
        domain: &str,
        sub_domain: &str,
    ) -> Result<(DomainRecord, DnsRecord), UpdateError> {
        let mut params = vec![("domain", domain.to_string())];
        if !sub_domain.is_empty() {
            params.push(("sub_domain", sub_domain.to_string()));
        }

        let response: RecordListResponse = self.call("Record.List", params).await?;
        debug!("records for {}: {:?}", domain, response.records);

        // The provider does not guarantee a non-empty list.
        let record =
            response
                .records
                .into_iter()
                .next()
                .ok_or_else(|| UpdateError::NoMatchingRecord {
                    domain: domain.to_string(),
                    sub_domain: sub_domain.to_string(),
                })?;

        Ok((response.domain, record))
    }

    async fn modify_record(
        &self,
        sub_domain: &str,
        ip: &str,
        domain: &DomainRecord,
        record: &DnsRecord,
        ttl: u32,
    ) -> Result<(), UpdateError> {
        let params = vec![
            ("domain_id", domain.id.clone()),
            ("record_id", record.id.clone()),
            ("sub_domain", sub_domain.to_string()),
            ("record_type", "A".to_string()),
            ("record_line", self.record_line.clone()),
            ("value", ip.to_string()),
            ("ttl", ttl.to_string()),
            ("status", "enable".to_string()),
        ];

        let _: ApiEnvelope = self.call("Record.Modify", params).await?;
        Ok(())
    }
}
