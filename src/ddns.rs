use std::sync::LazyLock;
use std::time::Duration;

use log::{debug, error, info, warn};
use regex::Regex;
use tokio::time::sleep;

use crate::api::DnsApiClient;
use crate::config::Config;
use crate::error::UpdateError;

const RESOLVE_TIMEOUT: Duration = Duration::from_secs(30);

static IPV4_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}$").unwrap()
});

/// Deliberately permissive: this guards against empty or garbled resolver
/// bodies, not against out-of-range octets ("999.999.999.999" passes).
pub fn is_ipv4_literal(s: &str) -> bool {
    IPV4_PATTERN.is_match(s)
}

/// Outcome of one poll cycle, used to pick the next sleep interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// DNS now points at a new address.
    Updated,
    /// Resolved address matches the last one applied.
    Unchanged,
    /// Resolver answered, but not with an IPv4 literal.
    NoUsableAddress,
    /// The ip-echo request itself failed.
    ResolveFailed,
    /// Record lookup or modify failed; the last applied ip is untouched.
    UpdateFailed,
}

pub struct DdnsUpdater<C> {
    config: Config,
    api: C,
    http: reqwest::Client,
    last_ip: Option<String>,
}

impl<C: DnsApiClient + Send + Sync> DdnsUpdater<C> {
    pub fn new(config: Config, api: C) -> Self {
        Self {
            config,
            api,
            http: reqwest::Client::new(),
            last_ip: None,
        }
    }

    pub fn last_applied_ip(&self) -> Option<&str> {
        self.last_ip.as_deref()
    }

    async fn resolve_ip(&self) -> Result<String, UpdateError> {
        let body = self
            .http
            .get(&self.config.ip_echo_url)
            .timeout(RESOLVE_TIMEOUT)
            .send()
            .await
            .map_err(UpdateError::Resolve)?
            .error_for_status()
            .map_err(UpdateError::Resolve)?
            .text()
            .await
            .map_err(UpdateError::Resolve)?;

        if !is_ipv4_literal(&body) {
            return Err(UpdateError::InvalidAddress(body));
        }
        Ok(body)
    }

    async fn apply_update(&self, ip: &str) -> Result<(), UpdateError> {
        let (domain, record) = self
            .api
            .get_record(&self.config.domain, &self.config.sub_domain)
            .await?;
        debug!(
            "record {} for domain {} currently points at {}",
            record.id, domain.id, record.value
        );

        self.api
            .modify_record(
                &self.config.sub_domain,
                ip,
                &domain,
                &record,
                self.config.record_ttl,
            )
            .await
    }

    pub async fn run_cycle(&mut self) -> CycleOutcome {
        let ip = match self.resolve_ip().await {
            Ok(ip) => ip,
            Err(UpdateError::InvalidAddress(body)) => {
                warn!("resolver returned unusable body {:?}", body);
                return CycleOutcome::NoUsableAddress;
            }
            Err(e) => {
                error!("{}", e);
                return CycleOutcome::ResolveFailed;
            }
        };
        info!("current ip {}", ip);

        if self.last_ip.as_deref() == Some(ip.as_str()) {
            debug!("ip unchanged since last update");
            return CycleOutcome::Unchanged;
        }

        match self.apply_update(&ip).await {
            Ok(()) => {
                info!("set ip {}", ip);
                self.last_ip = Some(ip);
                CycleOutcome::Updated
            }
            Err(e) => {
                // last_ip stays as-is so the next cycle retries this address.
                error!("update failed: {}", e);
                CycleOutcome::UpdateFailed
            }
        }
    }

    pub fn cycle_delay(&self, outcome: CycleOutcome) -> Duration {
        match outcome {
            CycleOutcome::ResolveFailed => Duration::from_secs(self.config.retry_interval),
            _ => Duration::from_secs(self.config.poll_interval),
        }
    }

    pub async fn run(&mut self) {
        loop {
            let outcome = self.run_cycle().await;
            sleep(self.cycle_delay(outcome)).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_dotted_quads() {
        assert!(is_ipv4_literal("1.2.3.4"));
        assert!(is_ipv4_literal("192.168.100.200"));
        // Out-of-range octets pass by design.
        assert!(is_ipv4_literal("256.1.1.1"));
        assert!(is_ipv4_literal("999.999.999.999"));
    }

    #[test]
    fn test_rejects_non_addresses() {
        assert!(!is_ipv4_literal(""));
        assert!(!is_ipv4_literal("abc"));
        assert!(!is_ipv4_literal("1.2.3"));
        assert!(!is_ipv4_literal("1.2.3.4.5"));
        assert!(!is_ipv4_literal("1.2.3.4\n"));
        assert!(!is_ipv4_literal("x1.2.3.4"));
        assert!(!is_ipv4_literal("1234.1.1.1"));
    }
}
