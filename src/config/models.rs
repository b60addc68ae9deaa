use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs::File, io::Read};

fn default_poll_interval() -> u64 {
    600
}

fn default_retry_interval() -> u64 {
    60
}

fn default_record_ttl() -> u32 {
    600
}

fn default_record_line() -> String {
    // DNSPod's default routing line.
    "默认".to_string()
}

fn default_api_endpoint() -> String {
    "https://dnsapi.cn".to_string()
}

fn default_ip_echo_url() -> String {
    "https://api.ipify.org".to_string()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub domain: String,

    /// Empty means the zone apex.
    #[serde(default)]
    pub sub_domain: String,

    pub login_id: String,
    pub login_token: String,

    /// Seconds between poll cycles.
    #[serde(default = "default_poll_interval")]
    pub poll_interval: u64,

    /// Shorter interval used after an ip lookup failure.
    #[serde(default = "default_retry_interval")]
    pub retry_interval: u64,

    #[serde(default = "default_record_ttl")]
    pub record_ttl: u32,

    #[serde(default = "default_record_line")]
    pub record_line: String,

    // Overridable so tests can point at a local server.
    #[serde(default = "default_api_endpoint")]
    pub api_endpoint: String,

    #[serde(default = "default_ip_echo_url")]
    pub ip_echo_url: String,
}

impl Config {
    pub fn load(config_file: &str) -> Result<Self> {
        let mut file = File::open(config_file)
            .with_context(|| format!("Failed to open config file: {}", config_file))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .with_context(|| format!("Failed to read config file: {}", config_file))?;

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", config_file))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.domain.is_empty() {
            bail!("domain cannot be empty");
        }
        if self.login_id.is_empty() || self.login_token.is_empty() {
            bail!("login_id and login_token cannot be empty");
        }
        if self.poll_interval == 0 {
            bail!("poll_interval must be greater than 0");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::NamedTempFile;

    const FULL_CONFIG: &str = r#"
        domain: "example.com"
        sub_domain: "www"
        login_id: "12345"
        login_token: "test_token"
        poll_interval: 300
        retry_interval: 30
        record_ttl: 120
    "#;

    #[test]
    fn test_config_deserialization() {
        let config: Config = serde_yaml::from_str(FULL_CONFIG).unwrap();
        assert_eq!(config.domain, "example.com");
        assert_eq!(config.sub_domain, "www");
        assert_eq!(config.login_id, "12345");
        assert_eq!(config.login_token, "test_token");
        assert_eq!(config.poll_interval, 300);
        assert_eq!(config.retry_interval, 30);
        assert_eq!(config.record_ttl, 120);
    }

    #[test]
    fn test_config_defaults() {
        let config_str = r#"
            domain: "example.com"
            login_id: "12345"
            login_token: "test_token"
        "#;

        let config: Config = serde_yaml::from_str(config_str).unwrap();
        assert_eq!(config.sub_domain, "");
        assert_eq!(config.poll_interval, 600);
        assert_eq!(config.retry_interval, 60);
        assert_eq!(config.record_ttl, 600);
        assert_eq!(config.record_line, "默认");
        assert_eq!(config.api_endpoint, "https://dnsapi.cn");
        assert_eq!(config.ip_echo_url, "https://api.ipify.org");
    }

    #[test]
    fn test_load_from_file() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(&temp_file, FULL_CONFIG).unwrap();

        let config = Config::load(temp_file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.domain, "example.com");
    }

    #[test]
    fn test_missing_required_fields() {
        let invalid_config = r#"
            domain: "example.com"
            # missing login fields
        "#;

        let config: Result<Config, _> = serde_yaml::from_str(invalid_config);
        assert!(config.is_err());
    }

    #[test]
    fn test_empty_required_fields_rejected() {
        let config_str = r#"
            domain: ""
            login_id: "12345"
            login_token: "test_token"
        "#;

        let config: Config = serde_yaml::from_str(config_str).unwrap();
        assert!(config.validate().is_err());
    }
}
