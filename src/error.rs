use thiserror::Error;

/// Failures local to a single poll cycle. None of these are fatal to the
/// process; the loop logs them and tries again on the next tick.
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("ip lookup failed: {0}")]
    Resolve(#[source] reqwest::Error),

    #[error("resolved body {0:?} is not an IPv4 literal")]
    InvalidAddress(String),

    #[error("provider request failed: {0}")]
    ProviderTransport(#[source] reqwest::Error),

    #[error("provider response could not be decoded: {0}")]
    ProviderDecode(#[source] serde_json::Error),

    #[error("provider rejected {operation}: code {code} ({message})")]
    ProviderStatus {
        operation: &'static str,
        code: String,
        message: String,
    },

    #[error("no record found for {sub_domain}.{domain}")]
    NoMatchingRecord { domain: String, sub_domain: String },
}
