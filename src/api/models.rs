use serde::Deserialize;

/// Status block attached to every DNSPod envelope. Code "1" is success.
#[derive(Debug, Deserialize)]
pub struct ApiStatus {
    pub code: String,
    pub message: String,
}

/// Minimal envelope used to check the status block before decoding the
/// operation-specific payload.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope {
    pub status: ApiStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DomainRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: String,
}

// Only `id` and `value` are consulted; the rest is carried through and
// defaulted so partial provider responses still decode.
#[derive(Debug, Clone, Deserialize)]
pub struct DnsRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub line: String,
    #[serde(default, rename = "type")]
    pub record_type: String,
    #[serde(default)]
    pub mx: String,
    #[serde(default)]
    pub updated_on: String,
}

#[derive(Debug, Deserialize)]
pub struct RecordListResponse {
    pub status: ApiStatus,
    pub domain: DomainRecord,
    #[serde(default)]
    pub records: Vec<DnsRecord>,
}
