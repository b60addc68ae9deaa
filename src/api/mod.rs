pub mod client;
pub mod dnspod;
pub mod models;

pub use client::DnsApiClient;
pub use dnspod::DnsPodClient;
