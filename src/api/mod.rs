//! Remote HTTP source: wire records, mapping boundary and snapshot fetcher

pub mod client;
pub mod raw;

pub use client::ApiClient;
