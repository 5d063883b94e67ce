//! Content service configuration.

/// Configuration for payload and inquiry validation limits.
#[derive(Debug, Clone)]
pub struct ContentConfig {
    /// Maximum notice title length in characters (default: 200).
    pub max_title_len: usize,
    /// Maximum notice body length in characters (default: 20,000).
    pub max_body_len: usize,
    /// Maximum serialized size of section props in bytes
    /// (default: 65,536).
    pub max_props_bytes: usize,
    /// Maximum inquiry message length in characters (default: 5,000).
    pub max_message_len: usize,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            max_title_len: 200,
            max_body_len: 20_000,
            max_props_bytes: 65_536,
            max_message_len: 5_000,
        }
    }
}
