//! Service configuration.

use std::path::PathBuf;

/// Contacts service configuration.
#[derive(Debug, Clone)]
pub struct CrmConfig {
    /// Directory served for paths that match no API route
    pub static_dir: PathBuf,
    /// Request body read timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Start with the three demo customers
    pub seed_demo_data: bool,
}

impl Default for CrmConfig {
    fn default() -> Self {
        Self {
            static_dir: PathBuf::from("./static"),
            request_timeout_ms: 5000, // 5 seconds default
            seed_demo_data: true,
        }
    }
}
