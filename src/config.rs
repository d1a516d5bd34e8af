use std::path::PathBuf;
use std::time::Duration;

use clap::Args;

/// Runtime configuration, read from flags or the environment (`.env` included).
#[derive(Debug, Clone, Args)]
pub struct Config {
    /// Base URL of the catalog API serving `/stock/{id}` and `/products/{id}`
    #[arg(long, env = "CART_API_URL", default_value = "http://localhost:3333")]
    pub api_url: String,

    /// Directory where the cart is persisted
    #[arg(long, env = "CART_STORAGE_DIR", default_value = ".cart")]
    pub storage_dir: PathBuf,

    /// Timeout for each catalog request, in seconds
    #[arg(long, env = "CART_HTTP_TIMEOUT_SECS", default_value_t = 10)]
    pub http_timeout_secs: u64,

    /// Log filter (trace, debug, info, warn, error)
    #[arg(long, env = "CART_LOG", default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
