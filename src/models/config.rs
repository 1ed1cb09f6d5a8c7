//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub templates_dir: String,
    pub secret: String,
    pub auth_service_url: String,
    /// Root of the clinic REST API, e.g. `https://api.clinic.example/v1`.
    pub api_base_url: String,
    /// Bearer token attached to every API request when present.
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default = "default_api_timeout_secs")]
    pub api_timeout_secs: u64,
}

fn default_api_timeout_secs() -> u64 {
    10
}
