use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub eth_rpc_url: String,
    pub request_timeout: Duration,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("missing ETH_RPC_URL or INFURA_API_KEY env var")]
    MissingRpcEndpoint,
    #[error("invalid REQUEST_TIMEOUT_SECS value: {0}")]
    InvalidTimeout(String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let eth_rpc_url = match env::var("ETH_RPC_URL") {
            Ok(url) => url,
            Err(_) => env::var("INFURA_API_KEY")
                .map(|key| format!("https://mainnet.infura.io/v3/{key}"))
                .map_err(|_| ConfigError::MissingRpcEndpoint)?,
        };

        let request_timeout = match env::var("REQUEST_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw
                    .parse()
                    .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?;
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(30),
        };

        Ok(Self {
            eth_rpc_url,
            request_timeout,
        })
    }
}
