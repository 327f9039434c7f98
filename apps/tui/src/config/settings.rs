use color_eyre::eyre::eyre;
use dotenv::dotenv;
use std::env;
use std::time::Duration;

use crate::api::DEFAULT_ENDPOINT;

pub const SERVICE_KEY_VAR: &str = "SERVICE_KEY";
pub const ENDPOINT_VAR: &str = "BLACKSPOT_ENDPOINT";
pub const TIMEOUT_VAR: &str = "REQUEST_TIMEOUT_SECS";

/// Settings for talking to the accident API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub endpoint: String,
    pub service_key: Option<String>,
    /// No timeout unless configured
    pub timeout: Option<Duration>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            service_key: None,
            timeout: None,
        }
    }
}

/// Initializes the API configuration from the environment
/// (a `.env` file in the working directory is loaded first)
pub fn init_api_config() -> color_eyre::eyre::Result<ApiConfig> {
    // Load environment variables from .env file
    dotenv().ok();

    from_lookup(|name| env::var(name).ok())
}

fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> color_eyre::eyre::Result<ApiConfig> {
    let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    let endpoint = non_empty(ENDPOINT_VAR).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
    let service_key = non_empty(SERVICE_KEY_VAR).map(|key| key.trim().to_string());

    let timeout = match non_empty(TIMEOUT_VAR) {
        Some(raw) => {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|e| eyre!("Invalid {TIMEOUT_VAR} value {raw:?}: {e}"))?;
            Some(Duration::from_secs(secs))
        }
        None => None,
    };

    Ok(ApiConfig {
        endpoint,
        service_key,
        timeout,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() -> color_eyre::Result<()> {
        let config = from_lookup(lookup(&[]))?;
        assert_eq!(config, ApiConfig::default());
        Ok(())
    }

    #[test]
    fn reads_key_endpoint_and_timeout() -> color_eyre::Result<()> {
        let config = from_lookup(lookup(&[
            (SERVICE_KEY_VAR, " secret "),
            (ENDPOINT_VAR, "http://localhost:8080/blackspots"),
            (TIMEOUT_VAR, "15"),
        ]))?;
        assert_eq!(config.service_key.as_deref(), Some("secret"));
        assert_eq!(config.endpoint, "http://localhost:8080/blackspots");
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
        Ok(())
    }

    #[test]
    fn blank_key_counts_as_missing() -> color_eyre::Result<()> {
        let config = from_lookup(lookup(&[(SERVICE_KEY_VAR, "   ")]))?;
        assert_eq!(config.service_key, None);
        Ok(())
    }

    #[test]
    fn invalid_timeout_is_an_error() {
        assert!(from_lookup(lookup(&[(TIMEOUT_VAR, "soon")])).is_err());
    }
}
