mod settings;

pub use settings::{
    init_api_config, ApiConfig, ENDPOINT_VAR, SERVICE_KEY_VAR, TIMEOUT_VAR,
};
