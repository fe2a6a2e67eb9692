use async_openai::Client;
use async_openai::config::{Config, OpenAIConfig};

use crate::config::ApiKey;

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// OpenAI client built from an already validated key.
pub struct OpenAIClient {
    client: Client<OpenAIConfig>,
}

impl OpenAIClient {
    pub fn new(key: ApiKey, api_base: &str) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(key.as_str())
            .with_api_base(api_base.trim_end_matches('/'));

        log::debug!("Configured OpenAI client for {}", config.api_base());
        Self {
            client: Client::with_config(config),
        }
    }

    pub fn api_base(&self) -> &str {
        self.client.config().api_base()
    }
}
