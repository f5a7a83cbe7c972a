//! Process configuration read from the environment

use std::time::Duration;

/// Configuration for the bot server and its collaborators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    pub port: u16,
    /// Base URL of the project management service
    pub project_service_url: String,
    /// Base URL of the service holding API documents
    pub spec_service_url: String,
    /// Base URL where modeled tests are stored as suggestions
    pub model_persistence_url: String,
    /// Base URL of the test code generator
    pub code_generation_url: String,
    pub http_timeout: Duration,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            project_service_url: "http://localhost:8081".to_string(),
            spec_service_url: "http://localhost:8082".to_string(),
            model_persistence_url: "http://localhost:8083".to_string(),
            code_generation_url: "http://localhost:8084".to_string(),
            http_timeout: Duration::from_secs(30),
        }
    }
}

impl BotConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source; unset or unparsable values
    /// keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            port: lookup("API_TESTING_BOT_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            project_service_url: lookup("PROJECT_SERVICE_URL")
                .unwrap_or(defaults.project_service_url),
            spec_service_url: lookup("SPEC_SERVICE_URL").unwrap_or(defaults.spec_service_url),
            model_persistence_url: lookup("MODEL_PERSISTENCE_URL")
                .unwrap_or(defaults.model_persistence_url),
            code_generation_url: lookup("CODE_GENERATION_URL")
                .unwrap_or(defaults.code_generation_url),
            http_timeout: lookup("HTTP_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .map_or(defaults.http_timeout, Duration::from_secs),
        }
    }
}
