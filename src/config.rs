use serde::Deserialize;
use std::{env, fmt};

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub addr: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Clone, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

// Keeps the key out of logs.
impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub llm: LlmConfig,
}

/// Name of the optional `config/{env}.toml` overlay.
pub fn run_env() -> String {
    env::var("RUN_ENV").unwrap_or_else(|_| "local".into())
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let env = run_env();

        let builder = ::config::Config::builder()
            .set_default("llm.api_key", env::var("OPENAI_API_KEY").unwrap_or_default())?
            .add_source(config::File::with_name("config/default.toml"))
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            .add_source(config::File::with_name("config/local.toml").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"));

        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.llm.api_key.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "llm.api_key is not set (use APP__LLM__API_KEY or OPENAI_API_KEY)".to_string(),
            ));
        }
        if self.llm.timeout_secs == 0 {
            return Err(config::ConfigError::Message("llm.timeout_secs must be positive".to_string()));
        }
        Ok(())
    }
}
