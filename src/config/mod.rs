use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";
const DEFAULT_DATABASE_URL: &str = "sqlite://database.db?mode=rwc";
const DEFAULT_OLLAMA_HOST: &str = "http://127.0.0.1:11434";
const DEFAULT_TEXT_MODEL: &str = "deepseek-r1:1.5b";
const DEFAULT_VISION_MODEL: &str = "llava";
const DEFAULT_INFERENCE_TIMEOUT_SECS: u64 = 300;
const DEFAULT_BCRYPT_COST: u32 = 10;
const DEFAULT_MAX_PAYLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} has an invalid value: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Models the service talks to on the inference host.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub text_model: String,
    pub vision_model: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: String,
    pub database_url: String,
    pub ollama_host: String,
    pub models: ModelConfig,
    pub inference_timeout: Duration,
    pub bcrypt_cost: u32,
    pub max_payload_bytes: usize,
    pub workers: usize,
}

impl Config {
    /// Reads the configuration from the process environment. Call
    /// `dotenv()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let string = |key: &str, default: String| lookup(key).unwrap_or(default);

        Ok(Config {
            bind_address: string("BIND_ADDRESS", defaults.bind_address),
            database_url: string("DATABASE_URL", defaults.database_url),
            ollama_host: string("OLLAMA_HOST", defaults.ollama_host),
            models: ModelConfig {
                text_model: string("TEXT_MODEL", defaults.models.text_model),
                vision_model: string("VISION_MODEL", defaults.models.vision_model),
            },
            inference_timeout: Duration::from_secs(parse(
                &lookup,
                "INFERENCE_TIMEOUT_SECS",
                defaults.inference_timeout.as_secs(),
            )?),
            bcrypt_cost: parse(&lookup, "BCRYPT_COST", defaults.bcrypt_cost)?,
            max_payload_bytes: parse(&lookup, "MAX_PAYLOAD_BYTES", defaults.max_payload_bytes)?,
            workers: parse_nonzero(&lookup, "WORKERS", defaults.workers)?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            ollama_host: DEFAULT_OLLAMA_HOST.to_string(),
            models: ModelConfig {
                text_model: DEFAULT_TEXT_MODEL.to_string(),
                vision_model: DEFAULT_VISION_MODEL.to_string(),
            },
            inference_timeout: Duration::from_secs(DEFAULT_INFERENCE_TIMEOUT_SECS),
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
            workers: num_cpus::get(),
        }
    }
}

fn parse<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
    }
}

fn parse_nonzero<F>(lookup: &F, key: &'static str, default: usize) -> Result<usize, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match parse(lookup, key, default)? {
        0 => Err(ConfigError::InvalidValue { key, value: "0".to_string() }),
        n => Ok(n),
    }
}
