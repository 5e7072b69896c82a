use crate::error::{ConfigError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_directory")]
    pub directory: String,
    #[serde(default = "default_log_filename")]
    pub filename: String,
}

/// Platform credentials. Either field may instead come from the
/// LOGIN / PASSWORD environment variables, which take precedence.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_login_path")]
    pub login_path: String,

    #[serde(default = "default_units_path")]
    pub units_path: String,

    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default = "default_retry_delay")]
    pub retry_delay: u64,

    #[serde(default = "default_request_delay")]
    pub request_delay: u64,

    /// Present the TLS/header fingerprint of a desktop Chrome.
    #[serde(default)]
    pub chrome_impersonation: bool,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub logging: LogConfig,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: default_log_directory(),
            filename: default_log_filename(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            login_path: default_login_path(),
            units_path: default_units_path(),
            output: default_output(),
            max_retries: default_max_retries(),
            retry_delay: default_retry_delay(),
            request_delay: default_request_delay(),
            chrome_impersonation: false,
            auth: AuthConfig::default(),
            logging: LogConfig::default(),
        }
    }
}

impl Config {
    /// Loads the config file, falling back to defaults when it does not
    /// exist. Environment overrides for credentials are applied either way.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = if path.as_ref().exists() {
            let content = std::fs::read_to_string(path).map_err(ConfigError::FileRead)?;
            let config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;
            info!("Configuration loaded successfully");
            config
        } else {
            info!("No config file found, using defaults");
            Config::default()
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        // Picks up a .env file if one is present.
        dotenvy::dotenv().ok();

        if let Ok(login) = std::env::var("LOGIN") {
            self.auth.login = Some(login);
        }
        if let Ok(password) = std::env::var("PASSWORD") {
            self.auth.password = Some(password);
        }
    }

    /// Credentials as (login, password), required by the collector.
    pub fn credentials(&self) -> Result<(String, String)> {
        match (&self.auth.login, &self.auth.password) {
            (Some(login), Some(password)) => Ok((login.clone(), password.clone())),
            _ => Err(crate::error::AuthError::MissingCredentials.into()),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(ConfigError::MissingField("base_url".to_string()).into());
        }
        if !self.base_url.starts_with("http") {
            return Err(ConfigError::InvalidValue(format!(
                "base_url must start with http(s): {}",
                self.base_url
            ))
            .into());
        }

        if self.login_path.is_empty() {
            return Err(ConfigError::InvalidValue("login_path cannot be empty".to_string()).into());
        }

        if self.units_path.is_empty() {
            return Err(ConfigError::InvalidValue("units_path cannot be empty".to_string()).into());
        }

        if self.output.is_empty() {
            return Err(ConfigError::InvalidValue("output cannot be empty".to_string()).into());
        }

        if self.max_retries == 0 {
            return Err(ConfigError::InvalidValue(
                "max_retries must be greater than 0".to_string(),
            )
            .into());
        }

        if self.retry_delay == 0 {
            return Err(ConfigError::InvalidValue(
                "retry_delay must be greater than 0".to_string(),
            )
            .into());
        }

        Ok(())
    }
}

fn default_base_url() -> String {
    "https://2600.rbean.io".to_string()
}

fn default_login_path() -> String {
    "/users/sign_in".to_string()
}

fn default_units_path() -> String {
    "/units".to_string()
}

fn default_output() -> String {
    "skills.json".to_string()
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay() -> u64 {
    5
}

fn default_request_delay() -> u64 {
    1
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_directory() -> String {
    "logs".to_string()
}

fn default_log_filename() -> String {
    "skillbook.log".to_string()
}
