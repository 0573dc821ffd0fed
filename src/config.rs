use std::env;

use thiserror::Error;

/// Errors raised while reading the server configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),
    #[error("invalid value `{value}` for {name}")]
    Invalid { name: &'static str, value: String },
}

/// Credentials of the Ticketz messaging gateway.
#[derive(Debug, Clone)]
pub struct TicketzConfig {
    pub api_url: String,
    pub api_token: String,
}

/// Settings read from the environment at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub address: String,
    pub port: u16,
    /// Cookie signing secret; a random key is generated when absent.
    pub secret: Option<String>,
    pub auth_service_url: String,
    pub domain: String,
    /// Messages are only logged when the gateway is not configured.
    pub ticketz: Option<TicketzConfig>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| "app.db".to_string());
        let address = env::var("ADDRESS").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = match env::var("PORT") {
            Ok(value) => value.parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value,
            })?,
            Err(_) => 8080,
        };

        let auth_service_url =
            env::var("AUTH_SERVICE_URL").map_err(|_| ConfigError::Missing("AUTH_SERVICE_URL"))?;

        let domain = env::var("DOMAIN").unwrap_or_else(|_| "localhost".to_string());

        let ticketz = match (env::var("TICKETZ_API_URL"), env::var("TICKETZ_API_TOKEN")) {
            (Ok(api_url), Ok(api_token)) if !api_url.is_empty() && !api_token.is_empty() => {
                Some(TicketzConfig { api_url, api_token })
            }
            _ => None,
        };

        Ok(Self {
            database_url,
            address,
            port,
            secret: env::var("SECRET_KEY").ok().filter(|secret| !secret.is_empty()),
            auth_service_url,
            domain,
            ticketz,
        })
    }
}
