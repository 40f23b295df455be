use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use rapid_console_core::AppError;
use tracing_subscriber::EnvFilter;
use url::Url;

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Where the console reads and writes rAPId state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RapidGatewayConfig {
    Http {
        base_url: Url,
        access_token: Option<String>,
        timeout: Duration,
    },
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub gateway: RapidGatewayConfig,
    pub frontend_url: String,
    pub api_host: String,
    pub api_port: u16,
}

impl ConsoleConfig {
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let gateway = match lookup("RAPID_GATEWAY")
            .unwrap_or_else(|| "http".to_owned())
            .to_ascii_lowercase()
            .as_str()
        {
            "http" => {
                let raw_url = required_non_empty(&lookup, "RAPID_API_URL")?;
                let base_url = Url::parse(raw_url.trim()).map_err(|error| {
                    AppError::Validation(format!("invalid RAPID_API_URL: {error}"))
                })?;
                let timeout_seconds = match lookup("RAPID_TIMEOUT_SECONDS") {
                    Some(value) => value
                        .trim()
                        .parse::<u64>()
                        .ok()
                        .filter(|seconds| *seconds > 0)
                        .ok_or_else(|| {
                            AppError::Validation(format!(
                                "RAPID_TIMEOUT_SECONDS must be a positive integer, got '{value}'"
                            ))
                        })?,
                    None => DEFAULT_TIMEOUT_SECONDS,
                };

                RapidGatewayConfig::Http {
                    base_url,
                    access_token: lookup("RAPID_ACCESS_TOKEN")
                        .filter(|value| !value.trim().is_empty()),
                    timeout: Duration::from_secs(timeout_seconds),
                }
            }
            "memory" => RapidGatewayConfig::Memory,
            other => {
                return Err(AppError::Validation(format!(
                    "RAPID_GATEWAY must be either 'http' or 'memory', got '{other}'"
                )));
            }
        };

        let frontend_url =
            lookup("FRONTEND_URL").unwrap_or_else(|| "http://localhost:3000".to_owned());
        let api_host = lookup("API_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let api_port = match lookup("API_PORT") {
            Some(value) => value.trim().parse::<u16>().map_err(|error| {
                AppError::Validation(format!("invalid API_PORT '{value}': {error}"))
            })?,
            None => 3001,
        };

        Ok(Self {
            gateway,
            frontend_url,
            api_host,
            api_port,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Validation(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_non_empty(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Result<String, AppError> {
    let value = lookup(name).ok_or_else(|| AppError::Validation(format!("{name} is required")))?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}
