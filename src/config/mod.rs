use std::time::Duration;

use serde::Deserialize;
use url::Url;

static CONFIG: OnceCell<Config> = OnceCell::const_new();

/// Environment variable that overrides `api.token` from the config file.
pub static TOKEN_ENV: &str = "COURSEDESK_TOKEN";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

mod config_dir;
pub use config_dir::{find_config_file, read_config};

mod error;
pub use error::{ConfigError, ConfigResult};
use tokio::sync::OnceCell;

#[derive(Debug, Deserialize)]
pub struct Config {
    api: Api,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "ApiRaw")]
pub struct Api {
    base_url: Url,
    token: Option<String>,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct ApiRaw {
    base_url: String,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    timeout_secs: Option<u64>,
}

impl TryFrom<ApiRaw> for Api {
    type Error = ConfigError;

    fn try_from(raw: ApiRaw) -> ConfigResult<Self> {
        // `Url::join` drops the last segment unless the base ends with a slash
        let mut base = raw.base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }

        let base_url = Url::parse(&base).map_err(|error| ConfigError::InvalidBaseUrl {
            url: raw.base_url.clone(),
            error,
        })?;

        Ok(Self {
            base_url,
            token: raw.token.filter(|t| !t.trim().is_empty()),
            timeout: Duration::from_secs(raw.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        })
    }
}

impl Config {
    #[tracing::instrument]
    pub async fn get_or_init(use_local: bool) -> &'static Config {
        CONFIG
            .get_or_init(|| async {
                let read_cfg = |use_local| -> ConfigResult<Self> {
                    let bytes = read_config(use_local)?;
                    Self::from_slice(&bytes)
                };

                let config = match read_cfg(use_local) {
                    Ok(c) => c,
                    Err(e) => {
                        if !matches!(e, error::ConfigError::ConfigNotFound) {
                            crate::error::log_error(&e);
                        }
                        tracing::error!("Config not found.");
                        std::process::exit(1);
                    }
                };

                config
            })
            .await
    }

    /// Parses a TOML document and applies the token override from the environment.
    pub fn from_slice(bytes: &[u8]) -> ConfigResult<Self> {
        let mut config: Self = toml::from_slice(bytes)?;

        if let Ok(token) = std::env::var(TOKEN_ENV) {
            if !token.trim().is_empty() {
                tracing::debug!("using api token from {}", TOKEN_ENV);
                config.api.token = Some(token);
            }
        }

        Ok(config)
    }

    #[inline]
    pub fn api(&self) -> &Api {
        &self.api
    }
}

impl Api {
    pub fn new(base_url: Url, token: Option<String>, timeout: Duration) -> Self {
        Self {
            base_url,
            token,
            timeout,
        }
    }

    #[inline]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[inline]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[inline]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
