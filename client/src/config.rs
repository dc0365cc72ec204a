//! Host configuration read from `TX_*` environment variables.

use std::fmt;
use std::time::Duration;

use thiserror::Error;
use tx_core::{DataCenter, TxClient};

pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

#[derive(Clone)]
pub struct ClientConfig {
    pub account_id: String,
    pub service_key: String,
    pub data_center: DataCenter,
    pub timeout: Duration,
    pub show_request_body: bool,
    pub tracking_tags: Vec<String>,
}

impl ClientConfig {
    pub fn new(account_id: &str, service_key: &str, data_center: DataCenter) -> Self {
        Self {
            account_id: account_id.to_string(),
            service_key: service_key.to_string(),
            data_center,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            show_request_body: false,
            tracking_tags: Vec::new(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the same keys as `from_env` through `lookup`.
    ///
    /// `TX_ACCOUNT_ID` and `TX_SERVICE_KEY` are required. `TX_DATA_CENTER`
    /// defaults to `us`, `TX_TIMEOUT_SECS` to 120 and `TX_SHOW_REQUEST_BODY`
    /// to false. `TX_TRACKING_TAGS` is comma-separated.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let account_id = get("TX_ACCOUNT_ID").ok_or(ConfigError::Missing("TX_ACCOUNT_ID"))?;
        let service_key = get("TX_SERVICE_KEY").ok_or(ConfigError::Missing("TX_SERVICE_KEY"))?;

        let data_center = match get("TX_DATA_CENTER") {
            None => DataCenter::us(),
            Some(name) => DataCenter::from_name(&name).ok_or(ConfigError::Invalid {
                name: "TX_DATA_CENTER",
                value: name,
            })?,
        };

        let timeout = match get("TX_TIMEOUT_SECS") {
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            Some(value) => match value.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "TX_TIMEOUT_SECS",
                        value,
                    })
                }
            },
        };

        let show_request_body = match get("TX_SHOW_REQUEST_BODY") {
            None => false,
            Some(value) => parse_bool(&value).ok_or(ConfigError::Invalid {
                name: "TX_SHOW_REQUEST_BODY",
                value,
            })?,
        };

        let tracking_tags = get("TX_TRACKING_TAGS")
            .map(|tags| {
                tags.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            account_id,
            service_key,
            data_center,
            timeout,
            show_request_body,
            tracking_tags,
        })
    }

    /// The I/O-free client these settings describe.
    pub fn client(&self) -> TxClient {
        TxClient::new(&self.account_id, &self.service_key, self.data_center.clone())
            .show_full_request_body_in_exceptions(self.show_request_body)
            .tracking_tags(self.tracking_tags.iter())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("account_id", &self.account_id)
            .field("service_key", &"<redacted>")
            .field("data_center", &self.data_center)
            .field("timeout", &self.timeout)
            .field("show_request_body", &self.show_request_body)
            .field("tracking_tags", &self.tracking_tags)
            .finish()
    }
}
