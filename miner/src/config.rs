use std::{env::VarError, path::PathBuf, time::Duration};

use kaleido_api::{consts, sdk};

use crate::{error::Error, retry::RetryPolicy};

const WALLETS_PATH: &str = "wallets.txt";

/// Runtime settings shared by every session.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    // The testnet api root.
    pub base_url: String,

    // Wallet list, one address per line.
    pub wallets_path: PathBuf,

    // Period between balance updates.
    pub update_interval: Duration,

    // Retry policy applied to every request.
    pub retry: RetryPolicy,

    // Upper bound on a single request, connect included.
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: consts::BASE_URL.to_string(),
            wallets_path: PathBuf::from(WALLETS_PATH),
            update_interval: Duration::from_secs(consts::UPDATE_INTERVAL_SECS),
            retry: RetryPolicy::default(),
            request_timeout: Duration::from_secs(consts::REQUEST_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Reads the config from the process environment, falling back to defaults.
    pub fn from_env() -> Result<Self, Error> {
        Config::from_vars(|key| std::env::var(key))
    }

    pub fn from_vars<F>(var: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let defaults = Config::default();
        let base_url = optional(&var, "BASE_URL")?.unwrap_or(defaults.base_url);
        // fail fast on a malformed api root
        sdk::update_balance_url(base_url.as_str())?;
        let wallets_path = optional(&var, "WALLETS_PATH")?
            .map(PathBuf::from)
            .unwrap_or(defaults.wallets_path);
        let update_interval = optional(&var, "UPDATE_INTERVAL_SECS")?
            .map(|secs| secs.parse::<u64>())
            .transpose()?
            .map(Duration::from_secs)
            .unwrap_or(defaults.update_interval);
        let max_attempts = optional(&var, "MAX_RETRIES")?
            .map(|n| n.parse::<u32>())
            .transpose()?
            .unwrap_or(defaults.retry.max_attempts);
        let backoff_base = optional(&var, "RETRY_BACKOFF_SECS")?
            .map(|secs| secs.parse::<u64>())
            .transpose()?
            .map(Duration::from_secs)
            .unwrap_or(defaults.retry.backoff_base);
        let request_timeout = optional(&var, "REQUEST_TIMEOUT_SECS")?
            .map(|secs| secs.parse::<u64>())
            .transpose()?
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);
        Ok(Config {
            base_url,
            wallets_path,
            update_interval,
            retry: RetryPolicy {
                max_attempts,
                backoff_base,
            },
            request_timeout,
        })
    }
}

fn optional<F>(var: &F, key: &str) -> Result<Option<String>, Error>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    match var(key) {
        Ok(value) => Ok(Some(value.trim().to_string())),
        Err(VarError::NotPresent) => Ok(None),
        Err(err) => Err(From::from(err)),
    }
}
