use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use serde_json::json;

use crate::{
    config::Config,
    error::Error,
    retry::RetryPolicy,
    transport::{Response, Transport},
};

/// In-memory stand-in for the testnet api.
///
/// Registered wallets get `referral_bonus`; balance updates are confirmed by
/// echoing the submitted total unless `confirmed_balance` is set.
#[derive(Default)]
pub struct ScriptedTransport {
    referral_bonus: Option<f64>,
    unregistered: HashSet<String>,
    offline: bool,
    failing_updates: Mutex<u32>,
    reject_updates: bool,
    confirmed_balance: Option<f64>,
    registration_checks: Mutex<Vec<String>>,
    balance_updates: Mutex<Vec<serde_json::Value>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_referral_bonus(mut self, bonus: f64) -> Self {
        self.referral_bonus = Some(bonus);
        self
    }

    pub fn unregistered(mut self, wallet: &str) -> Self {
        self.unregistered.insert(wallet.to_string());
        self
    }

    /// Every request fails at the transport level.
    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    /// The next `n` balance updates answer 500.
    pub fn failing_updates(self, n: u32) -> Self {
        *self.failing_updates.lock().unwrap() = n;
        self
    }

    /// Balance updates answer 200 with `success: false`.
    pub fn rejecting_updates(mut self) -> Self {
        self.reject_updates = true;
        self
    }

    pub fn confirming_balance(mut self, balance: f64) -> Self {
        self.confirmed_balance = Some(balance);
        self
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn registration_checks(&self) -> Vec<String> {
        self.registration_checks.lock().unwrap().clone()
    }

    pub fn balance_updates(&self) -> Vec<serde_json::Value> {
        self.balance_updates.lock().unwrap().clone()
    }

    pub fn balance_updates_for(&self, wallet: &str) -> Vec<serde_json::Value> {
        self.balance_updates()
            .into_iter()
            .filter(|update| update["wallet"] == wallet)
            .collect()
    }

    fn ok(body: serde_json::Value) -> Response {
        Response {
            status: 200,
            body: body.to_string(),
        }
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: &str) -> Result<Response, Error> {
        let wallet = url.split("wallet=").nth(1).unwrap_or_default().to_string();
        self.registration_checks.lock().unwrap().push(wallet.clone());
        if self.offline {
            return Err(Error::Internal("connection refused".to_string()));
        }
        if self.unregistered.contains(&wallet) {
            return Ok(Self::ok(json!({ "isRegistered": false })));
        }
        let body = match self.referral_bonus {
            Some(bonus) => json!({ "isRegistered": true, "userData": { "referralBonus": bonus } }),
            None => json!({ "isRegistered": true, "userData": {} }),
        };
        Ok(Self::ok(body))
    }

    async fn post(&self, _url: &str, body: &serde_json::Value) -> Result<Response, Error> {
        self.balance_updates.lock().unwrap().push(body.clone());
        if self.offline {
            return Err(Error::Internal("connection refused".to_string()));
        }
        {
            let mut failing = self.failing_updates.lock().unwrap();
            if *failing > 0 {
                *failing -= 1;
                return Ok(Response {
                    status: 500,
                    body: r#"{"error":"internal"}"#.to_string(),
                });
            }
        }
        if self.reject_updates {
            return Ok(Self::ok(json!({ "success": false, "error": "session expired" })));
        }
        let balance = self
            .confirmed_balance
            .unwrap_or_else(|| body["earnings"]["total"].as_f64().unwrap_or_default());
        Ok(Self::ok(json!({ "success": true, "balance": balance })))
    }
}

/// Test config: one retry, short backoff, default 30s period.
pub fn config() -> Config {
    Config {
        base_url: "http://127.0.0.1:8080/api/testnet".to_string(),
        retry: RetryPolicy {
            max_attempts: 2,
            backoff_base: Duration::from_secs(1),
        },
        ..Config::default()
    }
}

/// Binds a local listener that accepts connections and never answers.
pub async fn stalled_server() -> std::net::SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });
    addr
}
