use std::{sync::Arc, time::Duration};

use kaleido_api::sdk;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use types::{EarningsReport, RegistrationStatus, UpdateBalancePayload, UpdateBalanceResponse};

use crate::{
    config::Config,
    earnings,
    error::Error,
    retry::{self, RetryPolicy},
    session::{Earnings, MiningState, RigStats, Session, SessionState},
    transport::Transport,
};

/// Outcome of the registration check.
#[derive(Debug)]
pub enum Registration {
    Registered { referral_bonus: f64 },
    NotRegistered,
    TransportError(Error),
}

/// Drives one wallet through registration, periodic balance updates and stop.
pub struct SessionClient {
    wallet: String,
    session: Session,
    transport: Arc<dyn Transport>,
    base_url: String,
    retry: RetryPolicy,
    update_interval: Duration,
}

impl SessionClient {
    pub fn new(
        index: usize,
        wallet: String,
        transport: Arc<dyn Transport>,
        config: &Config,
    ) -> Self {
        Self {
            wallet,
            session: Session::new(index),
            transport,
            base_url: config.base_url.clone(),
            retry: config.retry,
            update_interval: config.update_interval,
        }
    }

    /// Checks registration and activates the session on success.
    ///
    /// Failures are logged and leave the session in `Failed`; nothing is
    /// returned to the caller but the resulting state. Only a `Created`
    /// session is initialized, any other state is returned unchanged.
    pub async fn initialize(&mut self) -> SessionState {
        if self.session.state != SessionState::Created {
            return self.session.state;
        }
        self.session.state = SessionState::Registering;
        match self.check_registration().await {
            Registration::Registered { referral_bonus } => {
                self.session.activate(referral_bonus, Instant::now());
                log::info!(
                    "[{}] mining initialized successfully (referral bonus {})",
                    self.index(),
                    referral_bonus
                );
            }
            Registration::NotRegistered => {
                self.session.fail();
                log::error!(
                    "[{}] initialization failed: {}",
                    self.index(),
                    Error::NotRegistered
                );
            }
            Registration::TransportError(err) => {
                self.session.fail();
                log::error!("[{}] initialization failed: {}", self.index(), err);
            }
        }
        self.session.state
    }

    pub async fn check_registration(&self) -> Registration {
        let url = sdk::check_registration_url(self.base_url.as_str(), self.wallet.as_str());
        let url = match url {
            Ok(url) => url,
            Err(err) => return Registration::TransportError(err.into()),
        };
        let transport = self.transport.as_ref();
        let url = url.as_str();
        let resp =
            retry::execute(&self.retry, "Registration check", move || transport.get(url)).await;
        match resp.and_then(|resp| resp.json::<RegistrationStatus>()) {
            Ok(status) if status.is_registered => Registration::Registered {
                referral_bonus: status.referral_bonus().max(0.0),
            },
            Ok(_) => Registration::NotRegistered,
            Err(err) => Registration::TransportError(err),
        }
    }

    /// Reports the session's accrual and adopts the balance the server confirms.
    pub async fn update_balance(&mut self) -> Result<f64, Error> {
        let elapsed = self
            .session
            .elapsed_secs()
            .ok_or(Error::Internal("session has not started".to_string()))?;
        let delta = earnings::compute_delta(
            self.session.stats.hashrate,
            elapsed,
            self.session.referral_bonus,
        );
        let total = self.session.earnings.total + delta;
        self.session.earnings.pending = delta;

        let payload = UpdateBalancePayload {
            wallet: self.wallet.clone(),
            earnings: EarningsReport {
                total,
                session: delta,
                last_update: timestamp(),
            },
        };
        let body = serde_json::to_value(&payload)?;
        let url = sdk::update_balance_url(self.base_url.as_str())?;
        let transport = self.transport.as_ref();
        let (url, body) = (url.as_str(), &body);
        let resp = retry::execute(&self.retry, "Balance update", move || {
            transport.post(url, body)
        })
        .await?;

        let update: UpdateBalanceResponse = resp.json()?;
        if !update.success {
            return Err(Error::UpdateRejected(resp.body));
        }
        // the server is authoritative; a missing balance confirms what we sent
        let balance = update.balance.unwrap_or(total);
        self.session.earnings.total = balance;
        self.session.earnings.pending = 0.0;
        log::info!("[{}] balance updated: {}", self.index(), balance);
        Ok(balance)
    }

    /// Reports on a fixed period until the session stops or `shutdown` fires.
    ///
    /// An update already in flight always completes; only the wait between
    /// updates is cut short by the token.
    pub async fn reporting_loop(&mut self, shutdown: CancellationToken) {
        while self.session.mining_state.active && !shutdown.is_cancelled() {
            if let Err(err) = self.update_balance().await {
                log::error!("[{}] update failed: {}", self.index(), err);
            }
            tokio::select! {
                _ = tokio::time::sleep(self.update_interval) => {}
                _ = shutdown.cancelled() => {
                    log::debug!("[{}] reporting loop interrupted", self.index());
                    break;
                }
            }
        }
    }

    /// Deactivates the session, sends a final update and records the payout.
    ///
    /// The final update is best effort. Stopping twice returns the recorded
    /// payout without another request; a session that never activated pays 0.
    pub async fn stop(&mut self) -> f64 {
        match self.session.state {
            SessionState::Active => {}
            SessionState::Stopped => return self.session.earnings.paid,
            _ => return 0.0,
        }
        self.session.mining_state.active = false;
        if let Err(err) = self.update_balance().await {
            log::error!("[{}] final update failed: {}", self.index(), err);
        }
        self.session.earnings.paid = self.session.earnings.total;
        self.session.state = SessionState::Stopped;
        log::info!(
            "[{}] stopped, paid {:.8}",
            self.index(),
            self.session.earnings.paid
        );
        self.session.earnings.paid
    }

    pub fn index(&self) -> usize {
        self.session.index
    }

    pub fn wallet(&self) -> &str {
        self.wallet.as_str()
    }

    pub fn state(&self) -> SessionState {
        self.session.state
    }

    pub fn is_active(&self) -> bool {
        self.session.mining_state.active
    }

    pub fn earnings(&self) -> Earnings {
        self.session.earnings
    }

    pub fn mining_state(&self) -> &MiningState {
        &self.session.mining_state
    }

    pub fn referral_bonus(&self) -> f64 {
        self.session.referral_bonus
    }

    pub fn stats(&self) -> RigStats {
        self.session.stats
    }
}

/// UTC, millisecond precision, `Z` suffix.
fn timestamp() -> String {
    chrono::Utc::now()
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
}
