use kaleido_api::consts::{EFFICIENCY, HASHRATE, POOL, POWER_USAGE, WORKER};
use tokio::time::Instant;

/// Lifecycle of a single wallet's mining session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Created,
    Registering,
    Active,
    Stopped,
    Failed,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Earnings {
    /// Last balance confirmed by the server.
    pub total: f64,

    /// Accrual submitted but not yet confirmed.
    pub pending: f64,

    /// Balance recorded when the session stopped.
    pub paid: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MiningState {
    pub active: bool,
    pub worker: String,
    pub pool: String,

    // Set once, when registration succeeds.
    pub start_time: Option<Instant>,
}

impl Default for MiningState {
    fn default() -> Self {
        Self {
            active: false,
            worker: WORKER.to_string(),
            pool: POOL.to_string(),
            start_time: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Shares {
    pub accepted: u64,
    pub rejected: u64,
}

/// Simulated rig profile. Never measured, never changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RigStats {
    pub hashrate: f64,
    pub shares: Shares,
    pub efficiency: f64,
    pub power_usage: u32,
}

impl Default for RigStats {
    fn default() -> Self {
        Self {
            hashrate: HASHRATE,
            shares: Shares::default(),
            efficiency: EFFICIENCY,
            power_usage: POWER_USAGE,
        }
    }
}

/// Runtime state owned by exactly one session client.
#[derive(Clone, Debug)]
pub struct Session {
    pub index: usize,
    pub state: SessionState,
    pub earnings: Earnings,
    pub mining_state: MiningState,
    pub referral_bonus: f64,
    pub stats: RigStats,
}

impl Session {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            state: SessionState::Created,
            earnings: Earnings::default(),
            mining_state: MiningState::default(),
            referral_bonus: 0.0,
            stats: RigStats::default(),
        }
    }

    /// Moves a registering session to active, seeding earnings with the bonus.
    pub fn activate(&mut self, referral_bonus: f64, now: Instant) {
        self.referral_bonus = referral_bonus;
        self.earnings = Earnings {
            total: referral_bonus,
            pending: 0.0,
            paid: 0.0,
        };
        if self.mining_state.start_time.is_none() {
            self.mining_state.start_time = Some(now);
        }
        self.mining_state.active = true;
        self.state = SessionState::Active;
    }

    pub fn fail(&mut self) {
        self.mining_state.active = false;
        self.state = SessionState::Failed;
    }

    /// Seconds of active mining, if the session ever started.
    pub fn elapsed_secs(&self) -> Option<f64> {
        self.mining_state
            .start_time
            .map(|start| start.elapsed().as_secs_f64())
    }
}
