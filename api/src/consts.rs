/// The testnet api root every request is made against.
pub const BASE_URL: &str = "https://kaleidofinance.xyz/api/testnet";

/// The registration check path.
pub const CHECK_REGISTRATION_PATH: &str = "check-registration";

/// The balance update path.
pub const UPDATE_BALANCE_PATH: &str = "update-balance";

/// The static referer sent with every request.
pub const REFERER: &str = "https://kaleidofinance.xyz/testnet";

/// The static browser user agent sent with every request.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/133.0.0.0 Safari/537.36 Edg/133.0.0.0";

/// Earnings accrued per hashrate unit per second, before the referral bonus.
pub const UNIT_RATE: f64 = 0.0001;

/// The simulated rig profile every session reports.
pub const HASHRATE: f64 = 75.5;
pub const EFFICIENCY: f64 = 1.4;
pub const POWER_USAGE: u32 = 120;
pub const WORKER: &str = "quantum-rig-1";
pub const POOL: &str = "quantum-1";

/// Seconds between balance updates.
pub const UPDATE_INTERVAL_SECS: u64 = 30;

/// Attempts per request before giving up.
pub const MAX_RETRIES: u32 = 3;

/// Seconds a single request may take before it counts as a failed attempt.
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Base backoff between attempts, scaled by the attempt number.
pub const RETRY_BACKOFF_SECS: u64 = 2;

/// Only lines with this prefix are read as wallets.
pub const WALLET_PREFIX: &str = "0x";

/// The token ticker used in summaries.
pub const TICKER: &str = "KLDO";
