use kaleido_api::consts::UNIT_RATE;

/// Earnings accrued by a rig of `hashrate` over `elapsed_secs` of active mining.
pub fn compute_delta(hashrate: f64, elapsed_secs: f64, referral_bonus: f64) -> f64 {
    hashrate * elapsed_secs * UNIT_RATE * (1.0 + referral_bonus)
}
