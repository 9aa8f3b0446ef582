use serde::{Deserialize, Serialize};

/// The response from the /check-registration request.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationStatus {
    /// Whether the wallet has signed up for the testnet.
    #[serde(default)]
    pub is_registered: bool,

    /// Profile data, only present for registered wallets.
    #[serde(default)]
    pub user_data: Option<UserData>,
}

impl RegistrationStatus {
    /// The referral bonus multiplier, zero when the server omits it.
    pub fn referral_bonus(&self) -> f64 {
        self.user_data
            .as_ref()
            .and_then(|data| data.referral_bonus)
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    #[serde(default)]
    pub referral_bonus: Option<f64>,
}

/// The payload to send to the /update-balance endpoint.
#[derive(Debug, Deserialize, Serialize)]
pub struct UpdateBalancePayload {
    /// The wallet the earnings belong to.
    pub wallet: String,

    /// The earnings being reported.
    pub earnings: EarningsReport,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsReport {
    // Confirmed balance plus this session's accrual.
    pub total: f64,

    // Accrual since the session started.
    pub session: f64,

    // UTC timestamp, millisecond precision.
    pub last_update: String,
}

/// The response from the /update-balance request.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UpdateBalanceResponse {
    #[serde(default)]
    pub success: bool,

    /// The server-confirmed balance.
    #[serde(default)]
    pub balance: Option<f64>,
}
