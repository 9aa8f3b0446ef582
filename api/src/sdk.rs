use crate::{
    consts::{CHECK_REGISTRATION_PATH, UPDATE_BALANCE_PATH},
    error::ApiError,
};

/// Builds the registration check url for a wallet.
pub fn check_registration_url(base_url: &str, wallet: &str) -> Result<String, ApiError> {
    if wallet.is_empty() {
        return Err(ApiError::EmptyWallet);
    }
    let base_url = validate_base_url(base_url)?;
    let url = format!("{}/{}", base_url, CHECK_REGISTRATION_PATH);
    let url = reqwest::Url::parse_with_params(url.as_str(), &[("wallet", wallet)])
        .map_err(|_| ApiError::InvalidBaseUrl(base_url.to_string()))?;
    Ok(url.to_string())
}

/// Builds the balance update url.
pub fn update_balance_url(base_url: &str) -> Result<String, ApiError> {
    let base_url = validate_base_url(base_url)?;
    Ok(format!("{}/{}", base_url, UPDATE_BALANCE_PATH))
}

fn validate_base_url(base_url: &str) -> Result<&str, ApiError> {
    if !base_url.starts_with("http") {
        return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
    }
    Ok(base_url.trim_end_matches('/'))
}
