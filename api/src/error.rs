use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("wallet must not be empty")]
    EmptyWallet,
    #[error("base url must be an http(s) url: {0}")]
    InvalidBaseUrl(String),
}
