#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("reqwest: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("serde json: {0}")]
    SerdeJson(#[from] serde_json::Error),
    #[error("std io: {0}")]
    StdIO(#[from] std::io::Error),
    #[error("std env: {0}")]
    StdEnv(#[from] std::env::VarError),
    #[error("std parse int: {0}")]
    StdParseInt(#[from] std::num::ParseIntError),
    #[error("kaleido api: {0}")]
    Api(#[from] kaleido_api::error::ApiError),
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("{operation} failed after {attempts} attempts: {source}")]
    RetriesExhausted {
        operation: String,
        attempts: u32,
        source: Box<Error>,
    },
    #[error("wallet not registered")]
    NotRegistered,
    #[error("balance update rejected: {0}")]
    UpdateRejected(String),
    #[error("no valid wallets found in {0}")]
    EmptyAccountList(String),
    #[error("mining coordinator is already running")]
    AlreadyRunning,
    #[error("{0}")]
    Internal(String),
}
