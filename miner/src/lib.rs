pub mod client;
pub mod config;
pub mod coordinator;
pub mod earnings;
pub mod error;
pub mod retry;
pub mod session;
pub mod transport;
pub mod wallets;

#[cfg(test)]
mod test_utils;
