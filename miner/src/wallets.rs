use std::path::{Path, PathBuf};

use kaleido_api::consts::WALLET_PREFIX;

use crate::error::Error;

/// Where the coordinator gets its ordered wallet list from.
pub trait AccountSource: Send + Sync {
    fn load(&self) -> Result<Vec<String>, Error>;

    /// Human readable origin, used in log lines.
    fn describe(&self) -> String;
}

/// Plain text wallet list on disk.
pub struct WalletFile {
    path: PathBuf,
}

impl WalletFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl AccountSource for WalletFile {
    fn load(&self) -> Result<Vec<String>, Error> {
        let contents = std::fs::read_to_string(&self.path)?;
        Ok(parse_wallets(contents.as_str()))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

impl AccountSource for Vec<String> {
    fn load(&self) -> Result<Vec<String>, Error> {
        Ok(self.clone())
    }

    fn describe(&self) -> String {
        "inline wallet list".to_string()
    }
}

/// Keeps lines starting with `0x`, in file order. Anything else is skipped.
pub fn parse_wallets(contents: &str) -> Vec<String> {
    contents
        .lines()
        .filter(|line| line.starts_with(WALLET_PREFIX))
        .map(|line| line.trim().to_string())
        .collect()
}
