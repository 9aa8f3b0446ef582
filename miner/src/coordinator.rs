use std::sync::Arc;

use futures::future::join_all;
use kaleido_api::consts::TICKER;
use tokio_util::sync::CancellationToken;

use crate::{
    client::SessionClient, config::Config, error::Error, session::SessionState,
    transport::Transport, wallets::AccountSource,
};

/// Final figures reported at shutdown.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    pub wallets: usize,
    pub total_paid: f64,
}

/// Owns every session client for the run and coordinates their shutdown.
pub struct Coordinator {
    config: Config,
    transport: Arc<dyn Transport>,
    source: Box<dyn AccountSource>,
    clients: Vec<SessionClient>,
    running: bool,
    total_paid: f64,
    shutdown: CancellationToken,
}

impl Coordinator {
    pub fn new(
        config: Config,
        transport: Arc<dyn Transport>,
        source: Box<dyn AccountSource>,
    ) -> Self {
        Self {
            config,
            transport,
            source,
            clients: vec![],
            running: false,
            total_paid: 0.0,
            shutdown: CancellationToken::new(),
        }
    }

    /// The ordered wallet list. A source that can't be read yields no wallets.
    pub fn load_accounts(&self) -> Vec<String> {
        match self.source.load() {
            Ok(wallets) => wallets,
            Err(err) => {
                log::error!("error loading wallets: {}", err);
                vec![]
            }
        }
    }

    /// Builds a session per wallet and initializes them all concurrently.
    ///
    /// Each session's registration outcome is collected on its own; a
    /// failed wallet never holds back or cancels the others.
    pub async fn start(&mut self) -> Result<(), Error> {
        if self.running {
            log::warn!("{}", Error::AlreadyRunning);
            return Ok(());
        }
        let wallets = self.load_accounts();
        if wallets.is_empty() {
            let err = Error::EmptyAccountList(self.source.describe());
            log::error!("{}", err);
            return Err(err);
        }
        self.running = true;
        log::info!("total accounts: {}", wallets.len());

        self.clients = wallets
            .into_iter()
            .enumerate()
            .map(|(i, wallet)| {
                SessionClient::new(i + 1, wallet, Arc::clone(&self.transport), &self.config)
            })
            .collect();
        let outcomes = join_all(self.clients.iter_mut().map(|client| client.initialize())).await;
        let active = outcomes
            .iter()
            .filter(|state| **state == SessionState::Active)
            .count();
        log::info!("{}/{} sessions active", active, outcomes.len());
        Ok(())
    }

    /// Runs every session's reporting loop until the shutdown token fires.
    pub async fn run(&mut self) {
        let shutdown = self.shutdown.clone();
        join_all(
            self.clients
                .iter_mut()
                .map(|client| client.reporting_loop(shutdown.clone())),
        )
        .await;
    }

    /// Handle for the signal listener; cancelling it ends `run`.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Stops every session in order and totals what they paid.
    pub async fn handle_shutdown(&mut self) -> Summary {
        log::warn!("shutting down miners...");
        self.shutdown.cancel();
        let mut total_paid = 0.0;
        for client in self.clients.iter_mut() {
            total_paid += client.stop().await;
        }
        self.total_paid = total_paid;
        self.running = false;

        let summary = Summary {
            wallets: self.clients.len(),
            total_paid,
        };
        log::info!(
            "final summary: total wallets {}, total paid {:.8} {}",
            summary.wallets,
            summary.total_paid,
            TICKER
        );
        summary
    }

    pub fn clients(&self) -> &[SessionClient] {
        self.clients.as_slice()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn total_paid(&self) -> f64 {
        self.total_paid
    }
}
