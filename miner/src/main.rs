use std::sync::Arc;

use kaleido_miner::{
    config::Config, coordinator::Coordinator, error::Error, transport::HttpTransport,
    wallets::WalletFile,
};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run().await {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Error> {
    let config = Config::from_env()?;
    let transport = Arc::new(HttpTransport::new(config.request_timeout)?);
    let wallets = WalletFile::new(&config.wallets_path);
    let mut coordinator = Coordinator::new(config, transport, Box::new(wallets));

    // listen before launching so an early interrupt still stops cleanly
    let shutdown = coordinator.shutdown_token();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                log::warn!("received interrupt");
                shutdown.cancel();
            }
            Err(err) => log::error!("failed to listen for interrupt: {}", err),
        }
    });

    coordinator.start().await?;
    coordinator.run().await;
    coordinator.handle_shutdown().await;
    Ok(())
}
