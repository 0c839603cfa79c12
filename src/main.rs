use anyhow::Result;
use tokio::sync::watch;

use fx_autotrader::bitflyer::{BitflyerRestClient, BitflyerWsClient};
use fx_autotrader::config::Config;
use fx_autotrader::model::tick::TickUpdate;
use fx_autotrader::trader::Trader;

#[tokio::main]
async fn main() -> Result<()> {
    // Install rustls crypto provider (required by rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {:#}", e);
            eprintln!("Make sure .env file exists with BITFLYER_API_KEY and BITFLYER_API_SECRET");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                config
                    .logging
                    .level
                    .parse()
                    .unwrap_or_else(|_| "info".parse().unwrap())
            }),
        )
        .init();

    tracing::info!(
        product_code = %config.bitflyer.product_code,
        rest_url = %config.bitflyer.rest_base_url,
        ws_url = %config.bitflyer.ws_base_url,
        "Starting fx-autotrader"
    );

    let (tick_tx, tick_rx) = watch::channel::<Option<TickUpdate>>(None);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let ws_client = BitflyerWsClient::new(
        &config.bitflyer.ws_base_url,
        &config.bitflyer.product_code,
    );
    let ws_shutdown = shutdown_rx.clone();
    let mut ws_task = tokio::spawn(async move {
        if let Err(e) = ws_client.connect_and_run(tick_tx, ws_shutdown).await {
            tracing::error!(error = %e, "WebSocket task failed");
        }
    });

    let rest_client = BitflyerRestClient::new(
        &config.bitflyer.rest_base_url,
        &config.bitflyer.api_key,
        &config.bitflyer.api_secret,
        &config.bitflyer.product_code,
    );
    let mut trader = Trader::new(rest_client, config.trading.clone());
    let trader_shutdown = shutdown_rx.clone();
    let trader_task = tokio::spawn(async move {
        if let Err(e) = trader.run(tick_rx, trader_shutdown).await {
            tracing::error!(error = %e, "Trader task failed");
        }
    });

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Ctrl-C received, shutting down");
        }
        _ = &mut ws_task => {
            tracing::error!("WebSocket task exited unexpectedly");
        }
    }

    let _ = shutdown_tx.send(true);
    let _ = trader_task.await;

    tracing::info!("Shutdown complete");
    Ok(())
}
