// Main entry point for the X post monitor

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use monitor::adapters::{PushbulletSink, XTimelineSource};
use monitor::config::Config;
use monitor::cycle::Monitor;
use monitor::state::WatermarkStore;
use pushbullet::PushbulletClient;
use x_client::XApiClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,monitor=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting X post monitor");

    // Load configuration; a missing credential is fatal before the loop starts
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        username = %config.username,
        interval_secs = config.check_interval.as_secs(),
        state_file = %config.state_file.display(),
        "Configuration loaded"
    );

    let x_client = XApiClient::new(config.x_bearer_token.clone())
        .context("Failed to build X API client")?;
    let push_client = PushbulletClient::new(config.pushbullet_token.clone())
        .context("Failed to build Pushbullet client")?;

    // Resolve the monitored account once at startup
    let user = x_client
        .get_user_by_username(&config.username)
        .await
        .with_context(|| format!("Failed to resolve account @{}", config.username))?;
    tracing::info!(user_id = %user.id, "Resolved monitored account");

    // Announce startup; losing this push is harmless
    if let Err(e) = push_client
        .push_note(
            "X monitor started",
            &format!("Now monitoring @{} for new posts", config.username),
        )
        .await
    {
        tracing::warn!("Failed to send startup notification: {:#}", e);
    }

    let store = WatermarkStore::new(config.state_file.clone());
    let source = XTimelineSource::new(x_client, user.id);
    let sink = PushbulletSink::new(push_client);
    let mut monitor = Monitor::new(source, sink, store, config.username.clone());

    loop {
        // A single bad cycle never takes the process down
        if let Err(e) = monitor.run_cycle().await {
            tracing::error!("Cycle failed: {:#}", e);
        }

        // The sleep races the termination signal so shutdown is prompt; the
        // signal is only observed here, between cycles, so an in-flight
        // notify/persist step always completes first.
        tokio::select! {
            _ = tokio::time::sleep(config.check_interval) => {}
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown signal received, stopping");
                break;
            }
        }
    }

    Ok(())
}
