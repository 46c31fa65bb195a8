mod config;
mod now_playing;
mod playback;
mod utils;

use anyhow::{Context, Result};
use config::Config;
use now_playing::http::HttpSource;
use now_playing::poller::Poller;
use playback::PlaybackInfo;
use reqwest::Url;
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "cannot listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let term = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let term = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = term => {},
    }

    info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the status lines, diagnostics go to stderr.
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();
    let url: Url = config
        .endpoint
        .parse()
        .with_context(|| format!("invalid endpoint URL `{}`", config.endpoint))?;
    let source = HttpSource::new(url);
    info!(url = %source.url(), mode = ?config.mode, "polling now-playing endpoint");

    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = stop_tx.send(true);
    });

    let mut last_output = String::new();
    utils::print_status(&config, &PlaybackInfo::default(), &mut last_output);

    let mut poller = Poller::new(source, config.cadence, |info| {
        utils::print_status(&config, info, &mut last_output)
    });
    poller.run(stop_rx).await;

    info!(updates = poller.updates(), "poller exited");
    Ok(())
}
