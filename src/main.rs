//! Regcred refresher entry point.

use anyhow::Context;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use regcred_refresher::config::RefresherConfig;
use regcred_refresher::refresher::Refresher;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = RefresherConfig::from_env().context("failed to load configuration")?;

    let default_filter = if config.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!(path = %config.docker_config.display(), "registry auth config location");
    info!(seconds = config.sleep_interval, "sleep interval");

    let shutdown_rx = spawn_signal_listener()?;
    Refresher::new(config).run(shutdown_rx).await?;
    Ok(())
}

/// Install SIGTERM and Ctrl-C handlers feeding a shutdown channel.
///
/// Installation failure is a startup error; once running, either signal
/// flips the channel and the loop exits with status 0.
fn spawn_signal_listener() -> anyhow::Result<watch::Receiver<bool>> {
    let (tx, rx) = watch::channel(false);
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut terminate =
            signal(SignalKind::terminate()).context("failed to install SIGTERM handler")?;
        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = terminate.recv() => {}
            }
            let _ = tx.send(true);
        });
    }
    #[cfg(not(unix))]
    {
        tokio::spawn(async move {
            let _ = tokio::signal::ctrl_c().await;
            let _ = tx.send(true);
        });
    }
    Ok(rx)
}
