//! The reconciliation loop.
//!
//! Read the secret files, render the auth document, replace the destination,
//! sleep, repeat. Each pass is independent; nothing carries over except the
//! file on disk. The suspend races the interval against a shutdown
//! notification so a termination signal is never stuck behind the remaining
//! sleep.

use tokio::sync::watch;
use tracing::{debug, info};

use crate::config::RefresherConfig;
use crate::credentials::CredentialSource;
use crate::docker_config::DockerConfig;
use crate::error::Result;
use crate::writer;

/// Drives the read, build, write, sleep loop.
pub struct Refresher {
    source: CredentialSource,
    config: RefresherConfig,
}

impl Refresher {
    /// Build a refresher from validated configuration.
    pub fn new(config: RefresherConfig) -> Self {
        Self {
            source: CredentialSource::new(config.secret_file_path.clone()),
            config,
        }
    }

    /// One full reconciliation: read, build, write.
    ///
    /// Any failure propagates; there is no retry. An in-progress pass is
    /// never cancelled, it runs to completion or crashes.
    pub fn refresh_once(&self) -> Result<()> {
        let credentials = self.source.read_credentials()?;
        let registries = self.source.read_registries()?;
        let document = DockerConfig::build(&credentials, &registries);
        info!(
            path = %self.config.docker_config.display(),
            registries = registries.len(),
            "writing new registry auth config"
        );
        writer::write_config(&self.config.docker_config, &document.render()?)
    }

    /// Loop forever, reconciling immediately and then once per interval.
    ///
    /// Returns when `shutdown` is signalled, including mid-sleep: the
    /// suspend is a `select!` between the interval and the notification, so
    /// exit latency does not depend on the interval. A shutdown observed
    /// between passes prevents the next one from starting.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> Result<()> {
        loop {
            if *shutdown.borrow() {
                info!("caught termination signal, exiting");
                return Ok(());
            }

            self.refresh_once()?;

            debug!(seconds = self.config.sleep_interval, "sleeping");
            tokio::select! {
                () = tokio::time::sleep(self.config.interval()) => {}
                _ = shutdown.changed() => {
                    info!("caught termination signal, exiting");
                    return Ok(());
                }
            }
        }
    }
}
