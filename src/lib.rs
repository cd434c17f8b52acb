//! Regcred Refresher - Registry credential sidecar
//!
//! Regenerates a Docker registry auth config from Kubernetes-Secret-mounted
//! credential files so the container runtime on a node keeps authenticating
//! to private registries whose credentials rotate live. Secrets projected as
//! files are updated in place when the Secret changes; environment variables
//! are not, which is why the source of truth is a directory of files re-read
//! on every pass.
//!
//! The whole system is one reconciliation loop:
//!
//! - [`credentials`]: read username, password, and registry addresses from
//!   the secret directory
//! - [`docker_config`]: render them into the `auths` document
//! - [`writer`]: atomically replace the destination file
//! - [`refresher`]: drive the loop with an interruptible sleep
//!
//! Every pass is a full reconciliation from the files on disk; nothing is
//! cached between iterations. Any read or write failure is fatal and the
//! process relies on its supervisor to restart it.

pub mod config;
pub mod credentials;
pub mod docker_config;
pub mod error;
pub mod refresher;
pub mod writer;

// Re-export commonly used types for convenience
pub use config::{ConfigError, RefresherConfig};
pub use credentials::{CredentialSource, Credentials};
pub use docker_config::{AuthEntry, DockerConfig};
pub use error::{RefresherError, Result};
pub use refresher::Refresher;
