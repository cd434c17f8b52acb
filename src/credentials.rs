//! Secret-mounted credential files.
//!
//! Kubernetes projects Secret values into the container as files and updates
//! them in place when the Secret rotates, so every read here goes back to
//! disk. File contents are taken verbatim: no trimming, no encoding work
//! beyond raw bytes to text, trailing newlines included.

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::error::{RefresherError, Result};

/// Registry username and password, read fresh every iteration.
///
/// Both values are opaque: no character-set or emptiness validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Registry account name.
    pub username: String,
    /// Registry account password.
    pub password: String,
}

/// Reads credentials and registry addresses from a Secret volumeMount.
#[derive(Debug, Clone)]
pub struct CredentialSource {
    dir: PathBuf,
}

impl CredentialSource {
    /// Create a source rooted at the Secret mount directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Read the `username` and `password` files.
    ///
    /// The username is logged in full at debug level; the password is only
    /// ever logged as a truncated preview.
    pub fn read_credentials(&self) -> Result<Credentials> {
        let username = self.read_file("username")?;
        debug!(%username, "read username");
        let password = self.read_file("password")?;
        debug!(preview = %password_preview(&password), "read password");
        Ok(Credentials { username, password })
    }

    /// Read the `registries` file and split it on commas.
    ///
    /// The set de-duplicates repeated addresses. Empty segments (from inputs
    /// like `a,,b`) are kept as empty-string addresses, not dropped.
    pub fn read_registries(&self) -> Result<BTreeSet<String>> {
        let registries = self.read_file("registries")?;
        debug!(%registries, "read registries");
        let addresses: BTreeSet<String> =
            registries.split(',').map(str::to_owned).collect();
        debug!(?addresses, "parsed registry addresses");
        Ok(addresses)
    }

    fn read_file(&self, name: &str) -> Result<String> {
        let path = self.dir.join(name);
        debug!(path = %path.display(), "opening secret file");
        fs::read_to_string(&path).map_err(|source| RefresherError::SourceRead { path, source })
    }
}

/// First few characters of a secret, for diagnostics.
fn password_preview(password: &str) -> String {
    password.chars().take(4).collect()
}
