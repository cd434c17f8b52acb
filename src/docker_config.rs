//! Docker registry auth config document.
//!
//! The shape consumed by the container runtime: an `auths` map keyed by
//! registry address, each entry carrying the base64 encoding of
//! `username:password` and an `email` field the format requires but nothing
//! reads. One credential pair is shared across every registry.

use std::collections::{BTreeMap, BTreeSet};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::credentials::Credentials;
use crate::error::Result;

/// Docker-style registry auth config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockerConfig {
    /// Auth entries keyed by registry address.
    ///
    /// Ordered map so identical inputs render byte-identically.
    pub auths: BTreeMap<String, AuthEntry>,
}

/// Authentication entry for a single registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthEntry {
    /// Base64-encoded `username:password`.
    pub auth: String,
    /// Always empty; the consuming format expects the field to exist.
    pub email: String,
}

impl DockerConfig {
    /// Build the document for a credential pair and a set of registries.
    ///
    /// Pure: any inputs produce a well-formed document, including empty
    /// strings. An empty-string registry address becomes a literal `""` key
    /// rather than being dropped.
    pub fn build(credentials: &Credentials, registries: &BTreeSet<String>) -> Self {
        let auth = STANDARD.encode(format!(
            "{}:{}",
            credentials.username, credentials.password
        ));
        let auths = registries
            .iter()
            .map(|address| {
                (
                    address.clone(),
                    AuthEntry {
                        auth: auth.clone(),
                        email: String::new(),
                    },
                )
            })
            .collect();
        Self { auths }
    }

    /// Serialize to the 2-space-indented JSON the runtime reads.
    pub fn render(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
