// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::sync::Arc;

use crate::sandbox::Sandbox;
use crate::sync::SyncStrategy;
use crate::transport::Transport;

/// Authentication method.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(tag = "type")]
pub enum AuthMethod {
    /// No authentication.
    #[serde(rename = "none")]
    #[default]
    None,
    /// Basic authentication (username/password).
    #[serde(rename = "basic")]
    Basic {
        /// Username for authentication.
        username: String,
        /// Password for authentication.
        password: String,
    },
    /// Bearer token authentication (OAuth).
    #[serde(rename = "bearer")]
    Bearer {
        /// Bearer token.
        token: String,
    },
}

/// Explicit choice of sync strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncMethod {
    /// RFC 6578 report-based delta sync.
    Webdav,
    /// Full enumeration.
    Basic,
}

/// Server configuration for [`HttpTransport`](crate::HttpTransport).
#[derive(Debug, Clone, serde::Deserialize)]
pub struct DavConfig {
    /// Base URL of the server; relative hrefs are resolved against it.
    pub base_url: String,
    /// Authentication method.
    #[serde(default)]
    pub auth: AuthMethod,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// `Content-Type` sent with object payloads.
    #[serde(default = "default_content_type")]
    pub content_type: String,
    /// Preferred sync strategy, overriding capability detection.
    #[serde(default)]
    pub sync_method: Option<SyncMethod>,
}

const fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("davsync/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_content_type() -> String {
    "text/calendar; charset=utf-8".to_string()
}

impl Default for DavConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            auth: AuthMethod::default(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
            content_type: default_content_type(),
            sync_method: None,
        }
    }
}

/// Per-call options shared by every sync core operation.
#[derive(Clone)]
pub struct SyncOptions {
    /// Transport used for every request.
    pub transport: Arc<dyn Transport>,
    /// Sandbox forwarded to the transport.
    pub sandbox: Option<Sandbox>,
    /// Explicit strategy override.
    pub sync_method: Option<SyncMethod>,
    /// Report-based strategy.
    pub webdav_sync: Option<Arc<dyn SyncStrategy>>,
    /// Full enumeration strategy.
    pub basic_sync: Option<Arc<dyn SyncStrategy>>,
}

impl SyncOptions {
    /// Creates options with only a transport.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            sandbox: None,
            sync_method: None,
            webdav_sync: None,
            basic_sync: None,
        }
    }

    /// Sets the sandbox.
    #[must_use]
    pub fn with_sandbox(mut self, sandbox: Sandbox) -> Self {
        self.sandbox = Some(sandbox);
        self
    }

    /// Sets or clears the strategy override.
    #[must_use]
    pub fn with_sync_method(mut self, sync_method: Option<SyncMethod>) -> Self {
        self.sync_method = sync_method;
        self
    }

    /// Sets both sync strategies.
    #[must_use]
    pub fn with_strategies(
        mut self,
        webdav_sync: Arc<dyn SyncStrategy>,
        basic_sync: Arc<dyn SyncStrategy>,
    ) -> Self {
        self.webdav_sync = Some(webdav_sync);
        self.basic_sync = Some(basic_sync);
        self
    }
}

impl fmt::Debug for SyncOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncOptions")
            .field("sandbox", &self.sandbox)
            .field("sync_method", &self.sync_method)
            .field("webdav_sync", &self.webdav_sync.is_some())
            .field("basic_sync", &self.basic_sync.is_some())
            .finish_non_exhaustive()
    }
}
