// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Strategy selection for full collection syncs.

use async_trait::async_trait;

use crate::config::{SyncMethod, SyncOptions};
use crate::error::DavError;
use crate::response::Report;
use crate::types::{CTag, Collection, DavObject, Href};

/// A full-sync algorithm for one collection.
///
/// The report-based (RFC 6578) and basic (full enumeration) strategies live
/// outside this crate and are injected through [`SyncOptions`].
#[async_trait]
pub trait SyncStrategy: Send + Sync {
    /// Syncs `collection`.
    ///
    /// # Errors
    ///
    /// Returns an error if the sync fails.
    async fn sync(
        &self,
        collection: &Collection,
        options: &SyncOptions,
    ) -> Result<SyncResult, DavError>;
}

/// Objects fetched by a sync strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncResult {
    /// Objects added or modified since the last sync.
    pub objects: Vec<DavObject>,
    /// Objects removed since the last sync.
    pub removed: Vec<Href>,
    /// Collection tag after the sync.
    pub ctag: Option<CTag>,
    /// Sync token after the sync.
    pub sync_token: Option<String>,
}

/// Why a strategy was picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyDecision {
    /// The caller chose the method explicitly.
    Override(SyncMethod),
    /// The collection advertises `sync-collection`.
    Capable,
    /// Nothing better is known.
    Fallback,
}

impl StrategyDecision {
    /// Returns the sync method to run.
    #[must_use]
    pub const fn method(self) -> SyncMethod {
        match self {
            Self::Override(method) => method,
            Self::Capable => SyncMethod::Webdav,
            Self::Fallback => SyncMethod::Basic,
        }
    }
}

/// Picks a strategy; the first match wins.
///
/// 1. an explicit override;
/// 2. `sync-collection` among the advertised reports;
/// 3. basic sync.
#[must_use]
pub fn select_strategy(
    sync_method: Option<SyncMethod>,
    reports: Option<&[Report]>,
) -> StrategyDecision {
    if let Some(method) = sync_method {
        StrategyDecision::Override(method)
    } else if reports.is_some_and(|r| r.contains(&Report::SyncCollection)) {
        StrategyDecision::Capable
    } else {
        StrategyDecision::Fallback
    }
}

/// Syncs `collection` with the strategy chosen by [`select_strategy`].
///
/// # Errors
///
/// Returns [`DavError::Config`] if the chosen strategy is not configured,
/// otherwise whatever the strategy returns.
#[tracing::instrument(skip_all, fields(url = %collection.url))]
pub async fn sync_collection(
    collection: &Collection,
    options: &SyncOptions,
) -> Result<SyncResult, DavError> {
    let decision = select_strategy(options.sync_method, collection.reports.as_deref());

    let strategy = match decision.method() {
        SyncMethod::Webdav => {
            tracing::debug!(?decision, "rfc 6578 sync");
            options.webdav_sync.as_ref()
        }
        SyncMethod::Basic => {
            tracing::debug!(?decision, "basic sync");
            options.basic_sync.as_ref()
        }
    }
    .ok_or_else(|| {
        DavError::Config(format!("no {:?} sync strategy configured", decision.method()))
    })?;

    strategy.sync(collection, options).await
}
