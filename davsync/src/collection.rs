// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Collection-level probes: advertised reports and change detection.

use crate::config::SyncOptions;
use crate::error::DavError;
use crate::request::{Depth, Prop, Request};
use crate::response::Report;
use crate::types::Collection;

/// Fetches the reports the server supports for `collection`.
///
/// Returns `None` when the server does not report the property at all. The
/// result is not stored anywhere; callers decide whether to keep it in
/// [`Collection::reports`].
///
/// # Errors
///
/// Returns the transport error if the property query fails.
#[tracing::instrument(skip_all, fields(url = %collection.url))]
pub async fn supported_report_set(
    collection: &Collection,
    options: &SyncOptions,
) -> Result<Option<Vec<Report>>, DavError> {
    tracing::debug!("checking supported report set");
    let req = Request::propfind(&[Prop::SUPPORTED_REPORT_SET], Depth::One, true);

    let props = options
        .transport
        .send(&req, collection.url.as_str(), options.sandbox.as_ref())
        .await?
        .into_merged()?;

    Ok(props.supported_report_set)
}

/// Checks whether the collection changed remotely since its ctag was
/// recorded.
///
/// A collection without a ctag has nothing to compare against and is
/// reported clean without touching the network.
///
/// # Errors
///
/// Returns [`DavError::CollectionNotFound`] if the home collection listing
/// has no entry for `collection.url`, or the transport error if the query
/// fails.
#[tracing::instrument(skip_all, fields(url = %collection.url))]
pub async fn is_collection_dirty(
    collection: &Collection,
    options: &SyncOptions,
) -> Result<bool, DavError> {
    let Some(ctag) = &collection.ctag else {
        tracing::debug!("missing ctag");
        return Ok(false);
    };

    tracing::debug!(home = %collection.home_url, "fetch remote getctag prop");
    let req = Request::propfind(&[Prop::GETCTAG], Depth::Zero, false);

    let entries = options
        .transport
        .send(&req, collection.home_url.as_str(), options.sandbox.as_ref())
        .await?
        .into_entries()?;

    let Some(entry) = entries
        .into_iter()
        .find(|entry| entry.href.same_resource(&collection.url))
    else {
        tracing::warn!("collection not found on remote, was it deleted?");
        return Err(DavError::CollectionNotFound(collection.url.clone()));
    };

    tracing::debug!("check whether cached ctag matches remote");
    Ok(entry.props.getctag.as_ref() != Some(ctag))
}
