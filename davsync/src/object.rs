// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Create, update and delete single remote objects.
//!
//! Each call sends exactly one request and returns the transport result
//! unchanged. Nothing is retried or merged: a stale etag surfaces as
//! [`DavError::PreconditionFailed`].

use crate::config::SyncOptions;
use crate::error::DavError;
use crate::request::{Method, Request};
use crate::transport::Response;
use crate::types::{ETag, Href};

/// Creates an object, or overwrites whatever is stored at `url`.
///
/// No conditional token is sent.
///
/// # Errors
///
/// Returns the transport error if the PUT fails.
#[tracing::instrument(skip(data, options))]
pub async fn create_object(
    url: &Href,
    data: &str,
    options: &SyncOptions,
) -> Result<Response, DavError> {
    let req = Request::mutation(Method::Put, Some(data.to_string()), None)?;
    send(&req, url, options).await
}

/// Replaces an object if its remote version still equals `etag`.
///
/// # Errors
///
/// Returns [`DavError::PreconditionFailed`] if the object changed remotely,
/// or any other transport error.
#[tracing::instrument(skip(data, options))]
pub async fn update_object(
    url: &Href,
    data: &str,
    etag: Option<&ETag>,
    options: &SyncOptions,
) -> Result<Response, DavError> {
    let req = Request::mutation(Method::Put, Some(data.to_string()), etag.cloned())?;
    send(&req, url, options).await
}

/// Deletes an object if its remote version still equals `etag`.
///
/// # Errors
///
/// Returns [`DavError::PreconditionFailed`] if the object changed remotely,
/// or any other transport error.
#[tracing::instrument(skip(options))]
pub async fn delete_object(
    url: &Href,
    etag: Option<&ETag>,
    options: &SyncOptions,
) -> Result<Response, DavError> {
    let req = Request::mutation(Method::Delete, None, etag.cloned())?;
    send(&req, url, options).await
}

async fn send(req: &Request, url: &Href, options: &SyncOptions) -> Result<Response, DavError> {
    options
        .transport
        .send(req, url.as_str(), options.sandbox.as_ref())
        .await
}
