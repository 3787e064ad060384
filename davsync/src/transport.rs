// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The port every network request of the sync core goes through.

use async_trait::async_trait;

use crate::error::DavError;
use crate::request::Request;
use crate::response::{Properties, ResponseEntry};
use crate::sandbox::Sandbox;
use crate::types::ETag;

/// Sends request descriptors to a server.
///
/// Implementations own timeouts, cancellation and conditional-request
/// enforcement. A failed precondition must surface as
/// [`DavError::PreconditionFailed`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` to `url`.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the request fails.
    async fn send(
        &self,
        request: &Request,
        url: &str,
        sandbox: Option<&Sandbox>,
    ) -> Result<Response, DavError>;
}

/// Parsed result of a transport call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Unmerged property query: one entry per resource.
    Entries(Vec<ResponseEntry>),
    /// Merged property query.
    Merged(Properties),
    /// Successful PUT or DELETE.
    Mutated {
        /// New entity tag reported by the server, if any.
        etag: Option<ETag>,
    },
}

impl Response {
    /// Returns the per-resource entries, merging nothing.
    ///
    /// # Errors
    ///
    /// Returns [`DavError::InvalidResponse`] for any other shape.
    pub fn into_entries(self) -> Result<Vec<ResponseEntry>, DavError> {
        match self {
            Self::Entries(entries) => Ok(entries),
            other => Err(unexpected("property entries", &other)),
        }
    }

    /// Returns the merged property map.
    ///
    /// # Errors
    ///
    /// Returns [`DavError::InvalidResponse`] for any other shape.
    pub fn into_merged(self) -> Result<Properties, DavError> {
        match self {
            Self::Merged(props) => Ok(props),
            other => Err(unexpected("merged properties", &other)),
        }
    }

    /// Returns the entity tag reported for a mutation.
    #[must_use]
    pub const fn etag(&self) -> Option<&ETag> {
        match self {
            Self::Mutated { etag } => etag.as_ref(),
            _ => None,
        }
    }
}

fn unexpected(expected: &str, got: &Response) -> DavError {
    let got = match got {
        Response::Entries(_) => "property entries",
        Response::Merged(_) => "merged properties",
        Response::Mutated { .. } => "mutation result",
    };
    DavError::InvalidResponse(format!("expected {expected}, got {got}"))
}
