// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::types::Href;

/// Errors raised by the sync core and its transport.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum DavError {
    /// A request descriptor could not be built from the given input.
    #[error("Invalid request: {0}")]
    Validation(String),

    /// HTTP layer error.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Precondition failed (`ETag` mismatch).
    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    /// Resource not found.
    #[error("Resource not found: {0}")]
    NotFound(Href),

    /// The home collection listing has no entry for this collection.
    #[error("Collection not found in home listing: {0}")]
    CollectionNotFound(Href),

    /// XML parsing/writing error.
    #[error("XML error: {0}")]
    Xml(String),

    /// Invalid response from server.
    #[error("Invalid server response: {0}")]
    InvalidResponse(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The request's sandbox was aborted.
    #[error("Request aborted")]
    Aborted,
}

impl DavError {
    /// Returns `true` when the error came back from the transport rather than
    /// being raised locally.
    ///
    /// [`DavError::PreconditionFailed`] is a transport error too.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Http(_)
                | Self::PreconditionFailed(_)
                | Self::NotFound(_)
                | Self::Xml(_)
                | Self::InvalidResponse(_)
                | Self::Aborted
        )
    }

    /// Returns `true` for a concurrent-modification failure.
    #[must_use]
    pub const fn is_precondition_failed(&self) -> bool {
        matches!(self, Self::PreconditionFailed(_))
    }
}

impl From<reqwest::Error> for DavError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e.to_string())
    }
}

impl From<quick_xml::Error> for DavError {
    fn from(e: quick_xml::Error) -> Self {
        Self::Xml(e.to_string())
    }
}

impl From<std::io::Error> for DavError {
    fn from(e: std::io::Error) -> Self {
        Self::Xml(format!("IO error: {e}"))
    }
}
