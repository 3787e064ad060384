// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Client-side sync core for `WebDAV`, `CalDAV` and `CardDAV` collections.
//!
//! Decides how a collection is synced (RFC 6578 report or full enumeration),
//! detects remote changes through the collection tag, and mutates single
//! objects under `ETag` based optimistic concurrency. Requests go through the
//! [`Transport`] port; [`HttpTransport`] is the `reqwest` implementation.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(
    clippy::option_option,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::match_bool
)]

mod collection;
mod config;
mod error;
mod http;
mod object;
mod request;
mod response;
mod sandbox;
mod sync;
mod transport;
mod types;
mod xml;

pub use crate::collection::{is_collection_dirty, supported_report_set};
pub use crate::config::{AuthMethod, DavConfig, SyncMethod, SyncOptions};
pub use crate::error::DavError;
pub use crate::http::HttpTransport;
pub use crate::object::{create_object, delete_object, update_object};
pub use crate::request::{Depth, Method, Prop, Request};
pub use crate::response::{
    MultiStatusResponse, PropStat, Properties, Report, ResponseEntry, ResponseItem,
};
pub use crate::sandbox::Sandbox;
pub use crate::sync::{
    StrategyDecision, SyncResult, SyncStrategy, select_strategy, sync_collection,
};
pub use crate::transport::{Response, Transport};
pub use crate::types::{CTag, Collection, DavObject, ETag, Href};
pub use crate::xml::ns;
