// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Request descriptors handed to a [`Transport`](crate::Transport).

use std::fmt;
use std::io::Cursor;

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, Event};

use crate::error::DavError;
use crate::types::ETag;
use crate::xml::{self, ns};

/// Request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Create or overwrite an object.
    Put,
    /// Delete an object.
    Delete,
    /// Query properties.
    PropFind,
}

impl Method {
    /// Returns the HTTP method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::PropFind => "PROPFIND",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Traversal depth of a property query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Depth {
    /// The resource itself.
    Zero,
    /// The resource and its immediate children.
    One,
    /// The whole subtree.
    Infinity,
}

impl Depth {
    /// Returns the `Depth` header value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Zero => "0",
            Self::One => "1",
            Self::Infinity => "infinity",
        }
    }
}

/// A property to query, identified by local name and namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Prop {
    /// Local name, e.g. `getctag`.
    pub name: &'static str,
    /// Namespace URI.
    pub namespace: &'static str,
}

impl Prop {
    /// `DAV:supported-report-set` (RFC 3253).
    pub const SUPPORTED_REPORT_SET: Self = Self::new("supported-report-set", ns::DAV);
    /// `CS:getctag`.
    pub const GETCTAG: Self = Self::new("getctag", ns::CALENDAR_SERVER);
    /// `DAV:getetag`.
    pub const GETETAG: Self = Self::new("getetag", ns::DAV);
    /// `DAV:displayname`.
    pub const DISPLAYNAME: Self = Self::new("displayname", ns::DAV);
    /// `DAV:resourcetype`.
    pub const RESOURCETYPE: Self = Self::new("resourcetype", ns::DAV);
    /// `DAV:sync-token` (RFC 6578).
    pub const SYNC_TOKEN: Self = Self::new("sync-token", ns::DAV);

    /// Creates a new property reference.
    #[must_use]
    pub const fn new(name: &'static str, namespace: &'static str) -> Self {
        Self { name, namespace }
    }
}

/// An immutable request descriptor.
///
/// Built with [`Request::mutation`] or [`Request::propfind`] and consumed by a
/// transport. An etag is attached only to conditional mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,
    body: Option<String>,
    etag: Option<ETag>,
    props: Vec<Prop>,
    depth: Option<Depth>,
    merge_responses: bool,
}

impl Request {
    /// Builds a PUT or DELETE descriptor.
    ///
    /// `data` is required for PUT and ignored for DELETE. `etag`, when given,
    /// makes the request conditional on the remote version still matching.
    ///
    /// # Errors
    ///
    /// Returns [`DavError::Validation`] for a PUT without data or a
    /// non-mutating method.
    pub fn mutation(
        method: Method,
        data: Option<String>,
        etag: Option<ETag>,
    ) -> Result<Self, DavError> {
        let body = match method {
            Method::Put => Some(
                data.ok_or_else(|| DavError::Validation("PUT requires a body".to_string()))?,
            ),
            Method::Delete => None,
            Method::PropFind => {
                return Err(DavError::Validation(
                    "PROPFIND is not a mutation".to_string(),
                ));
            }
        };

        Ok(Self {
            method,
            body,
            etag,
            props: Vec::new(),
            depth: None,
            merge_responses: false,
        })
    }

    /// Builds a PUT descriptor.
    #[must_use]
    pub const fn put(data: String, etag: Option<ETag>) -> Self {
        Self {
            method: Method::Put,
            body: Some(data),
            etag,
            props: Vec::new(),
            depth: None,
            merge_responses: false,
        }
    }

    /// Builds a DELETE descriptor.
    #[must_use]
    pub const fn delete(etag: Option<ETag>) -> Self {
        Self {
            method: Method::Delete,
            body: None,
            etag,
            props: Vec::new(),
            depth: None,
            merge_responses: false,
        }
    }

    /// Builds a PROPFIND descriptor.
    ///
    /// With `merge_responses` set the transport folds every returned
    /// resource into one property map.
    #[must_use]
    pub fn propfind(props: &[Prop], depth: Depth, merge_responses: bool) -> Self {
        Self {
            method: Method::PropFind,
            body: None,
            etag: None,
            props: props.to_vec(),
            depth: Some(depth),
            merge_responses,
        }
    }

    /// Returns the method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Returns the mutation payload.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Returns the conditional version token.
    #[must_use]
    pub const fn etag(&self) -> Option<&ETag> {
        self.etag.as_ref()
    }

    /// Returns the queried properties.
    #[must_use]
    pub fn props(&self) -> &[Prop] {
        &self.props
    }

    /// Returns the traversal depth of a property query.
    #[must_use]
    pub const fn depth(&self) -> Option<Depth> {
        self.depth
    }

    /// Whether the transport should merge multi-status entries.
    #[must_use]
    pub const fn merge_responses(&self) -> bool {
        self.merge_responses
    }

    /// Builds the XML body of a PROPFIND request.
    ///
    /// Returns `None` for mutations.
    ///
    /// # Errors
    ///
    /// Returns an error if XML building fails.
    pub fn xml_body(&self) -> Result<Option<String>, DavError> {
        if self.method != Method::PropFind {
            return Ok(None);
        }

        // Namespace URI -> prefix, DAV: first
        let mut namespaces: Vec<(&str, String)> = vec![(ns::DAV, "D".to_string())];
        for prop in &self.props {
            if namespaces.iter().all(|(uri, _)| *uri != prop.namespace) {
                let prefix = xml::prefix_of(prop.namespace).map_or_else(
                    || format!("N{}", namespaces.len()),
                    std::string::ToString::to_string,
                );
                namespaces.push((prop.namespace, prefix));
            }
        }

        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

        // <D:propfind xmlns:D="DAV:" ...>
        let mut propfind = BytesStart::new("D:propfind");
        for (uri, prefix) in &namespaces {
            let attr = format!("xmlns:{prefix}");
            propfind.push_attribute((attr.as_str(), *uri));
        }
        writer.write_event(Event::Start(propfind))?;

        writer.write_event(Event::Start(BytesStart::new("D:prop")))?;
        for prop in &self.props {
            let prefix = namespaces
                .iter()
                .find(|(uri, _)| *uri == prop.namespace)
                .map_or("D", |(_, prefix)| prefix.as_str());
            writer.write_event(Event::Empty(BytesStart::new(format!(
                "{prefix}:{}",
                prop.name
            ))))?;
        }
        writer.write_event(Event::End(BytesEnd::new("D:prop")))?;

        writer.write_event(Event::End(BytesEnd::new("D:propfind")))?;

        let bytes = writer.into_inner().into_inner();
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|e| DavError::Xml(format!("UTF-8 error: {e}")))
    }
}
