// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::ops::Deref;

use crate::response::Report;

/// Resource href (path or absolute URL).
///
/// A `Href` identifies a resource on a `WebDAV` server, such as
/// `/calendars/user/event1.ics`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Href(String);

impl Href {
    /// Creates a new `Href` from a string.
    #[must_use]
    pub const fn new(href: String) -> Self {
        Self(href)
    }

    /// Returns the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the path part of the href, without scheme, authority or
    /// trailing slashes.
    #[must_use]
    pub fn path(&self) -> &str {
        let path = match self.0.split_once("://") {
            Some((_, rest)) => rest.find('/').and_then(|i| rest.get(i..)).unwrap_or("/"),
            None => self.0.as_str(),
        };
        path.trim_end_matches('/')
    }

    /// Whether both hrefs point at the same resource.
    ///
    /// Scheme, authority and trailing slashes are ignored; everything else
    /// must be equal.
    #[must_use]
    pub fn same_resource(&self, other: &Self) -> bool {
        self.path() == other.path()
    }
}

impl Deref for Href {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for Href {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Href {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for Href {
    fn from(href: String) -> Self {
        Self(href)
    }
}

impl From<&str> for Href {
    fn from(href: &str) -> Self {
        Self(href.to_string())
    }
}

/// Entity tag of a single object.
///
/// Opaque version token used for optimistic concurrency. It is compared by
/// equality only and never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ETag(String);

impl ETag {
    /// Creates a new `ETag` from a string.
    #[must_use]
    pub const fn new(etag: String) -> Self {
        Self(etag)
    }

    /// Returns the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for ETag {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for ETag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ETag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ETag {
    fn from(etag: String) -> Self {
        Self(etag)
    }
}

impl From<&str> for ETag {
    fn from(etag: &str) -> Self {
        Self(etag.to_string())
    }
}

/// Collection tag (`getctag`).
///
/// Changes whenever anything inside the collection changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CTag(String);

impl CTag {
    /// Creates a new `CTag` from a string.
    #[must_use]
    pub const fn new(ctag: String) -> Self {
        Self(ctag)
    }

    /// Returns the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for CTag {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for CTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for CTag {
    fn from(ctag: String) -> Self {
        Self(ctag)
    }
}

impl From<&str> for CTag {
    fn from(ctag: &str) -> Self {
        Self(ctag.to_string())
    }
}

/// A remote object resource, e.g. one calendar event or one vCard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DavObject {
    /// The href of the object.
    pub url: Href,
    /// The raw payload.
    pub data: String,
    /// The entity tag, `None` until the object exists on the server.
    pub etag: Option<ETag>,
}

impl DavObject {
    /// Creates a new object that has not been uploaded yet.
    #[must_use]
    pub const fn new(url: Href, data: String) -> Self {
        Self {
            url,
            data,
            etag: None,
        }
    }

    /// Sets the entity tag.
    #[must_use]
    pub fn with_etag(mut self, etag: ETag) -> Self {
        self.etag = Some(etag);
        self
    }
}

/// Remote collection metadata.
///
/// The caller owns this value; the sync core only reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    /// The href of the collection.
    pub url: Href,
    /// The home collection listing this collection, used for `getctag`
    /// lookups.
    pub home_url: Href,
    /// Reports the server advertises for this collection, `None` if never
    /// probed.
    pub reports: Option<Vec<Report>>,
    /// Last known collection tag, `None` if never synced.
    pub ctag: Option<CTag>,
    /// Last known RFC 6578 sync token.
    pub sync_token: Option<String>,
    /// The display name of the collection.
    pub display_name: Option<String>,
}

impl Collection {
    /// Creates a new `Collection` that has never been synced.
    #[must_use]
    pub const fn new(url: Href, home_url: Href) -> Self {
        Self {
            url,
            home_url,
            reports: None,
            ctag: None,
            sync_token: None,
            display_name: None,
        }
    }

    /// Sets the last known collection tag.
    #[must_use]
    pub fn with_ctag(mut self, ctag: CTag) -> Self {
        self.ctag = Some(ctag);
        self
    }

    /// Sets the advertised reports.
    #[must_use]
    pub fn with_reports(mut self, reports: Vec<Report>) -> Self {
        self.reports = Some(reports);
        self
    }

    /// Whether the server advertised the given report.
    #[must_use]
    pub fn supports(&self, report: &Report) -> bool {
        self.reports.as_ref().is_some_and(|r| r.contains(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn href_same_resource_ignores_trailing_slash() {
        assert!(Href::from("/cal/1/").same_resource(&Href::from("/cal/1")));
    }

    #[test]
    fn href_same_resource_ignores_origin() {
        let absolute = Href::from("https://dav.example.com/cal/1/");
        assert!(absolute.same_resource(&Href::from("/cal/1/")));
        assert_eq!(Href::from("https://dav.example.com").path(), "");
    }

    #[test]
    fn tokens_expose_str_alike() {
        let ctag = CTag::from("abc");
        let etag = ETag::from("\"e1\"");
        assert_eq!(&*ctag, "abc");
        assert_eq!(AsRef::<str>::as_ref(&ctag), ctag.as_str());
        assert_eq!(&*etag, etag.as_str());
        assert!(CTag::from("").is_empty());
    }

    #[test]
    fn href_same_resource_rejects_prefix() {
        assert!(!Href::from("/cal/10/").same_resource(&Href::from("/cal/1/")));
        assert!(!Href::from("/cal/").same_resource(&Href::from("/cal/1/")));
    }
}
