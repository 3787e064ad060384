// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Response parsers for `WebDAV` multi-status bodies.

use std::fmt;

use quick_xml::events::Event;

use crate::error::DavError;
use crate::types::{CTag, ETag, Href};
use crate::xml::read_element_text;

/// A report a server may advertise in `supported-report-set`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Report {
    /// RFC 6578 `sync-collection`.
    SyncCollection,
    /// `CalDAV` `calendar-query`.
    CalendarQuery,
    /// `CalDAV` `calendar-multiget`.
    CalendarMultiget,
    /// `CardDAV` `addressbook-query`.
    AddressbookQuery,
    /// `CardDAV` `addressbook-multiget`.
    AddressbookMultiget,
    /// RFC 3253 `expand-property`.
    ExpandProperty,
    /// Any other report, by local name.
    Other(String),
}

impl Report {
    /// Parses a report from its element local name (`sync-collection`) or
    /// camel-case alias (`syncCollection`).
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "sync-collection" | "syncCollection" => Self::SyncCollection,
            "calendar-query" | "calendarQuery" => Self::CalendarQuery,
            "calendar-multiget" | "calendarMultiget" => Self::CalendarMultiget,
            "addressbook-query" | "addressbookQuery" => Self::AddressbookQuery,
            "addressbook-multiget" | "addressbookMultiget" => Self::AddressbookMultiget,
            "expand-property" | "expandProperty" => Self::ExpandProperty,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the element local name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::SyncCollection => "sync-collection",
            Self::CalendarQuery => "calendar-query",
            Self::CalendarMultiget => "calendar-multiget",
            Self::AddressbookQuery => "addressbook-query",
            Self::AddressbookMultiget => "addressbook-multiget",
            Self::ExpandProperty => "expand-property",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<&str> for Report {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

/// `WebDAV` multistatus response.
#[derive(Debug, Clone)]
pub struct MultiStatusResponse {
    /// The response items.
    pub responses: Vec<ResponseItem>,
}

/// Individual response in multistatus.
#[derive(Debug, Clone)]
pub struct ResponseItem {
    /// The href of the resource.
    pub href: Href,
    /// Property groups with their status.
    pub prop_stats: Vec<PropStat>,
}

/// Property stat with status and value.
#[derive(Debug, Clone)]
pub struct PropStat {
    /// The properties.
    pub props: Properties,
    /// The status line, e.g. `HTTP/1.1 200 OK`.
    pub status: String,
}

impl PropStat {
    /// Whether the status line reports success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status
            .split_whitespace()
            .nth(1)
            .is_some_and(|code| code.starts_with('2'))
    }
}

/// Parsed `WebDAV` properties of one resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    /// `CS:getctag`.
    pub getctag: Option<CTag>,
    /// `DAV:getetag`.
    pub getetag: Option<ETag>,
    /// `DAV:displayname`.
    pub display_name: Option<String>,
    /// Local names inside `DAV:resourcetype`.
    pub resource_type: Option<Vec<String>>,
    /// `DAV:supported-report-set`.
    pub supported_report_set: Option<Vec<Report>>,
    /// `DAV:sync-token`.
    pub sync_token: Option<String>,
}

impl Properties {
    /// Folds `other` into `self`.
    ///
    /// Values present in `other` win, except that an empty value never
    /// replaces a non-empty one.
    pub fn merge(&mut self, other: Self) {
        fn take<T>(slot: &mut Option<T>, value: Option<T>, is_empty: fn(&T) -> bool) {
            let Some(value) = value else { return };
            if is_empty(&value) && slot.as_ref().is_some_and(|current| !is_empty(current)) {
                return;
            }
            *slot = Some(value);
        }

        take(&mut self.getctag, other.getctag, |v: &CTag| v.is_empty());
        take(&mut self.getetag, other.getetag, |v: &ETag| v.is_empty());
        take(&mut self.display_name, other.display_name, String::is_empty);
        take(&mut self.resource_type, other.resource_type, Vec::is_empty);
        take(
            &mut self.supported_report_set,
            other.supported_report_set,
            Vec::is_empty,
        );
        take(&mut self.sync_token, other.sync_token, String::is_empty);
    }
}

/// One resource of an unmerged property query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEntry {
    /// The href of the resource.
    pub href: Href,
    /// Properties from every successful propstat.
    pub props: Properties,
}

impl MultiStatusResponse {
    /// Parses multistatus response from XML.
    ///
    /// # Errors
    ///
    /// Returns an error if XML parsing fails.
    pub fn from_xml(xml: &str) -> Result<Self, DavError> {
        let mut reader = quick_xml::Reader::from_str(xml);
        reader.config_mut().check_end_names = true;

        let mut responses = Vec::new();
        let mut current_response: Option<ResponseItem> = None;
        let mut current_props = Properties::default();
        let mut in_response = false;
        let mut in_propstat = false;
        let mut in_prop = false;

        let mut buf = Vec::new();

        loop {
            let event = reader.read_event_into(&mut buf)?;
            match event {
                Event::End(ref e) if e.name().local_name().into_inner() == b"multistatus" => break,
                Event::Eof => break,

                Event::Start(ref e) => match e.name().local_name().into_inner() {
                    b"response" => {
                        in_response = true;
                        current_response = Some(ResponseItem {
                            href: Href::new(String::new()),
                            prop_stats: Vec::new(),
                        });
                    }
                    b"href" if in_response && !in_propstat => {
                        let href = read_element_text(&mut reader, &event)?.unwrap_or_default();
                        if let Some(ref mut resp) = current_response {
                            resp.href = Href::new(href);
                        }
                    }
                    b"propstat" if in_response => {
                        in_propstat = true;
                        current_props = Properties::default();
                    }
                    b"prop" if in_propstat => in_prop = true,

                    b"getctag" if in_prop => {
                        current_props.getctag =
                            read_element_text(&mut reader, &event)?.map(CTag::new);
                    }
                    b"getetag" if in_prop => {
                        current_props.getetag =
                            read_element_text(&mut reader, &event)?.map(ETag::new);
                    }
                    b"displayname" if in_prop => {
                        current_props.display_name = read_element_text(&mut reader, &event)?;
                    }
                    b"sync-token" if in_prop => {
                        current_props.sync_token = read_element_text(&mut reader, &event)?;
                    }
                    b"resourcetype" if in_prop => {
                        current_props.resource_type =
                            Some(read_children(&mut reader, b"resourcetype")?);
                    }
                    b"supported-report-set" if in_prop => {
                        current_props.supported_report_set =
                            Some(read_supported_reports(&mut reader)?);
                    }
                    b"status" if in_propstat => {
                        let status = read_element_text(&mut reader, &event)?.unwrap_or_default();
                        if let Some(ref mut resp) = current_response {
                            resp.prop_stats.push(PropStat {
                                props: std::mem::take(&mut current_props),
                                status,
                            });
                        }
                    }
                    _ => {}
                },
                Event::Empty(ref e) if in_prop => match e.name().local_name().into_inner() {
                    b"resourcetype" => current_props.resource_type = Some(Vec::new()),
                    b"supported-report-set" => {
                        current_props.supported_report_set = Some(Vec::new());
                    }
                    b"displayname" => current_props.display_name = Some(String::new()),
                    _ => {}
                },
                Event::End(ref e) => match e.name().local_name().into_inner() {
                    b"response" if in_response => {
                        in_response = false;
                        if let Some(resp) = current_response.take() {
                            responses.push(resp);
                        }
                    }
                    b"propstat" if in_propstat => in_propstat = false,
                    b"prop" => in_prop = false,
                    _ => {}
                },
                _ => {}
            }
            buf.clear();
        }

        Ok(Self { responses })
    }

    /// Converts the multistatus into one entry per resource, keeping only
    /// successful propstats.
    #[must_use]
    pub fn into_entries(self) -> Vec<ResponseEntry> {
        self.responses
            .into_iter()
            .map(|response| {
                let mut props = Properties::default();
                for prop_stat in response.prop_stats {
                    if prop_stat.is_success() {
                        props.merge(prop_stat.props);
                    }
                }
                ResponseEntry {
                    href: response.href,
                    props,
                }
            })
            .collect()
    }

    /// Folds every resource into a single property map.
    ///
    /// Later non-empty values override earlier ones.
    #[must_use]
    pub fn merge(self) -> Properties {
        self.into_entries()
            .into_iter()
            .fold(Properties::default(), |mut acc, entry| {
                acc.merge(entry.props);
                acc
            })
    }
}

/// Collects the local names of the direct children of `end`.
fn read_children<R: std::io::BufRead>(
    reader: &mut quick_xml::Reader<R>,
    end: &[u8],
) -> Result<Vec<String>, DavError> {
    let mut names = Vec::new();
    let mut depth = 0usize;
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::End(ref e) if depth == 0 && e.name().local_name().into_inner() == end => {
                break;
            }
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Start(ref e) => {
                if depth == 0 {
                    names.push(local_name(e.name().local_name().into_inner())?);
                }
                depth += 1;
            }
            Event::Empty(ref e) if depth == 0 => {
                names.push(local_name(e.name().local_name().into_inner())?);
            }
            Event::Eof => return Err(DavError::Xml("Unexpected EOF".to_string())),
            _ => {}
        }
        buf.clear();
    }
    Ok(names)
}

/// Reads `supported-report/report/*` entries up to the closing
/// `supported-report-set` tag.
fn read_supported_reports<R: std::io::BufRead>(
    reader: &mut quick_xml::Reader<R>,
) -> Result<Vec<Report>, DavError> {
    let mut reports = Vec::new();
    let mut in_report = false;
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::End(ref e) => match e.name().local_name().into_inner() {
                b"supported-report-set" => break,
                b"report" => in_report = false,
                _ => {}
            },
            Event::Start(ref e) if e.name().local_name().into_inner() == b"report" => {
                in_report = true;
            }
            Event::Start(ref e) | Event::Empty(ref e) if in_report => {
                let name = local_name(e.name().local_name().into_inner())?;
                reports.push(Report::from_name(&name));
            }
            Event::Eof => return Err(DavError::Xml("Unexpected EOF".to_string())),
            _ => {}
        }
        buf.clear();
    }
    Ok(reports)
}

fn local_name(bytes: &[u8]) -> Result<String, DavError> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| DavError::Xml(format!("UTF-8 error: {e}")))
}
