// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! XML utilities for WebDAV/CalDAV processing.

use quick_xml::events::Event;

/// XML namespaces used by `WebDAV` and its extensions.
pub mod ns {
    /// `WebDAV` namespace.
    pub const DAV: &str = "DAV:";

    /// `CalDAV` namespace.
    pub const CALDAV: &str = "urn:ietf:params:xml:ns:caldav";

    /// `CardDAV` namespace.
    pub const CARDDAV: &str = "urn:ietf:params:xml:ns:carddav";

    /// Calendar server extensions (`getctag`).
    pub const CALENDAR_SERVER: &str = "http://calendarserver.org/ns/";
}

/// Returns the conventional prefix for a well-known namespace.
pub(crate) fn prefix_of(namespace: &str) -> Option<&'static str> {
    match namespace {
        ns::DAV => Some("D"),
        ns::CALDAV => Some("C"),
        ns::CARDDAV => Some("CR"),
        ns::CALENDAR_SERVER => Some("CS"),
        _ => None,
    }
}

/// Reads text content of an XML element.
///
/// The reader must be positioned right after `event`; on return it is
/// positioned after the matching end tag. Text fragments split around entity
/// references are joined before the result is trimmed.
///
/// # Errors
///
/// Returns an error if XML parsing fails.
pub(crate) fn read_element_text<R: std::io::BufRead>(
    reader: &mut quick_xml::Reader<R>,
    event: &Event,
) -> Result<Option<String>, quick_xml::Error> {
    match event {
        Event::Start(_) => {
            let mut text = String::new();
            let mut depth = 1;
            let mut buf = Vec::new();

            loop {
                match reader.read_event_into(&mut buf)? {
                    Event::Start(_) => depth += 1,
                    Event::End(_) => {
                        depth -= 1;
                        if depth == 0 {
                            break;
                        }
                    }
                    Event::Text(e) => text.push_str(&e.decode()?),
                    Event::GeneralRef(r) => {
                        if let Some(ch) = r.resolve_char_ref()? {
                            text.push(ch);
                        } else {
                            let name = r.decode()?;
                            match quick_xml::escape::resolve_predefined_entity(&name) {
                                Some(resolved) => text.push_str(resolved),
                                None => {
                                    text.push('&');
                                    text.push_str(&name);
                                    text.push(';');
                                }
                            }
                        }
                    }
                    Event::Eof => break,
                    _ => {}
                }
                buf.clear();
            }
            Ok(Some(text.trim().to_string()))
        }
        Event::Empty(_) => Ok(Some(String::new())),
        _ => Ok(None),
    }
}
