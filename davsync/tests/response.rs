// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Response parsing tests.

use davsync::{MultiStatusResponse, Report};

#[test]
fn response_parse_simple_namespace_test() {
    let xml = "\
<?xml version=\"1.0\" encoding=\"utf-8\" ?>
<D:multistatus xmlns:D=\"DAV:\">
  <D:response>
    <D:href>/test/</D:href>
  </D:response>
</D:multistatus>";

    let response = MultiStatusResponse::from_xml(xml).expect("Failed to parse multistatus");
    assert_eq!(response.responses.len(), 1);
    assert_eq!(response.responses[0].href.as_str(), "/test/");
    assert!(response.responses[0].prop_stats.is_empty());
}

#[test]
fn response_parse_multistatus_basic() {
    let xml = "\
<?xml version=\"1.0\" encoding=\"utf-8\" ?>
<D:multistatus xmlns:D=\"DAV:\">
  <D:response>
    <D:href>/calendars/user/event1.ics</D:href>
    <D:propstat>
      <D:prop>
        <D:getetag>\"12345\"</D:getetag>
      </D:prop>
      <D:status>HTTP/1.1 200 OK</D:status>
    </D:propstat>
  </D:response>
</D:multistatus>";

    let response = MultiStatusResponse::from_xml(xml).expect("Failed to parse multistatus");

    assert_eq!(response.responses.len(), 1);
    assert_eq!(
        response.responses[0].href.as_str(),
        "/calendars/user/event1.ics"
    );
    assert_eq!(response.responses[0].prop_stats.len(), 1);
    assert_eq!(
        response.responses[0].prop_stats[0].status,
        "HTTP/1.1 200 OK"
    );
    assert_eq!(
        response.responses[0].prop_stats[0]
            .props
            .getetag
            .as_ref()
            .unwrap()
            .as_str(),
        "\"12345\""
    );
}

#[test]
fn response_parse_home_listing_ctags() {
    let xml = "\
<?xml version=\"1.0\" encoding=\"utf-8\" ?>
<D:multistatus xmlns:D=\"DAV:\" xmlns:CS=\"http://calendarserver.org/ns/\">
  <D:response>
    <D:href>/home/</D:href>
    <D:propstat>
      <D:prop>
        <CS:getctag/>
      </D:prop>
      <D:status>HTTP/1.1 404 Not Found</D:status>
    </D:propstat>
  </D:response>
  <D:response>
    <D:href>/cal/1/</D:href>
    <D:propstat>
      <D:prop>
        <CS:getctag>xyz</CS:getctag>
      </D:prop>
      <D:status>HTTP/1.1 200 OK</D:status>
    </D:propstat>
  </D:response>
</D:multistatus>";

    let entries = MultiStatusResponse::from_xml(xml)
        .expect("Failed to parse multistatus")
        .into_entries();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].href.as_str(), "/home/");
    assert_eq!(entries[0].props.getctag, None);
    assert_eq!(entries[1].href.as_str(), "/cal/1/");
    assert_eq!(entries[1].props.getctag.as_ref().unwrap().as_str(), "xyz");
}

#[test]
fn response_parse_supported_report_set() {
    let xml = "\
<?xml version=\"1.0\" encoding=\"utf-8\" ?>
<D:multistatus xmlns:D=\"DAV:\" xmlns:C=\"urn:ietf:params:xml:ns:caldav\">
  <D:response>
    <D:href>/cal/1/</D:href>
    <D:propstat>
      <D:prop>
        <D:supported-report-set>
          <D:supported-report>
            <D:report><D:sync-collection/></D:report>
          </D:supported-report>
          <D:supported-report>
            <D:report><C:calendar-multiget/></D:report>
          </D:supported-report>
          <D:supported-report>
            <D:report><D:principal-match/></D:report>
          </D:supported-report>
        </D:supported-report-set>
      </D:prop>
      <D:status>HTTP/1.1 200 OK</D:status>
    </D:propstat>
  </D:response>
</D:multistatus>";

    let props = MultiStatusResponse::from_xml(xml)
        .expect("Failed to parse multistatus")
        .merge();

    assert_eq!(
        props.supported_report_set.unwrap(),
        vec![
            Report::SyncCollection,
            Report::CalendarMultiget,
            Report::Other("principal-match".to_string()),
        ]
    );
}

#[test]
fn response_merge_folds_entries() {
    let xml = "\
<?xml version=\"1.0\" encoding=\"utf-8\" ?>
<D:multistatus xmlns:D=\"DAV:\">
  <D:response>
    <D:href>/cal/1/</D:href>
    <D:propstat>
      <D:prop>
        <D:displayname>Personal</D:displayname>
        <D:sync-token>token-1</D:sync-token>
      </D:prop>
      <D:status>HTTP/1.1 200 OK</D:status>
    </D:propstat>
  </D:response>
  <D:response>
    <D:href>/cal/1/event.ics</D:href>
    <D:propstat>
      <D:prop>
        <D:getetag>\"e1\"</D:getetag>
        <D:sync-token>token-2</D:sync-token>
      </D:prop>
      <D:status>HTTP/1.1 200 OK</D:status>
    </D:propstat>
  </D:response>
</D:multistatus>";

    let props = MultiStatusResponse::from_xml(xml)
        .expect("Failed to parse multistatus")
        .merge();

    assert_eq!(props.display_name.as_deref(), Some("Personal"));
    assert_eq!(props.getetag.as_ref().unwrap().as_str(), "\"e1\"");
    assert_eq!(props.sync_token.as_deref(), Some("token-2"));
}

#[test]
fn response_parse_multiple_propstats() {
    let xml = "\
<?xml version=\"1.0\" encoding=\"utf-8\" ?>
<D:multistatus xmlns:D=\"DAV:\">
  <D:response>
    <D:href>/calendars/user/event1.ics</D:href>
    <D:propstat>
      <D:prop>
        <D:displayname>Event 1</D:displayname>
      </D:prop>
      <D:status>HTTP/1.1 200 OK</D:status>
    </D:propstat>
    <D:propstat>
      <D:prop>
        <D:getetag>\"12345\"</D:getetag>
      </D:prop>
      <D:status>HTTP/1.1 200 OK</D:status>
    </D:propstat>
  </D:response>
</D:multistatus>";

    let response = MultiStatusResponse::from_xml(xml).expect("Failed to parse multistatus");

    assert_eq!(response.responses.len(), 1);
    assert_eq!(response.responses[0].prop_stats.len(), 2);

    let entries = response.into_entries();
    assert_eq!(entries[0].props.display_name.as_deref(), Some("Event 1"));
    assert_eq!(
        entries[0].props.getetag.as_ref().unwrap().as_str(),
        "\"12345\""
    );
}

#[test]
fn response_parse_with_error_status() {
    let xml = "\
<?xml version=\"1.0\" encoding=\"utf-8\" ?>
<D:multistatus xmlns:D=\"DAV:\">
  <D:response>
    <D:href>/calendars/user/event1.ics</D:href>
    <D:propstat>
      <D:prop>
        <D:getetag>\"12345\"</D:getetag>
      </D:prop>
      <D:status>HTTP/1.1 404 Not Found</D:status>
    </D:propstat>
  </D:response>
</D:multistatus>";

    let response = MultiStatusResponse::from_xml(xml).expect("Failed to parse multistatus");

    assert_eq!(response.responses.len(), 1);
    assert_eq!(
        response.responses[0].prop_stats[0].status,
        "HTTP/1.1 404 Not Found"
    );
    assert!(!response.responses[0].prop_stats[0].is_success());
    assert_eq!(response.into_entries()[0].props.getetag, None);
}

#[test]
fn response_parse_resourcetype() {
    let xml = "\
<?xml version=\"1.0\" encoding=\"utf-8\" ?>
<D:multistatus xmlns:D=\"DAV:\" xmlns:C=\"urn:ietf:params:xml:ns:caldav\">
  <D:response>
    <D:href>/test/</D:href>
    <D:propstat>
      <D:prop>
        <D:resourcetype>
          <D:collection/>
          <C:calendar/>
        </D:resourcetype>
      </D:prop>
      <D:status>HTTP/1.1 200 OK</D:status>
    </D:propstat>
  </D:response>
</D:multistatus>";

    let response = MultiStatusResponse::from_xml(xml).expect("Failed to parse multistatus");
    assert_eq!(
        response.responses[0].prop_stats[0].props.resource_type,
        Some(vec!["collection".to_string(), "calendar".to_string()])
    );
}

#[test]
fn response_report_names_accept_both_spellings() {
    assert_eq!(Report::from_name("sync-collection"), Report::SyncCollection);
    assert_eq!(Report::from_name("syncCollection"), Report::SyncCollection);
    assert_eq!(Report::SyncCollection.name(), "sync-collection");
    assert_eq!(
        Report::from_name("addressbook-query"),
        Report::AddressbookQuery
    );
}

#[test]
fn response_merge_keeps_reports_over_empty_child() {
    let xml = "\
<?xml version=\"1.0\" encoding=\"utf-8\" ?>
<D:multistatus xmlns:D=\"DAV:\">
  <D:response>
    <D:href>/cal/1/</D:href>
    <D:propstat>
      <D:prop>
        <D:displayname>Personal</D:displayname>
        <D:supported-report-set>
          <D:supported-report><D:report><D:sync-collection/></D:report></D:supported-report>
        </D:supported-report-set>
      </D:prop>
      <D:status>HTTP/1.1 200 OK</D:status>
    </D:propstat>
  </D:response>
  <D:response>
    <D:href>/cal/1/event.ics</D:href>
    <D:propstat>
      <D:prop>
        <D:displayname/>
        <D:supported-report-set/>
      </D:prop>
      <D:status>HTTP/1.1 200 OK</D:status>
    </D:propstat>
  </D:response>
</D:multistatus>";

    let props = MultiStatusResponse::from_xml(xml)
        .expect("Failed to parse multistatus")
        .merge();

    assert_eq!(
        props.supported_report_set,
        Some(vec![Report::SyncCollection])
    );
    assert_eq!(props.display_name.as_deref(), Some("Personal"));
}

#[test]
fn response_merge_empty_value_fills_missing_slot() {
    let xml = "\
<?xml version=\"1.0\" encoding=\"utf-8\" ?>
<D:multistatus xmlns:D=\"DAV:\">
  <D:response>
    <D:href>/cal/1/</D:href>
    <D:propstat>
      <D:prop>
        <D:supported-report-set/>
      </D:prop>
      <D:status>HTTP/1.1 200 OK</D:status>
    </D:propstat>
  </D:response>
</D:multistatus>";

    let props = MultiStatusResponse::from_xml(xml)
        .expect("Failed to parse multistatus")
        .merge();

    assert_eq!(props.supported_report_set, Some(Vec::new()));
}

#[test]
fn response_text_keeps_spaces_around_entities() {
    let xml = "\
<?xml version=\"1.0\" encoding=\"utf-8\" ?>
<D:multistatus xmlns:D=\"DAV:\">
  <D:response>
    <D:href>/cal/1/</D:href>
    <D:propstat>
      <D:prop>
        <D:displayname>
          Work &amp; Home &#x2F; Family
        </D:displayname>
        <D:getetag>&quot;e1&quot;</D:getetag>
      </D:prop>
      <D:status>HTTP/1.1 200 OK</D:status>
    </D:propstat>
  </D:response>
</D:multistatus>";

    let entries = MultiStatusResponse::from_xml(xml)
        .expect("Failed to parse multistatus")
        .into_entries();

    assert_eq!(
        entries[0].props.display_name.as_deref(),
        Some("Work & Home / Family")
    );
    assert_eq!(entries[0].props.getetag.as_deref(), Some("\"e1\""));
}
