//! Creating events and exporting them

use chrono::{DateTime, Utc};

use ayecal::{Error, Event, EventProperties, EventStatus};

fn test_date() -> DateTime<Utc> {
    "2022-08-17T17:00:00Z".parse().unwrap()
}

#[test]
fn test_event_with_provided_values() {
    let _ = env_logger::builder().is_test(true).try_init();

    let event = Event::new(EventProperties::starting_at(test_date())
        .with_id("0")
        .with_summary("Jacob's 22nd Birthday Party")
        .with_location("My apartment")
        .with_description("Hey everyone! Come to my party :)")
        .with_end_time(test_date())
    ).unwrap();

    assert_eq!(event.id(), "0");
    assert_eq!(event.summary(), Some("Jacob\\'s 22nd Birthday Party"));
    assert_eq!(event.location(), Some("My apartment"));
    assert_eq!(event.description(), Some("Hey everyone! Come to my party :)"));
    assert_eq!(event.start_time(), &test_date());
    assert_eq!(event.end_time(), Some(&test_date()));
    assert_eq!(event.status(), None);
    assert_eq!(event.busy(), Some(true));
    assert_eq!(event.revision(), 0);
}

#[test]
fn test_generated_ids_are_unique() {
    let _ = env_logger::builder().is_test(true).try_init();

    let first = Event::new(EventProperties::starting_at(test_date())).unwrap();
    let second = Event::new(EventProperties::starting_at(test_date())).unwrap();
    assert!(!first.id().is_empty());
    assert_ne!(first.id(), second.id());
}

#[test]
fn test_missing_start_time() {
    let _ = env_logger::builder().is_test(true).try_init();

    let props: EventProperties = serde_json::from_str(r#"{ "summary": "No start" }"#).unwrap();
    match Event::new(props) {
        Err(Error::InvalidArgument(_)) => (),
        other => panic!("Unexpected result {:?}", other),
    }
}

#[test]
fn test_event_block() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut event = Event::new(EventProperties::starting_at(test_date())
        .with_id("party")
        .with_status(EventStatus::Tentative)
        .with_revision(2)
        .with_custom("X-MICROSOFT-CDO-BUSYSTATUS", "TENTATIVE")
    ).unwrap();

    let ics = event.to_ics(Some("example.com"));
    assert!(ics.starts_with("BEGIN:VEVENT\nDTSTART:20220817T170000Z\nDTSTAMP:"));
    assert!(ics.ends_with("\nSTATUS:TENTATIVE\nTRANSP:OPAQUE\nSEQUENCE:2\nX-MICROSOFT-CDO-BUSYSTATUS:TENTATIVE\nEND:VEVENT"));
    assert!(ics.contains("\nUID:party@example.com\n"));
    assert!(!ics.contains("DTEND"));

    event.set_busy(Some(false));
    assert!(event.to_ics(None).contains("\nTRANSP:TRANSPARENT\n"));
    assert!(event.to_ics(None).contains("\nUID:party\n"));

    event.set_busy(None);
    assert!(!event.to_ics(None).contains("TRANSP"));
}

#[test]
fn test_empty_text_is_not_written() {
    let _ = env_logger::builder().is_test(true).try_init();

    let event = Event::new(EventProperties::starting_at(test_date()).with_summary("")).unwrap();
    assert_eq!(event.summary(), Some(""));
    assert!(!event.to_ics(None).contains("SUMMARY"));
}

#[test]
fn test_event_properties_from_json() {
    let _ = env_logger::builder().is_test(true).try_init();

    let props: EventProperties = serde_json::from_str(r#"{
        "id": "from-json",
        "startTime": "2022-08-18T03:00:00+10:00",
        "status": "CANCELLED",
        "busy": null,
        "createdTime": null,
        "custom": { "X-ONE": "1" }
    }"#).unwrap();

    let event = Event::new(props).unwrap();
    assert_eq!(event.start_time(), &test_date());
    assert_eq!(event.status(), Some(EventStatus::Cancelled));
    assert_eq!(event.busy(), None);
    assert_eq!(event.created_time(), None);
    assert!(event.updated_time().is_some());
    assert_eq!(event.custom().get("X-ONE"), Some("1"));
}
