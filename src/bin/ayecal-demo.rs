use ayecal::{Calendar, CalendarOptions, Event, EventProperties, EventStatus};

fn main() {
    env_logger::init();

    let start = chrono::Utc::now();
    let options = CalendarOptions {
        name: Some("AyeCal demo".to_string()),
        scope: Some("example.com".to_string()),
        ..CalendarOptions::default()
    };
    let mut calendar = Calendar::new(options);

    let events = vec![
        EventProperties::starting_at(start)
            .with_end_time(start + chrono::Duration::hours(2))
            .with_summary("Jacob's 22nd Birthday Party")
            .with_location("My apartment")
            .with_status(EventStatus::Confirmed),
        EventProperties::starting_at(start + chrono::Duration::days(1))
            .with_summary("Cleaning up, \"quietly\"")
            .with_busy(false),
    ];

    for props in events {
        let added = Event::new(props).and_then(|event| calendar.add_event(event).map(|_| ()));
        if let Err(err) = added {
            log::error!("Unable to add event: {}", err);
        }
    }

    println!("{}", calendar);
}
