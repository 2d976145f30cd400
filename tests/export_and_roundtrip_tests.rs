// Export to .ics and read it back: same number of events, same content.
use chrono::NaiveDate;
use termcal::model::{CalendarEvent, ExportOptions, TermAnchor, parse_events, to_ics_string};
use termcal::Converter;
use termcal::grid::TimetableDocument;

const FIXTURE: &str = include_str!("fixtures/timetable.html");

fn sorted(mut events: Vec<CalendarEvent>) -> Vec<CalendarEvent> {
    events.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.title.cmp(&b.title)));
    events
}

#[test]
fn test_roundtrip_preserves_count_and_content() {
    let anchor = TermAnchor::new(8, NaiveDate::from_ymd_opt(2024, 9, 23).unwrap()).unwrap();
    let converter = Converter::new(anchor);
    let events = converter
        .events(&TimetableDocument::parse(FIXTURE))
        .unwrap();

    let ics = to_ics_string(&events, &ExportOptions::default());
    assert_eq!(ics.matches("BEGIN:VEVENT").count(), events.len());

    let parsed = parse_events(&ics).unwrap();
    assert_eq!(parsed.len(), events.len());
    assert_eq!(sorted(parsed), sorted(events));
}

#[test]
fn test_duplicate_events_survive_roundtrip() {
    let day = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
    let event = CalendarEvent {
        title: "Seminar".to_string(),
        description: "SEM - Staff".to_string(),
        location: "Room 1".to_string(),
        start: day.and_hms_opt(13, 0, 0).unwrap(),
        end: day.and_hms_opt(14, 0, 0).unwrap(),
        all_day: false,
    };
    let events = vec![event.clone(), event.clone()];

    let ics = to_ics_string(&events, &ExportOptions::default());
    let parsed = parse_events(&ics).unwrap();
    assert_eq!(parsed, events);
}

#[test]
fn test_calendar_headers() {
    let options = ExportOptions {
        calendar_name: Some("Autumn 2024".to_string()),
        timezone: None,
    };
    let ics = to_ics_string(&[], &options);
    assert!(ics.starts_with("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n"));
    assert!(ics.contains("PRODID:-//Termcal//Timetable Export//EN"));
    assert!(ics.contains("X-WR-CALNAME:Autumn 2024"));
    assert!(ics.ends_with("END:VCALENDAR\r\n"));
}
