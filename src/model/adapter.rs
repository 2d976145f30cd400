// File: src/model/adapter.rs
// Conversion between CalendarEvent and iCalendar (RFC 5545) text.
use crate::error::{ConvertError, Result};
use crate::model::item::CalendarEvent;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use icalendar::{Calendar, CalendarComponent, Component, Event, Property};
use uuid::Uuid;

pub const PRODID: &str = "-//Termcal//Timetable Export//EN";

/// Calendar-level settings applied when serializing.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Written as `X-WR-CALNAME` when present.
    pub calendar_name: Option<String>,
    /// IANA zone name written as `TZID` on start/end and as `X-WR-TIMEZONE`.
    /// No VTIMEZONE block is emitted; clients must resolve the IANA name themselves.
    /// Times are floating when absent.
    pub timezone: Option<String>,
}

fn date_property(key: &str, dt: &NaiveDateTime, all_day: bool, tzid: Option<&str>) -> Property {
    if all_day {
        let mut prop = Property::new(key, dt.format("%Y%m%d").to_string());
        prop.add_parameter("VALUE", "DATE");
        return prop;
    }
    let mut prop = Property::new(key, dt.format("%Y%m%dT%H%M%S").to_string());
    if let Some(tz) = tzid {
        prop.add_parameter("TZID", tz);
    }
    prop
}

impl CalendarEvent {
    pub fn to_ical_event(&self, options: &ExportOptions) -> Event {
        let mut event = Event::new();
        event.uid(&Uuid::new_v4().to_string());
        event.summary(&self.title);
        if !self.description.is_empty() {
            event.description(&self.description);
        }
        if !self.location.is_empty() {
            event.add_property("LOCATION", &self.location);
        }
        event.timestamp(Utc::now());

        let tzid = options.timezone.as_deref();
        event.append_property(date_property("DTSTART", &self.start, self.all_day, tzid));
        event.append_property(date_property("DTEND", &self.end, self.all_day, tzid));

        event.done()
    }
}

/// Serializes every event as its own VEVENT block, in input order.
pub fn to_ics_string(events: &[CalendarEvent], options: &ExportOptions) -> String {
    let mut output = format!(
        "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:{}\r\nCALSCALE:GREGORIAN\r\n",
        PRODID
    );
    if let Some(name) = &options.calendar_name {
        output.push_str(&format!("X-WR-CALNAME:{}\r\n", name));
    }
    if let Some(tz) = &options.timezone {
        output.push_str(&format!("X-WR-TIMEZONE:{}\r\n", tz));
    }

    for event in events {
        let vevent = event.to_ical_event(options).to_string();
        output.push_str(&vevent);
        if !vevent.ends_with("\r\n") && !vevent.ends_with('\n') {
            output.push_str("\r\n");
        }
    }

    output.push_str("END:VCALENDAR\r\n");
    output
}

fn parse_date_prop(val: &str) -> Option<(NaiveDateTime, bool)> {
    if val.len() == 8 {
        return NaiveDate::parse_from_str(val, "%Y%m%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|d| (d, true));
    }
    NaiveDateTime::parse_from_str(val.trim_end_matches('Z'), "%Y%m%dT%H%M%S")
        .ok()
        .map(|d| (d, false))
}

/// Reads the VEVENTs of a calendar back into `CalendarEvent`s.
pub fn parse_events(raw_ics: &str) -> Result<Vec<CalendarEvent>> {
    let calendar: Calendar = raw_ics
        .parse()
        .map_err(|e| ConvertError::format(format!("Parse: {}", e)))?;

    let mut events = Vec::new();
    for component in &calendar.components {
        let CalendarComponent::Event(e) = component else {
            continue;
        };

        let props = e.properties();
        let (start, all_day) = props
            .get("DTSTART")
            .and_then(|p| parse_date_prop(p.value()))
            .ok_or_else(|| ConvertError::format("VEVENT without a valid DTSTART"))?;
        let (end, _) = props
            .get("DTEND")
            .and_then(|p| parse_date_prop(p.value()))
            .ok_or_else(|| ConvertError::format("VEVENT without a valid DTEND"))?;

        events.push(CalendarEvent {
            title: e.get_summary().unwrap_or_default().to_string(),
            description: e.get_description().unwrap_or_default().to_string(),
            location: props
                .get("LOCATION")
                .map(|p| p.value().to_string())
                .unwrap_or_default(),
            start,
            end,
            all_day,
        });
    }
    Ok(events)
}
