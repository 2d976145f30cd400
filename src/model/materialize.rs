// File: ./src/model/materialize.rs
// Expands a recurring activity into one dated event per occurrence week.
use crate::error::Result;
use crate::model::item::{ActivityRecord, CalendarEvent, WeekSet};
use crate::model::resolver::DateResolver;

impl ActivityRecord {
    /// One `CalendarEvent` per week in `weeks`, in ascending week order.
    pub fn materialize(
        &self,
        weeks: &WeekSet,
        resolver: &DateResolver,
    ) -> Result<Vec<CalendarEvent>> {
        let description = self.description();
        let mut events = Vec::with_capacity(weeks.len());

        for week in weeks {
            let day = resolver.resolve(week, self.weekday)?;
            events.push(CalendarEvent {
                title: self.name.clone(),
                description: description.clone(),
                location: self.location.clone(),
                start: day.and_time(self.start),
                end: day.and_time(self.end),
                all_day: false,
            });
        }

        log::debug!(
            "'{}' on {} materialized into {} event(s) for weeks {}",
            self.name,
            self.weekday,
            events.len(),
            weeks
        );
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use crate::model::clock::parse_clock_time;
    use crate::model::item::{ActivityRecord, TermAnchor, Weekday};
    use crate::model::resolver::DateResolver;
    use crate::model::weeks::expand_weeks;
    use chrono::NaiveDate;

    fn lab() -> ActivityRecord {
        ActivityRecord::new(
            Weekday::Thursday,
            "Circuits Lab",
            "LAB",
            parse_clock_time("14:00").unwrap(),
            parse_clock_time("16:00").unwrap(),
            "8-10, 12",
            "ENG 2.09",
            "Dr. Jones",
        )
        .unwrap()
    }

    #[test]
    fn test_one_event_per_week() {
        let record = lab();
        let weeks = expand_weeks(&record.weeks).unwrap();
        let anchor = TermAnchor::new(8, NaiveDate::from_ymd_opt(2024, 9, 23).unwrap()).unwrap();
        let resolver = DateResolver::new(anchor);

        let events = record.materialize(&weeks, &resolver).unwrap();
        assert_eq!(events.len(), weeks.len());
        assert_eq!(events.len(), 4);

        for e in &events {
            assert!(e.start < e.end);
            assert!(!e.all_day);
            assert_eq!(e.title, "Circuits Lab");
            assert_eq!(e.description, "LAB - Dr. Jones");
            assert_eq!(e.location, "ENG 2.09");
        }

        assert_eq!(
            events[0].start.date(),
            NaiveDate::from_ymd_opt(2024, 9, 26).unwrap()
        );
        assert_eq!(
            events[3].start.date(),
            NaiveDate::from_ymd_opt(2024, 10, 24).unwrap()
        );
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        let result = ActivityRecord::new(
            Weekday::Monday,
            "Backwards",
            "LEC",
            parse_clock_time("11:00").unwrap(),
            parse_clock_time("10:00").unwrap(),
            "1",
            "",
            "",
        );
        assert!(result.is_err());
    }
}
