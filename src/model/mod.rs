// File: ./src/model/mod.rs
pub mod adapter;
pub mod clock;
pub mod item;
pub mod materialize;
pub mod resolver;
pub mod weeks;

pub use adapter::{ExportOptions, parse_events, to_ics_string};
pub use item::{ActivityRecord, CalendarEvent, TermAnchor, WeekSet, Weekday};
pub use resolver::DateResolver;
