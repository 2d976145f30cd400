// File: ./src/model/item.rs
// Core domain types shared by every pipeline stage.
use crate::error::{ConvertError, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::BTreeSet;
use std::fmt;
use strum::{Display, EnumIter, EnumString};

/// The five teaching days. Weekend sections are not part of the grid schema.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumIter,
    EnumString,
)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    /// Zero-based position in the Monday..Friday ordering.
    pub fn offset(self) -> u32 {
        match self {
            Weekday::Monday => 0,
            Weekday::Tuesday => 1,
            Weekday::Wednesday => 2,
            Weekday::Thursday => 3,
            Weekday::Friday => 4,
        }
    }

    /// Parses a section label. Only the exact names Monday..Friday are accepted.
    pub fn from_label(label: &str) -> Result<Self> {
        let label = label.trim();
        label.parse::<Weekday>().map_err(|_| {
            ConvertError::extraction(format!("Unrecognized weekday label '{}'", label))
        })
    }
}

/// One grid row for one weekday. Built by the grid extractor, read by the materializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRecord {
    pub weekday: Weekday,
    pub name: String,
    pub activity_type: String,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub weeks: String,
    pub location: String,
    pub staff: String,
}

impl ActivityRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        weekday: Weekday,
        name: impl Into<String>,
        activity_type: impl Into<String>,
        start: NaiveTime,
        end: NaiveTime,
        weeks: impl Into<String>,
        location: impl Into<String>,
        staff: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        if start >= end {
            return Err(ConvertError::format(format!(
                "'{}' on {} ends at {} which is not after its start {}",
                name,
                weekday,
                end.format("%H:%M"),
                start.format("%H:%M")
            )));
        }
        Ok(Self {
            weekday,
            name,
            activity_type: activity_type.into(),
            start,
            end,
            weeks: weeks.into(),
            location: location.into(),
            staff: staff.into(),
        })
    }

    /// Event description: "<type> - <staff>".
    pub fn description(&self) -> String {
        format!("{} - {}", self.activity_type, self.staff)
    }
}

/// Highest week number a selector may name. Term calendars never run past 53 weeks.
pub const MAX_WEEK: u32 = 53;

/// Term-relative week numbers in `1..=MAX_WEEK`, deduplicated and ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekSet(BTreeSet<u32>);

impl WeekSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, week: u32) -> Result<bool> {
        if week == 0 {
            return Err(ConvertError::format("Week numbers start at 1"));
        }
        if week > MAX_WEEK {
            return Err(ConvertError::format(format!(
                "Week {} is past the last possible week {}",
                week, MAX_WEEK
            )));
        }
        Ok(self.0.insert(week))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }
}

impl<'a> IntoIterator for &'a WeekSet {
    type Item = u32;
    type IntoIter = std::iter::Copied<std::collections::btree_set::Iter<'a, u32>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}

impl fmt::Display for WeekSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|w| w.to_string()).collect();
        write!(f, "{}", parts.join(","))
    }
}

/// Fixed origin of the week numbering: `week` starts in the calendar week containing `date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermAnchor {
    pub week: u32,
    pub date: NaiveDate,
}

impl TermAnchor {
    pub fn new(week: u32, date: NaiveDate) -> Result<Self> {
        if week == 0 {
            return Err(ConvertError::resolution(
                "Term anchor week must be 1 or greater",
            ));
        }
        Ok(Self { week, date })
    }
}

/// One dated occurrence of an activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub title: String,
    pub description: String,
    pub location: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub all_day: bool,
}
