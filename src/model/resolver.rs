// File: ./src/model/resolver.rs
use crate::error::{ConvertError, Result};
use crate::model::item::{TermAnchor, Weekday};
use chrono::{Datelike, Duration, NaiveDate};

/// Maps (week number, weekday) to a calendar date relative to a term anchor.
///
/// The anchor date may fall on any day: it is first rewound to the Monday of
/// its own week, and weekday offsets are applied from there.
#[derive(Debug, Clone, Copy)]
pub struct DateResolver {
    anchor: TermAnchor,
    week_start: NaiveDate,
}

impl DateResolver {
    pub fn new(anchor: TermAnchor) -> Self {
        let back = anchor.date.weekday().num_days_from_monday();
        if back != 0 {
            log::warn!(
                "Term anchor {} is a {}, using Monday {} as the start of week {}",
                anchor.date,
                anchor.date.weekday(),
                anchor.date - Duration::days(back.into()),
                anchor.week
            );
        }
        Self {
            anchor,
            week_start: anchor.date - Duration::days(back.into()),
        }
    }

    pub fn resolve(&self, week: u32, weekday: Weekday) -> Result<NaiveDate> {
        let weeks = i64::from(week) - i64::from(self.anchor.week);
        let days = weeks
            .checked_mul(7)
            .and_then(|d| d.checked_add(weekday.offset().into()))
            .and_then(Duration::try_days)
            .ok_or_else(|| {
                ConvertError::resolution(format!("Week {} is out of range", week))
            })?;

        self.week_start.checked_add_signed(days).ok_or_else(|| {
            ConvertError::resolution(format!(
                "Week {} {} falls outside the supported calendar range",
                week, weekday
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn resolver() -> DateResolver {
        DateResolver::new(TermAnchor::new(8, date(2024, 9, 23)).unwrap())
    }

    #[test]
    fn test_wednesday_weeks_8_and_9() {
        let r = resolver();
        assert_eq!(r.resolve(8, Weekday::Wednesday).unwrap(), date(2024, 9, 25));
        assert_eq!(r.resolve(9, Weekday::Wednesday).unwrap(), date(2024, 10, 2));
    }

    #[test]
    fn test_weeks_before_anchor() {
        let r = resolver();
        assert_eq!(r.resolve(7, Weekday::Monday).unwrap(), date(2024, 9, 16));
        assert_eq!(r.resolve(1, Weekday::Friday).unwrap(), date(2024, 8, 9));
    }

    #[test]
    fn test_every_weekday_keeps_its_name() {
        let r = resolver();
        for (i, day) in Weekday::iter().enumerate() {
            let d = r.resolve(20, day).unwrap();
            assert_eq!(d.weekday().num_days_from_monday() as usize, i);
        }
    }

    #[test]
    fn test_non_monday_anchor_is_rewound() {
        // Thursday of the same week gives the same results as the Monday.
        let r = DateResolver::new(TermAnchor::new(8, date(2024, 9, 26)).unwrap());
        assert_eq!(r.resolve(8, Weekday::Monday).unwrap(), date(2024, 9, 23));
        assert_eq!(r.resolve(9, Weekday::Wednesday).unwrap(), date(2024, 10, 2));
    }

    #[test]
    fn test_out_of_range_week() {
        let r = resolver();
        assert!(matches!(
            r.resolve(u32::MAX, Weekday::Friday),
            Err(ConvertError::Resolution(_))
        ));
    }
}
