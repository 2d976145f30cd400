// File: ./src/model/weeks.rs
// Expands week selectors such as "8-19" or "26, 29, 33-36" into a WeekSet.
use crate::error::{ConvertError, Result};
use crate::model::item::{MAX_WEEK, WeekSet};
use std::str::FromStr;

fn parse_week(raw: &str, selector: &str) -> Result<u32> {
    let raw = raw.trim();
    let week = raw.parse::<u32>().map_err(|_| {
        ConvertError::format(format!(
            "Invalid week '{}' in selector '{}'",
            raw, selector
        ))
    })?;
    // Checked before any range is expanded, so huge ranges fail without allocating.
    if week > MAX_WEEK {
        return Err(ConvertError::format(format!(
            "Week {} in selector '{}' is past week {}",
            week, selector, MAX_WEEK
        )));
    }
    Ok(week)
}

pub fn expand_weeks(selector: &str) -> Result<WeekSet> {
    let mut weeks = WeekSet::new();

    for token in selector.split(',') {
        let token = token.trim();
        if token.is_empty() {
            return Err(ConvertError::format(format!(
                "Empty entry in week selector '{}'",
                selector
            )));
        }

        match token.split_once('-') {
            Some((from, to)) => {
                let from = parse_week(from, selector)?;
                let to = parse_week(to, selector)?;
                if from > to {
                    return Err(ConvertError::format(format!(
                        "Reversed week range '{}' in selector '{}'",
                        token, selector
                    )));
                }
                for week in from..=to {
                    weeks.insert(week)?;
                }
            }
            None => {
                weeks.insert(parse_week(token, selector)?)?;
            }
        }
    }

    Ok(weeks)
}

impl FromStr for WeekSet {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        expand_weeks(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(selector: &str) -> Vec<u32> {
        expand_weeks(selector).unwrap().iter().collect()
    }

    #[test]
    fn test_single_range() {
        assert_eq!(collect("8-12"), vec![8, 9, 10, 11, 12]);
    }

    #[test]
    fn test_overlapping_tokens_collapse() {
        assert_eq!(collect("8-10,9"), vec![8, 9, 10]);
        assert_eq!(collect("1-3, 2-4"), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_list_with_whitespace() {
        assert_eq!(collect("26, 29, 33 ,36"), vec![26, 29, 33, 36]);
        assert_eq!(collect(" 8 - 9 "), vec![8, 9]);
    }

    #[test]
    fn test_degenerate_range() {
        assert_eq!(collect("5-5"), vec![5]);
    }

    #[test]
    fn test_rejects_garbage() {
        for bad in ["", "8,", "a-b", "8-", "-3", "1-2-3", "week 8", "8;9"] {
            assert!(
                matches!(expand_weeks(bad), Err(ConvertError::Format(_))),
                "'{}' should be a format error",
                bad
            );
        }
    }

    #[test]
    fn test_rejects_reversed_range_and_zero() {
        assert!(expand_weeks("10-8").is_err());
        assert!(expand_weeks("0").is_err());
        assert!(expand_weeks("0-2").is_err());
    }

    #[test]
    fn test_rejects_weeks_past_term_end() {
        for bad in ["1-4000000000", "54", "50-54", "4000000000"] {
            assert!(
                matches!(expand_weeks(bad), Err(ConvertError::Format(_))),
                "'{}' should be a format error",
                bad
            );
        }
        assert_eq!(collect("52-53"), vec![52, 53]);
    }

    #[test]
    fn test_from_str() {
        let weeks: WeekSet = "3,1".parse().unwrap();
        assert_eq!(weeks.to_string(), "1,3");
    }
}
