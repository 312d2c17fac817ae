//! Resolves a start date, end date and day count into a consistent date pair.
//!
//! Rules are tried in order and exactly one applies:
//! 1. both dates given: taken verbatim, duration ignored;
//! 2. start date and a positive duration: end date derived;
//! 3. end date and a positive duration: start date derived;
//! 4. anything else: the reunion is left untouched.
//!
//! Ordering and presence are not checked here; `Reunion::validate` does that.

use chrono::{Days, NaiveDate};

use crate::model::Reunion;

/// Date input as supplied by a caller. `duration` is an inclusive day count;
/// zero or negative means "not given".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateHint {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub duration: i64,
}

impl DateHint {
    pub fn new(start_date: Option<NaiveDate>, end_date: Option<NaiveDate>, duration: i64) -> Self {
        Self {
            start_date,
            end_date,
            duration,
        }
    }
}

/// Which rule produced the dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateResolution {
    Explicit,
    FromStart,
    FromEnd,
    Insufficient,
}

/// Writes the resolved dates onto `reunion`. Never fails; `Insufficient`
/// means nothing was changed.
pub fn calculate_from(reunion: &mut Reunion, hint: &DateHint) -> DateResolution {
    // Days spanned beyond the first one; None when no usable duration.
    let extra_days = u64::try_from(hint.duration)
        .ok()
        .filter(|d| *d > 0)
        .map(|d| Days::new(d - 1));

    match (hint.start_date, hint.end_date, extra_days) {
        (Some(start), Some(end), _) => {
            reunion.start_date = Some(start);
            reunion.end_date = Some(end);
            DateResolution::Explicit
        }
        (Some(start), None, Some(extra)) => match start.checked_add_days(extra) {
            Some(end) => {
                reunion.start_date = Some(start);
                reunion.end_date = Some(end);
                DateResolution::FromStart
            }
            None => DateResolution::Insufficient,
        },
        (None, Some(end), Some(extra)) => match end.checked_sub_days(extra) {
            Some(start) => {
                reunion.start_date = Some(start);
                reunion.end_date = Some(end);
                DateResolution::FromEnd
            }
            None => DateResolution::Insufficient,
        },
        _ => DateResolution::Insufficient,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn may_first() -> NaiveDate {
        date(2019, 5, 1)
    }

    fn may_tenth() -> NaiveDate {
        date(2019, 5, 10)
    }

    #[test]
    fn both_dates_win_over_duration() {
        let mut r = Reunion::create();
        let res = calculate_from(&mut r, &DateHint::new(Some(may_first()), Some(may_tenth()), 3));
        assert_eq!(res, DateResolution::Explicit);
        assert_eq!(r.start_date, Some(may_first()));
        assert_eq!(r.end_date, Some(may_tenth()));
    }

    #[test]
    fn both_dates_without_duration() {
        let mut r = Reunion::create();
        calculate_from(&mut r, &DateHint::new(Some(may_first()), Some(may_tenth()), 0));
        assert_eq!(r.start_date, Some(may_first()));
        assert_eq!(r.end_date, Some(may_tenth()));
        assert_eq!(r.duration(), Some(10));
    }

    #[test]
    fn start_and_duration_derive_end() {
        let mut r = Reunion::create();
        let res = calculate_from(&mut r, &DateHint::new(Some(may_first()), None, 10));
        assert_eq!(res, DateResolution::FromStart);
        assert_eq!(r.start_date, Some(may_first()));
        assert_eq!(r.end_date, Some(may_tenth()));
    }

    #[test]
    fn single_day_from_start() {
        let mut r = Reunion::create();
        calculate_from(&mut r, &DateHint::new(Some(may_first()), None, 1));
        assert_eq!(r.end_date, Some(may_first()));
    }

    #[test]
    fn end_and_duration_derive_start() {
        let mut r = Reunion::create();
        let res = calculate_from(&mut r, &DateHint::new(None, Some(may_tenth()), 10));
        assert_eq!(res, DateResolution::FromEnd);
        assert_eq!(r.start_date, Some(may_first()));
        assert_eq!(r.end_date, Some(may_tenth()));
    }

    #[test]
    fn single_day_from_end() {
        let mut r = Reunion::create();
        calculate_from(&mut r, &DateHint::new(None, Some(may_tenth()), 1));
        assert_eq!(r.start_date, Some(may_tenth()));
    }

    #[test]
    fn derivation_crosses_month_boundaries() {
        let mut r = Reunion::create();
        calculate_from(&mut r, &DateHint::new(Some(date(2019, 11, 28)), None, 5));
        assert_eq!(r.end_date, Some(date(2019, 12, 2)));
    }

    #[test]
    fn insufficient_input_changes_nothing() {
        let mut r = Reunion::create();
        r.start_date = Some(may_first());
        r.end_date = Some(may_tenth());
        let before = r.clone();

        for hint in [
            DateHint::default(),
            DateHint::new(None, None, 4),
            DateHint::new(Some(date(2020, 1, 1)), None, 0),
            DateHint::new(None, Some(date(2020, 1, 1)), -2),
        ] {
            assert_eq!(calculate_from(&mut r, &hint), DateResolution::Insufficient);
            assert_eq!(r, before);
        }
    }

    #[test]
    fn out_of_range_duration_is_a_no_op() {
        let mut r = Reunion::create();
        let res = calculate_from(&mut r, &DateHint::new(Some(may_first()), None, i64::MAX));
        assert_eq!(res, DateResolution::Insufficient);
        assert_eq!(r.end_date, None);
    }
}
