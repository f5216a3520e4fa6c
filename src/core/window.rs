//! Two business-day window used for every rate request.
//!
//! The provider publishes no rate for Sunday and Monday; the rate set on Friday is
//! registered for Saturday. Those two days are mapped back onto Saturday. Public holidays
//! are not modeled, so a window touching one may yield fewer samples than expected.

use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Date format expected by the provider in request parameters.
pub const REQUEST_DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateWindow {
    /// Window ending on the last business day at or before `today`.
    pub fn ending_on(today: NaiveDate) -> Self {
        let to = last_business_day(today);
        let from = last_business_day(to - Duration::days(1));
        DateWindow { from, to }
    }

    /// Window ending on the current local date.
    pub fn current() -> Self {
        Self::ending_on(Local::now().date_naive())
    }

    pub fn from_param(&self) -> String {
        self.from.format(REQUEST_DATE_FORMAT).to_string()
    }

    pub fn to_param(&self) -> String {
        self.to.format(REQUEST_DATE_FORMAT).to_string()
    }
}

/// Shifts Sunday back by one day and Monday back by two days.
pub fn last_business_day(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sun => date - Duration::days(1),
        Weekday::Mon => date - Duration::days(2),
        _ => date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_last_business_day() {
        // 2024-06-09 is a Sunday, 2024-06-10 a Monday
        assert_eq!(last_business_day(date(2024, 6, 9)), date(2024, 6, 8));
        assert_eq!(last_business_day(date(2024, 6, 10)), date(2024, 6, 8));
        assert_eq!(last_business_day(date(2024, 6, 11)), date(2024, 6, 11));
        assert_eq!(last_business_day(date(2024, 6, 8)), date(2024, 6, 8));
    }

    #[test]
    fn test_window_on_weekday() {
        let window = DateWindow::ending_on(date(2024, 6, 13)); // Thursday
        assert_eq!(window.from, date(2024, 6, 12));
        assert_eq!(window.to, date(2024, 6, 13));
    }

    #[test]
    fn test_window_on_tuesday_skips_back_to_saturday() {
        let window = DateWindow::ending_on(date(2024, 6, 11));
        assert_eq!(window.to, date(2024, 6, 11));
        assert_eq!(window.from, date(2024, 6, 8));
    }

    #[test]
    fn test_window_on_sunday_and_monday() {
        for today in [date(2024, 6, 9), date(2024, 6, 10)] {
            let window = DateWindow::ending_on(today);
            assert_eq!(window.to, date(2024, 6, 8));
            assert_eq!(window.from, date(2024, 6, 7));
        }
    }

    #[test]
    fn test_window_invariants_hold_for_every_day() {
        let mut today = date(2023, 1, 1);
        while today <= date(2025, 12, 31) {
            let window = DateWindow::ending_on(today);
            assert!(
                !matches!(window.to.weekday(), Weekday::Sun | Weekday::Mon),
                "{today}: to = {}",
                window.to
            );
            assert!(!matches!(window.from.weekday(), Weekday::Sun | Weekday::Mon));
            let gap = (window.to - window.from).num_days();
            assert!((1..=3).contains(&gap), "{today}: gap = {gap}");
            assert!(window.to <= today);
            today += Duration::days(1);
        }
    }

    #[test]
    fn test_request_params_format() {
        let window = DateWindow::ending_on(date(2024, 3, 5));
        assert_eq!(window.from_param(), "02/03/2024");
        assert_eq!(window.to_param(), "05/03/2024");
    }
}
