//! Calendar range utilities.
//!
//! This module contains the date arithmetic shared by the analytics and
//! planner views: timeframe ranges, month grids, and duration formatting.

use chrono::{Datelike, Duration, NaiveDate};

/// Defines the selectable analytics timeframes.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Timeframe {
    Week,
    Month,
    Year,
}

impl Timeframe {
    /// Cycle to the next timeframe.
    ///
    pub fn next(&self) -> Timeframe {
        match self {
            Timeframe::Week => Timeframe::Month,
            Timeframe::Month => Timeframe::Year,
            Timeframe::Year => Timeframe::Week,
        }
    }

    /// Return the display label for this timeframe.
    ///
    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::Week => "week",
            Timeframe::Month => "month",
            Timeframe::Year => "year",
        }
    }
}

/// Return the inclusive calendar range covering the given timeframe around
/// the given day. Weeks start on Monday.
///
pub fn date_range(timeframe: Timeframe, today: NaiveDate) -> (NaiveDate, NaiveDate) {
    match timeframe {
        Timeframe::Week => {
            let start = today - Duration::days(today.weekday().num_days_from_monday() as i64);
            (start, start + Duration::days(6))
        }
        Timeframe::Month => {
            let start = today
                .with_day(1)
                .expect("first day of month is always valid");
            let next_month = if today.month() == 12 {
                NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)
            } else {
                NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)
            }
            .expect("first day of month is always valid");
            (start, next_month - Duration::days(1))
        }
        Timeframe::Year => {
            let start = NaiveDate::from_ymd_opt(today.year(), 1, 1)
                .expect("January 1st is always valid");
            let end = NaiveDate::from_ymd_opt(today.year(), 12, 31)
                .expect("December 31st is always valid");
            (start, end)
        }
    }
}

/// Return every day of the month containing the given day, in order.
///
pub fn days_of_month(today: NaiveDate) -> Vec<NaiveDate> {
    let (start, end) = date_range(Timeframe::Month, today);
    let mut days = vec![];
    let mut day = start;
    while day <= end {
        days.push(day);
        day += Duration::days(1);
    }
    days
}

/// Format a minute count as a compact duration: "45m", "2h", "2h 30m".
///
pub fn format_duration(minutes: u64) -> String {
    if minutes < 60 {
        return format!("{}m", minutes);
    }
    let hours = minutes / 60;
    let mins = minutes % 60;
    if mins > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}h", hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_range_starts_monday() {
        // 2024-06-15 is a Saturday.
        let (start, end) = date_range(Timeframe::Week, date(2024, 6, 15));
        assert_eq!(start, date(2024, 6, 10));
        assert_eq!(end, date(2024, 6, 16));
    }

    #[test]
    fn week_range_on_monday_is_identity_start() {
        let (start, _) = date_range(Timeframe::Week, date(2024, 6, 10));
        assert_eq!(start, date(2024, 6, 10));
    }

    #[test]
    fn month_range_covers_whole_month() {
        let (start, end) = date_range(Timeframe::Month, date(2024, 2, 15));
        assert_eq!(start, date(2024, 2, 1));
        // 2024 is a leap year.
        assert_eq!(end, date(2024, 2, 29));
    }

    #[test]
    fn month_range_handles_december() {
        let (start, end) = date_range(Timeframe::Month, date(2023, 12, 5));
        assert_eq!(start, date(2023, 12, 1));
        assert_eq!(end, date(2023, 12, 31));
    }

    #[test]
    fn year_range_covers_whole_year() {
        let (start, end) = date_range(Timeframe::Year, date(2024, 6, 15));
        assert_eq!(start, date(2024, 1, 1));
        assert_eq!(end, date(2024, 12, 31));
    }

    #[test]
    fn days_of_month_has_correct_length() {
        assert_eq!(days_of_month(date(2024, 2, 10)).len(), 29);
        assert_eq!(days_of_month(date(2024, 6, 1)).len(), 30);
        assert_eq!(days_of_month(date(2024, 7, 31)).len(), 31);
    }

    #[test]
    fn timeframe_cycles() {
        assert_eq!(Timeframe::Week.next(), Timeframe::Month);
        assert_eq!(Timeframe::Month.next(), Timeframe::Year);
        assert_eq!(Timeframe::Year.next(), Timeframe::Week);
    }

    #[test]
    fn format_duration_examples() {
        assert_eq!(format_duration(45), "45m");
        assert_eq!(format_duration(60), "1h");
        assert_eq!(format_duration(150), "2h 30m");
        assert_eq!(format_duration(0), "0m");
    }
}
