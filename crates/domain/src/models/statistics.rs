//! Reporting periods and statistics summary model.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

/// Lower bounds for the time-windowed request counts.
///
/// All bounds are inclusive calendar dates; the all-time count uses no bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportingPeriods {
    pub today: NaiveDate,
    /// Monday of the current ISO week.
    pub week_start: NaiveDate,
    pub month_start: NaiveDate,
    pub year_start: NaiveDate,
}

impl ReportingPeriods {
    /// Computes the window starts for the given reference date.
    pub fn for_date(today: NaiveDate) -> Self {
        let week_start = today - Duration::days(today.weekday().num_days_from_monday() as i64);
        let month_start = today.with_day(1).unwrap_or(today);
        let year_start = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
        Self {
            today,
            week_start,
            month_start,
            year_start,
        }
    }
}

/// The fixed set of request counts served by the statistics endpoint.
///
/// Each field is an independent scalar count, not a cross-tab: the product
/// filters are applied per window as separate queries.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct StatisticsSummary {
    pub daily_count: i64,
    pub weekly_count: i64,
    pub monthly_count: i64,
    pub yearly_count: i64,
    pub total_count: i64,
    pub total_lading_count: i64,
    pub total_vask_lading_count: i64,
    pub daily_lading_count: i64,
    pub weekly_lading_count: i64,
    pub monthly_lading_count: i64,
    pub yearly_lading_count: i64,
    pub daily_vask_lading_count: i64,
    pub weekly_vask_lading_count: i64,
    pub monthly_vask_lading_count: i64,
    pub yearly_vask_lading_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periods_for_midweek_date() {
        // Thursday 14 March 2024
        let periods = ReportingPeriods::for_date(NaiveDate::from_ymd_opt(2024, 3, 14).unwrap());
        assert_eq!(periods.week_start, NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
        assert_eq!(periods.month_start, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(periods.year_start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn test_periods_on_a_monday() {
        let monday = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        let periods = ReportingPeriods::for_date(monday);
        assert_eq!(periods.week_start, monday);
    }

    #[test]
    fn test_periods_widen_monotonically() {
        let periods = ReportingPeriods::for_date(NaiveDate::from_ymd_opt(2024, 3, 14).unwrap());
        assert!(periods.year_start <= periods.month_start);
        assert!(periods.month_start <= periods.week_start);
        assert!(periods.week_start <= periods.today);
    }

    #[test]
    fn test_week_spanning_month_boundary() {
        // Friday 1 March 2024: the ISO week started in February
        let periods = ReportingPeriods::for_date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(periods.week_start, NaiveDate::from_ymd_opt(2024, 2, 26).unwrap());
        assert_eq!(periods.month_start, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }
}
