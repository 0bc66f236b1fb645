//! Anniversary-based leave accrual.
//!
//! The accrued total is a cumulative, ever-granted figure made of three
//! independent parts: first-year monthly leave, yearly leave with a
//! seniority bonus, and bonus days for holidays inside the accrual window.

use chrono::{Datelike, NaiveDate};
use std::sync::Arc;

use crate::{
    error::AccrualError,
    models::{
        accrual::{
            AccrualBreakdown, Tenure, ANNUAL_LEAVE_CAP, BASE_ANNUAL_LEAVE, FIRST_YEAR_CAP,
            SENIORITY_STEP_YEARS,
        },
        holiday::HolidayCalendar,
    },
    utils::time::parse_iso_date,
};

/// Completed years and months from `join` to `cutoff`.
///
/// A month only counts once the day-of-month has been reached again, and a
/// year only once the anniversary month and day have. Callers must pass
/// `join <= cutoff`; an inverted pair yields a zero tenure.
pub fn tenure_between(join: NaiveDate, cutoff: NaiveDate) -> Tenure {
    let mut years = cutoff.year() - join.year();
    let mut months = cutoff.month() as i32 - join.month() as i32;

    if cutoff.day() < join.day() {
        months -= 1;
    }
    if months < 0 {
        years -= 1;
        months += 12;
    }

    if years < 0 {
        return Tenure::default();
    }

    Tenure {
        years: years as u32,
        months: months as u32,
    }
}

pub fn first_year_leave(tenure: Tenure) -> u32 {
    if tenure.years >= 1 {
        FIRST_YEAR_CAP
    } else {
        tenure.months.min(FIRST_YEAR_CAP)
    }
}

/// Days granted on the `year_index`-th anniversary (1-based).
pub fn annual_grant(year_index: u32) -> u32 {
    if year_index == 0 {
        return 0;
    }
    let seniority = (year_index - 1) / SENIORITY_STEP_YEARS;
    BASE_ANNUAL_LEAVE
        .saturating_add(seniority)
        .min(ANNUAL_LEAVE_CAP)
}

/// Cumulative days granted across every completed anniversary.
pub fn yearly_leave(completed_years: u32) -> u32 {
    (1..=completed_years).map(annual_grant).sum()
}

#[derive(Debug, Clone)]
pub struct LeaveAccrualCalculator {
    calendar: Arc<HolidayCalendar>,
}

impl LeaveAccrualCalculator {
    pub fn new(calendar: HolidayCalendar) -> Self {
        Self::with_shared(Arc::new(calendar))
    }

    pub fn with_shared(calendar: Arc<HolidayCalendar>) -> Self {
        Self { calendar }
    }

    pub fn calendar(&self) -> &HolidayCalendar {
        &self.calendar
    }

    /// Total accrued leave for ISO `YYYY-MM-DD` inputs.
    ///
    /// `today` stands in for a missing `cutoff_date`, so the result never
    /// depends on the wall clock.
    pub fn calculate_total_leave(
        &self,
        join_date: &str,
        cutoff_date: Option<&str>,
        today: NaiveDate,
    ) -> Result<u32, AccrualError> {
        self.breakdown_for(join_date, cutoff_date, today)
            .map(|breakdown| breakdown.total())
    }

    pub fn breakdown_for(
        &self,
        join_date: &str,
        cutoff_date: Option<&str>,
        today: NaiveDate,
    ) -> Result<AccrualBreakdown, AccrualError> {
        let join = parse_iso_date("join_date", join_date)?;
        let cutoff = match cutoff_date {
            Some(value) => parse_iso_date("cutoff_date", value)?,
            None => today,
        };
        self.breakdown(join, cutoff)
    }

    pub fn breakdown(
        &self,
        join: NaiveDate,
        cutoff: NaiveDate,
    ) -> Result<AccrualBreakdown, AccrualError> {
        if cutoff < join {
            return Err(AccrualError::InvertedRange {
                join_date: join,
                cutoff_date: cutoff,
            });
        }

        let tenure = tenure_between(join, cutoff);
        Ok(AccrualBreakdown {
            tenure,
            first_year: first_year_leave(tenure),
            yearly: yearly_leave(tenure.years),
            holiday_bonus: self.calendar.bonus_days_between(join, cutoff),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tenure(years: u32, months: u32) -> Tenure {
        Tenure { years, months }
    }

    #[test]
    fn tenure_between_same_day_is_zero() {
        assert_eq!(tenure_between(date(2024, 5, 10), date(2024, 5, 10)), tenure(0, 0));
    }

    #[test]
    fn tenure_between_borrows_month_before_day_is_reached() {
        assert_eq!(tenure_between(date(2024, 1, 15), date(2024, 12, 14)), tenure(0, 10));
        assert_eq!(tenure_between(date(2024, 1, 15), date(2024, 12, 15)), tenure(0, 11));
    }

    #[test]
    fn tenure_between_borrows_year_before_anniversary() {
        assert_eq!(tenure_between(date(2024, 1, 15), date(2025, 1, 14)), tenure(0, 11));
        assert_eq!(tenure_between(date(2024, 1, 15), date(2025, 1, 15)), tenure(1, 0));
        assert_eq!(tenure_between(date(2020, 6, 30), date(2023, 3, 1)), tenure(2, 8));
    }

    #[test]
    fn tenure_between_month_end_join_waits_for_day() {
        assert_eq!(tenure_between(date(2024, 1, 31), date(2024, 2, 29)), tenure(0, 0));
        assert_eq!(tenure_between(date(2024, 1, 31), date(2024, 3, 31)), tenure(0, 2));
    }

    #[test]
    fn tenure_between_leap_day_join() {
        assert_eq!(tenure_between(date(2024, 2, 29), date(2025, 2, 28)), tenure(0, 11));
        assert_eq!(tenure_between(date(2024, 2, 29), date(2025, 3, 1)), tenure(1, 0));
    }

    #[test]
    fn tenure_between_inverted_is_zero() {
        assert_eq!(tenure_between(date(2025, 1, 1), date(2024, 1, 1)), tenure(0, 0));
    }

    #[test]
    fn first_year_leave_counts_completed_months() {
        assert_eq!(first_year_leave(tenure(0, 0)), 0);
        assert_eq!(first_year_leave(tenure(0, 7)), 7);
        assert_eq!(first_year_leave(tenure(0, 11)), 11);
    }

    #[test]
    fn first_year_leave_locks_in_after_anniversary() {
        assert_eq!(first_year_leave(tenure(1, 0)), 11);
        assert_eq!(first_year_leave(tenure(7, 3)), 11);
    }

    #[test]
    fn annual_grant_adds_a_day_every_two_years() {
        let grants: Vec<u32> = (1..=6).map(annual_grant).collect();
        assert_eq!(grants, vec![15, 15, 16, 16, 17, 17]);
    }

    #[test]
    fn annual_grant_saturates_at_cap() {
        assert_eq!(annual_grant(21), 25);
        assert_eq!(annual_grant(25), 25);
        assert_eq!(annual_grant(100), 25);
        assert!((1..=200).all(|i| annual_grant(i) <= ANNUAL_LEAVE_CAP));
    }

    #[test]
    fn annual_grant_for_year_zero_is_zero() {
        assert_eq!(annual_grant(0), 0);
    }

    #[test]
    fn yearly_leave_is_cumulative() {
        assert_eq!(yearly_leave(0), 0);
        assert_eq!(yearly_leave(1), 15);
        assert_eq!(yearly_leave(3), 46);
    }

    #[test]
    fn breakdown_rejects_inverted_range() {
        let calculator = LeaveAccrualCalculator::new(HolidayCalendar::empty());
        let err = calculator
            .breakdown(date(2024, 3, 1), date(2024, 2, 29))
            .unwrap_err();
        assert_eq!(
            err,
            AccrualError::InvertedRange {
                join_date: date(2024, 3, 1),
                cutoff_date: date(2024, 2, 29),
            }
        );
    }

    #[test]
    fn breakdown_includes_holiday_bonus() {
        let calendar = HolidayCalendar::new(
            "test",
            [Weekday::Tue, Weekday::Wed],
            [date(2025, 3, 1)],
            [date(2025, 1, 28), date(2025, 1, 30)],
        )
        .unwrap();
        let calculator = LeaveAccrualCalculator::new(calendar);

        let breakdown = calculator
            .breakdown(date(2025, 1, 2), date(2025, 3, 2))
            .unwrap();
        assert_eq!(breakdown.tenure, tenure(0, 2));
        assert_eq!(breakdown.first_year, 2);
        assert_eq!(breakdown.yearly, 0);
        assert_eq!(breakdown.holiday_bonus, 2);
        assert_eq!(breakdown.total(), 4);
    }

    #[test]
    fn calculate_total_leave_defaults_cutoff_to_today() {
        let calculator = LeaveAccrualCalculator::new(HolidayCalendar::empty());
        let today = date(2023, 1, 1);

        let implicit = calculator
            .calculate_total_leave("2020-01-01", None, today)
            .unwrap();
        let explicit = calculator
            .calculate_total_leave("2020-01-01", Some("2023-01-01"), date(1999, 1, 1))
            .unwrap();

        assert_eq!(implicit, 57);
        assert_eq!(implicit, explicit);
    }

    #[test]
    fn calculate_total_leave_reports_which_input_is_malformed() {
        let calculator = LeaveAccrualCalculator::new(HolidayCalendar::empty());
        let today = date(2025, 1, 1);

        let err = calculator
            .calculate_total_leave("2024/01/01", None, today)
            .unwrap_err();
        assert!(matches!(err, AccrualError::InvalidDate { field: "join_date", .. }));

        let err = calculator
            .calculate_total_leave("2024-01-01", Some("2024-13-01"), today)
            .unwrap_err();
        assert!(matches!(err, AccrualError::InvalidDate { field: "cutoff_date", .. }));
    }
}
