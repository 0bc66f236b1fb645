use chrono::{Datelike, NaiveDate};

use crate::models::holiday::HolidayCalendar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HolidayDecision {
    pub grants_bonus: bool,
    pub reason: HolidayReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HolidayReason {
    NormalHoliday,
    MajorHolidayOnRestDay,
    MajorHolidayOffRestDay,
    None,
}

impl HolidayReason {
    pub fn label(&self) -> &'static str {
        match self {
            HolidayReason::NormalHoliday => "normal holiday",
            HolidayReason::MajorHolidayOnRestDay => "major holiday on rest day",
            HolidayReason::MajorHolidayOffRestDay => "major holiday",
            HolidayReason::None => "working day",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayCalendarEntry {
    pub date: NaiveDate,
    pub grants_bonus: bool,
    pub reason: HolidayReason,
}

impl HolidayCalendar {
    pub fn decision_for(&self, date: NaiveDate) -> HolidayDecision {
        if self.normal.contains(&date) {
            return HolidayDecision {
                grants_bonus: true,
                reason: HolidayReason::NormalHoliday,
            };
        }

        if self.major.contains(&date) {
            return if self.is_rest_day(date.weekday()) {
                HolidayDecision {
                    grants_bonus: true,
                    reason: HolidayReason::MajorHolidayOnRestDay,
                }
            } else {
                HolidayDecision {
                    grants_bonus: false,
                    reason: HolidayReason::MajorHolidayOffRestDay,
                }
            };
        }

        HolidayDecision {
            grants_bonus: false,
            reason: HolidayReason::None,
        }
    }

    /// Holidays listed in the inclusive window `[start, end]`, ordered by date.
    pub fn entries_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<HolidayCalendarEntry> {
        if start > end {
            return Vec::new();
        }

        let mut entries: Vec<HolidayCalendarEntry> = self
            .normal
            .range(start..=end)
            .chain(self.major.range(start..=end))
            .map(|&date| {
                let decision = self.decision_for(date);
                HolidayCalendarEntry {
                    date,
                    grants_bonus: decision.grants_bonus,
                    reason: decision.reason,
                }
            })
            .collect();
        entries.sort_by_key(|entry| entry.date);
        entries
    }

    /// Bonus leave days earned by holidays in the inclusive window `[start, end]`.
    pub fn bonus_days_between(&self, start: NaiveDate, end: NaiveDate) -> u32 {
        if start > end {
            return 0;
        }

        let normal = self.normal.range(start..=end).count();
        let major = self
            .major
            .range(start..=end)
            .filter(|date| self.is_rest_day(date.weekday()))
            .count();

        u32::try_from(normal + major).unwrap_or(u32::MAX)
    }
}
