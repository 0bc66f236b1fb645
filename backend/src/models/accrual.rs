use serde::{Deserialize, Serialize};

/// First-year leave stops at 11 days; the 12th month is the first anniversary.
pub const FIRST_YEAR_CAP: u32 = 11;
pub const BASE_ANNUAL_LEAVE: u32 = 15;
pub const ANNUAL_LEAVE_CAP: u32 = 25;
/// One extra annual day per this many years of service past the first.
pub const SENIORITY_STEP_YEARS: u32 = 2;

/// Fully completed years and months of service, counted by anniversary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenure {
    pub years: u32,
    pub months: u32,
}

/// The three independently computed parts of an accrued leave total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccrualBreakdown {
    pub tenure: Tenure,
    pub first_year: u32,
    pub yearly: u32,
    pub holiday_bonus: u32,
}

impl AccrualBreakdown {
    pub fn total(&self) -> u32 {
        self.first_year + self.yearly + self.holiday_bonus
    }
}
