use anyhow::{anyhow, Context};
use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::{env, path::PathBuf};

use crate::utils::time::{parse_iso_date, today_local};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub employees_path: PathBuf,
    pub holiday_calendar_path: PathBuf,
    pub time_zone: Tz,
    /// Fixed accrual date for a run; "today" in `time_zone` when unset.
    pub accrual_as_of: Option<NaiveDate>,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let employees_path = env::var("EMPLOYEES_PATH")
            .unwrap_or_else(|_| "./data/employees.json".to_string())
            .into();

        let holiday_calendar_path = env::var("HOLIDAY_CALENDAR_PATH")
            .unwrap_or_else(|_| "./config/holidays.toml".to_string())
            .into();

        let time_zone_name = env::var("APP_TIMEZONE").unwrap_or_else(|_| "Asia/Seoul".to_string());
        let time_zone: Tz = time_zone_name
            .parse()
            .map_err(|_| anyhow!("Invalid APP_TIMEZONE value: {}", time_zone_name))?;

        let accrual_as_of = match env::var("ACCRUAL_AS_OF") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                parse_iso_date("ACCRUAL_AS_OF", &raw).context("Invalid ACCRUAL_AS_OF value")?,
            ),
            _ => None,
        };

        Ok(Config {
            employees_path,
            holiday_calendar_path,
            time_zone,
            accrual_as_of,
        })
    }

    /// The date accrual is computed through for this run.
    pub fn as_of_date(&self) -> NaiveDate {
        self.accrual_as_of
            .unwrap_or_else(|| today_local(&self.time_zone))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_of_date_prefers_configured_date() {
        let config = Config {
            employees_path: "employees.json".into(),
            holiday_calendar_path: "holidays.toml".into(),
            time_zone: chrono_tz::Asia::Seoul,
            accrual_as_of: NaiveDate::from_ymd_opt(2025, 3, 31),
        };
        assert_eq!(
            config.as_of_date(),
            NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()
        );
    }

    #[test]
    fn as_of_date_falls_back_to_local_today() {
        let config = Config {
            employees_path: "employees.json".into(),
            holiday_calendar_path: "holidays.toml".into(),
            time_zone: chrono_tz::UTC,
            accrual_as_of: None,
        };
        let before = chrono::Utc::now().date_naive();
        let as_of = config.as_of_date();
        let after = chrono::Utc::now().date_naive();
        assert!(as_of == before || as_of == after);
    }
}
