#![allow(dead_code)]
use chrono::NaiveDate;
use leave_accrual_backend::{
    models::holiday::HolidayCalendar, services::accrual::LeaveAccrualCalculator,
};
use std::{
    path::PathBuf,
    sync::{Mutex, OnceLock},
};

static ENV_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

pub fn env_guard() -> std::sync::MutexGuard<'static, ()> {
    ENV_MUTEX
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

pub fn shipped_calendar_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("config")
        .join("holidays.toml")
}

pub fn shipped_calendar() -> HolidayCalendar {
    HolidayCalendar::from_file(shipped_calendar_path()).expect("load shipped holiday calendar")
}

pub fn shipped_calculator() -> LeaveAccrualCalculator {
    LeaveAccrualCalculator::new(shipped_calendar())
}
