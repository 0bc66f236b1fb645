//! Data models shared by the accrual calculator and the employee store.

pub mod accrual;
pub mod employee;
pub mod holiday;
