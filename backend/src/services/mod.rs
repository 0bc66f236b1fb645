pub mod accrual;
pub mod holiday;
pub mod leave;
