use chrono::NaiveDate;
use std::sync::Arc;

use crate::{
    error::{AccrualError, RepositoryError},
    models::{
        accrual::AccrualBreakdown,
        employee::{Employee, StoredEmployee},
    },
    repositories::EmployeeRepository,
    services::accrual::LeaveAccrualCalculator,
    types::EmployeeId,
    utils::time::parse_iso_date,
};

/// A stored element whose total could not be recomputed.
///
/// `position` is the element's index in the store. Id and name are missing
/// when the element itself could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFailure {
    pub position: usize,
    pub employee_id: Option<EmployeeId>,
    pub name: Option<String>,
    pub error: AccrualError,
}

/// Outcome of a bulk recalculation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecalculationReport {
    pub as_of: NaiveDate,
    pub updated: usize,
    pub unchanged: usize,
    pub failures: Vec<RecordFailure>,
}

impl RecalculationReport {
    fn new(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            updated: 0,
            unchanged: 0,
            failures: Vec::new(),
        }
    }

    pub fn processed(&self) -> usize {
        self.updated + self.unchanged + self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Clone)]
pub struct LeaveService {
    repo: Arc<dyn EmployeeRepository>,
    calculator: LeaveAccrualCalculator,
}

impl LeaveService {
    pub fn new(repo: Arc<dyn EmployeeRepository>, calculator: LeaveAccrualCalculator) -> Self {
        Self { repo, calculator }
    }

    pub fn breakdown_for(
        &self,
        employee: &Employee,
        as_of: NaiveDate,
    ) -> Result<AccrualBreakdown, AccrualError> {
        let join = parse_iso_date("join_date", &employee.join_date)?;
        let cutoff = employee.accrual_cutoff(as_of)?;
        self.calculator.breakdown(join, cutoff)
    }

    pub fn recalculate_one(
        &self,
        employee: &Employee,
        as_of: NaiveDate,
    ) -> Result<u32, AccrualError> {
        self.breakdown_for(employee, as_of)
            .map(|breakdown| breakdown.total())
    }

    /// Recomputes `total_leave` for every stored employee and saves the batch.
    ///
    /// A record that cannot be read, or whose dates cannot be used, keeps its
    /// stored content and is listed in the report; the rest of the batch is
    /// still written.
    pub async fn recalculate_all(
        &self,
        as_of: NaiveDate,
    ) -> Result<RecalculationReport, RepositoryError> {
        let calendar = self.calculator.calendar();
        if !calendar.covers(as_of) {
            tracing::warn!(
                %as_of,
                calendar_version = calendar.version(),
                "holiday calendar does not cover the accrual date; bonus days may be missing"
            );
        }

        let mut records = self.repo.find_all().await?;
        let mut report = RecalculationReport::new(as_of);

        for (position, record) in records.iter_mut().enumerate() {
            let error = match record {
                StoredEmployee::Parsed(employee) => match self.recalculate_one(employee, as_of) {
                    Ok(total) if employee.total_leave == Some(total) => {
                        report.unchanged += 1;
                        continue;
                    }
                    Ok(total) => {
                        tracing::debug!(
                            employee_id = %employee.id,
                            previous = ?employee.total_leave,
                            total,
                            "updated accrued leave"
                        );
                        employee.total_leave = Some(total);
                        report.updated += 1;
                        continue;
                    }
                    Err(error) => error,
                },
                StoredEmployee::Unreadable { reason, .. } => AccrualError::UnreadableRecord {
                    reason: reason.clone(),
                },
            };

            let failure = RecordFailure {
                position,
                employee_id: record.employee_id(),
                name: record.name().map(str::to_owned),
                error,
            };
            tracing::warn!(
                position,
                employee_id = ?failure.employee_id,
                name = ?failure.name,
                code = failure.error.code(),
                error = %failure.error,
                "skipping leave recalculation for employee"
            );
            report.failures.push(failure);
        }

        if report.updated > 0 {
            self.repo.save_all(&records).await?;
        }

        tracing::info!(
            %as_of,
            updated = report.updated,
            unchanged = report.unchanged,
            failed = report.failures.len(),
            "leave recalculation finished"
        );
        Ok(report)
    }
}
