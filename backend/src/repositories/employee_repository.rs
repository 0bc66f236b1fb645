//! Employee repository trait for dependency injection and testing.
//!
//! This module defines the EmployeeRepository trait which can be mocked
//! using mockall for testing purposes.

use async_trait::async_trait;

use crate::error::RepositoryError;
use crate::models::employee::StoredEmployee;

/// Storage for employee records.
///
/// Use `MockEmployeeRepository` in tests to mock the behavior.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Load every stored element, in store order.
    ///
    /// An element that is not a valid employee comes back as
    /// `StoredEmployee::Unreadable` instead of failing the load.
    async fn find_all(&self) -> Result<Vec<StoredEmployee>, RepositoryError>;

    /// Replace the stored employees with `records` in one write.
    async fn save_all(&self, records: &[StoredEmployee]) -> Result<(), RepositoryError>;
}
