use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::{error::AccrualError, types::EmployeeId, utils::time::parse_iso_date};

/// Stored employee record as the groupware persists it.
///
/// Dates stay as the raw stored strings so that a bad date is reported
/// against its own record by the recalculation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub join_date: String,
    /// Operator adjustment on top of the accrued total; may be negative.
    #[serde(default)]
    pub manual_leave: i32,
    #[serde(default)]
    pub used_leave: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suspended_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_leave: Option<u32>,
}

impl Employee {
    pub fn new(name: impl Into<String>, join_date: impl Into<String>) -> Self {
        Self {
            id: EmployeeId::new(),
            name: name.into(),
            join_date: join_date.into(),
            manual_leave: 0,
            used_leave: 0,
            suspended_at: None,
            total_leave: None,
        }
    }

    /// Last day leave accrues through: `as_of`, or the suspension date if earlier.
    pub fn accrual_cutoff(&self, as_of: NaiveDate) -> Result<NaiveDate, AccrualError> {
        match self.suspended_at.as_deref() {
            Some(raw) => Ok(parse_iso_date("suspended_at", raw)?.min(as_of)),
            None => Ok(as_of),
        }
    }

    /// Running balance: accrued total plus manual adjustment minus days taken.
    pub fn remaining_leave(&self) -> Option<i64> {
        self.total_leave.map(|total| {
            i64::from(total) + i64::from(self.manual_leave) - i64::from(self.used_leave)
        })
    }
}

/// One element of the employee store.
///
/// Elements that do not match the `Employee` shape are carried as raw JSON
/// so they can be reported and written back untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredEmployee {
    Parsed(Employee),
    Unreadable { raw: Value, reason: String },
}

impl StoredEmployee {
    pub fn from_value(raw: Value) -> Self {
        match Employee::deserialize(&raw) {
            Ok(employee) => Self::Parsed(employee),
            Err(err) => Self::Unreadable {
                reason: err.to_string(),
                raw,
            },
        }
    }

    pub fn employee(&self) -> Option<&Employee> {
        match self {
            Self::Parsed(employee) => Some(employee),
            Self::Unreadable { .. } => None,
        }
    }

    /// Best-effort id of an unreadable element, when it still holds a valid one.
    pub fn employee_id(&self) -> Option<EmployeeId> {
        match self {
            Self::Parsed(employee) => Some(employee.id),
            Self::Unreadable { raw, .. } => raw
                .get("id")
                .and_then(Value::as_str)
                .and_then(|id| id.parse().ok()),
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Parsed(employee) => Some(&employee.name),
            Self::Unreadable { raw, .. } => raw.get("name").and_then(Value::as_str),
        }
    }
}

impl From<Employee> for StoredEmployee {
    fn from(employee: Employee) -> Self {
        Self::Parsed(employee)
    }
}

impl Serialize for StoredEmployee {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Parsed(employee) => employee.serialize(serializer),
            Self::Unreadable { raw, .. } => raw.serialize(serializer),
        }
    }
}
