//! Task model and related types.
//!
//! This module defines the [`TaskDetails`] handed to the calculators and the
//! [`Mode`] tag identifying which taxation model produced a result.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The taxation model a calculation follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Flat-percentage deductions from an hourly wage.
    Employee,
    /// Sole trader invoicing a VAT-inclusive rate.
    Entrepreneur,
}

/// A piece of paid work: what was done, at which rate, for how long.
///
/// Gross revenue is always `rate × hours`. In entrepreneur mode the rate is
/// VAT-inclusive.
///
/// # Example
///
/// ```
/// use fickpengar::models::TaskDetails;
/// use rust_decimal::Decimal;
///
/// let task = TaskDetails::new("Gräsklippning", Decimal::from(250), Decimal::from(4));
/// assert_eq!(task.rate * task.hours, Decimal::from(1000));
/// assert_eq!(task.per_job, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDetails {
    /// Free-form label for the task. Informational only.
    pub task_name: String,
    /// Currency units per hour.
    pub rate: Decimal,
    /// Hours worked.
    pub hours: Decimal,
    /// Reserved flag for per-job pricing. Not read by either calculator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_job: Option<bool>,
}

impl TaskDetails {
    /// Creates a task without the reserved `per_job` flag.
    pub fn new(task_name: impl Into<String>, rate: Decimal, hours: Decimal) -> Self {
        Self {
            task_name: task_name.into(),
            rate,
            hours,
            per_job: None,
        }
    }
}

/// A partially filled task, as remembered between sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDetailsOverride {
    /// Task label, if remembered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_name: Option<String>,
    /// Rate, if remembered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<Decimal>,
    /// Hours, if remembered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<Decimal>,
    /// Reserved per-job flag, if remembered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_job: Option<bool>,
}

impl TaskDetailsOverride {
    /// Fills every absent field from `defaults`.
    pub fn merged_over(&self, defaults: &TaskDetails) -> TaskDetails {
        TaskDetails {
            task_name: self
                .task_name
                .clone()
                .unwrap_or_else(|| defaults.task_name.clone()),
            rate: self.rate.unwrap_or(defaults.rate),
            hours: self.hours.unwrap_or(defaults.hours),
            per_job: self.per_job.or(defaults.per_job),
        }
    }
}
