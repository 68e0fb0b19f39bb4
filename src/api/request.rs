//! Request types for the money-funnel API.
//!
//! This module defines the JSON request structures for the `/calculate`,
//! `/statement` and `/payment-link` endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::export::StatementOptions;
use crate::models::{
    CalculationResult, EmployeeRatiosOverride, EntrepreneurDefaultsOverride, Mode, TaskDetails,
};

/// Request body for the `/calculate` endpoint, tagged by `mode`.
///
/// Overrides are partial and merged over the configured defaults.
///
/// ```json
/// {"mode": "employee", "task": {"task_name": "Gräsklippning", "rate": "250", "hours": "4"}}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CalculationRequest {
    /// Employee funnel with optional ratio overrides.
    Employee {
        /// The task to calculate.
        task: TaskDetails,
        /// Partial employee ratios.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ratios: Option<EmployeeRatiosOverride>,
    },
    /// Sole-trader funnel with optional parameter overrides.
    Entrepreneur {
        /// The task to calculate.
        task: TaskDetails,
        /// Partial sole-trader parameters.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        defaults: Option<EntrepreneurDefaultsOverride>,
    },
}

impl CalculationRequest {
    /// Returns the requested funnel model.
    pub fn mode(&self) -> Mode {
        match self {
            CalculationRequest::Employee { .. } => Mode::Employee,
            CalculationRequest::Entrepreneur { .. } => Mode::Entrepreneur,
        }
    }

    /// Returns the task to calculate.
    pub fn task(&self) -> &TaskDetails {
        match self {
            CalculationRequest::Employee { task, .. } => task,
            CalculationRequest::Entrepreneur { task, .. } => task,
        }
    }
}

/// Request body for the `/statement` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementRequest {
    /// A result previously returned by `/calculate`.
    pub calculation: CalculationResult,
    /// Household shown in the header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub household_name: Option<String>,
    /// Child shown in the header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_name: Option<String>,
    /// Issue date printed in the header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_on: Option<NaiveDate>,
}

impl StatementRequest {
    /// Returns the header options of the request.
    pub fn options(&self) -> StatementOptions {
        StatementOptions {
            household_name: self.household_name.clone(),
            child_name: self.child_name.clone(),
            issued_on: self.issued_on,
        }
    }
}

/// Request body for the `/payment-link` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentLinkRequest {
    /// A result previously returned by `/calculate`.
    pub calculation: CalculationResult,
    /// The payee's Swish number.
    pub phone: String,
}
